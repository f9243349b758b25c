//! Community authentication for the SNMP client.

use crate::version::Version;

/// Protocol version and community string sent with every request.
///
/// ```rust
/// use snmp_adapter::{Auth, Version};
///
/// let auth = Auth::v1("private");
/// assert_eq!(auth.version, Version::V1);
///
/// // Auth::default() is v2c with "public"
/// assert_eq!(Auth::default(), Auth::v2c("public"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auth {
    pub version: Version,
    pub community: String,
}

impl Default for Auth {
    fn default() -> Self {
        Auth::v2c("public")
    }
}

impl Auth {
    pub fn v1(community: impl Into<String>) -> Self {
        Self {
            version: Version::V1,
            community: community.into(),
        }
    }

    pub fn v2c(community: impl Into<String>) -> Self {
        Self {
            version: Version::V2c,
            community: community.into(),
        }
    }

    pub fn new(version: Version, community: impl Into<String>) -> Self {
        Self {
            version,
            community: community.into(),
        }
    }
}
