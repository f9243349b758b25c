//! Client construction.

use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::time::Duration;

use bytes::Bytes;

use super::{
    Auth, Client, ClientConfig, DEFAULT_MAX_OIDS_PER_REQUEST, DEFAULT_PORT, DEFAULT_TIMEOUT,
};
use crate::client::retry::Retry;
use crate::error::{Error, Result};
use crate::transport::{Transport, UdpTransport};

/// Builder for [`Client`].
///
/// ```rust,no_run
/// use snmp_adapter::{Auth, Client, Retry};
/// use std::time::Duration;
///
/// # async fn example() -> snmp_adapter::Result<()> {
/// let client = Client::builder("192.168.0.59", Auth::v1("public"))
///     .timeout(Duration::from_secs(2))
///     .retry(Retry::fixed(1, Duration::from_millis(250)))
///     .connect()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    target: String,
    auth: Auth,
    timeout: Duration,
    retry: Retry,
    max_oids_per_request: usize,
}

impl ClientBuilder {
    /// `target` is `host`, `host:port`, or an IP literal; the port defaults to 161.
    pub fn new(target: impl Into<String>, auth: impl Into<Auth>) -> Self {
        Self {
            target: target.into(),
            auth: auth.into(),
            timeout: DEFAULT_TIMEOUT,
            retry: Retry::default(),
            max_oids_per_request: DEFAULT_MAX_OIDS_PER_REQUEST,
        }
    }

    /// Time to wait for each response (default: 5 seconds).
    ///
    /// A request may take up to `timeout * (retries + 1)` plus backoff.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retry strategy on timeout (default: 3 retries, no backoff).
    pub fn retry(mut self, retry: impl Into<Retry>) -> Self {
        self.retry = retry.into();
        self
    }

    /// Largest number of OIDs in one GET (default: 10); longer lists are batched.
    pub fn max_oids_per_request(mut self, max: usize) -> Self {
        self.max_oids_per_request = max;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.max_oids_per_request == 0 {
            return Err(Error::config("max_oids_per_request must be at least 1"));
        }
        if self.timeout.is_zero() {
            return Err(Error::config("timeout must be greater than zero"));
        }
        Ok(())
    }

    fn build_config(&self) -> ClientConfig {
        ClientConfig {
            version: self.auth.version,
            community: Bytes::copy_from_slice(self.auth.community.as_bytes()),
            timeout: self.timeout,
            retry: self.retry.clone(),
            max_oids_per_request: self.max_oids_per_request,
        }
    }

    /// Resolve the target and connect a UDP socket to it.
    pub async fn connect(self) -> Result<Client<UdpTransport>> {
        self.validate()?;
        let addr = resolve_target(&self.target, DEFAULT_PORT)?;
        let transport = UdpTransport::connect(addr).await?;
        Ok(Client::new(transport, self.build_config()))
    }

    /// Build a client over an existing transport.
    pub fn build_with<T: Transport>(self, transport: T) -> Result<Client<T>> {
        self.validate()?;
        Ok(Client::new(transport, self.build_config()))
    }
}

/// Resolve `host`, `host:port`, `a.b.c.d`, `[v6]:port` or a bare IPv6 literal.
pub(crate) fn resolve_target(target: &str, default_port: u16) -> Result<SocketAddr> {
    if let Ok(addr) = target.parse::<SocketAddr>() {
        return Ok(addr);
    }
    if let Ok(ip) = target.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, default_port));
    }

    let has_port = target
        .rsplit_once(':')
        .is_some_and(|(_, port)| port.parse::<u16>().is_ok());
    let resolved = if has_port {
        target.to_socket_addrs()
    } else {
        (target, default_port).to_socket_addrs()
    };

    resolved
        .map_err(|e| Error::config(format!("could not resolve address '{target}': {e}")))?
        .next()
        .ok_or_else(|| Error::config(format!("could not resolve address '{target}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::Version;

    #[test]
    fn default_port_is_added() {
        assert_eq!(
            resolve_target("192.168.0.59", 161).unwrap(),
            "192.168.0.59:161".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            resolve_target("::1", 161).unwrap(),
            "[::1]:161".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(resolve_target("localhost", 1161).unwrap().port(), 1161);
    }

    #[test]
    fn explicit_port_wins() {
        assert_eq!(resolve_target("127.0.0.1:1161", 161).unwrap().port(), 1161);
        assert_eq!(resolve_target("localhost:16100", 161).unwrap().port(), 16100);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let builder = ClientBuilder::new("127.0.0.1", Auth::default()).max_oids_per_request(0);
        assert!(matches!(*builder.validate().unwrap_err(), Error::Config(_)));
    }

    #[test]
    fn config_follows_auth() {
        let config = ClientBuilder::new("127.0.0.1", Auth::v1("webrelay")).build_config();
        assert_eq!(config.version, Version::V1);
        assert_eq!(config.community.as_ref(), b"webrelay");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.max_oids_per_request, 10);
    }
}
