//! MIB module loading and name resolution.
//!
//! A [`MibView`] maps `MODULE::symbol` names to OIDs and OIDs back to their
//! most specific known name. Modules come from the configured search
//! directories first and from the compiled-in set otherwise:
//!
//! ```
//! use snmp_adapter::mib::{MibView, ObjectIdentity};
//!
//! let mut mib = MibView::new().unwrap();
//! mib.load(["SNMPv2-MIB"]).unwrap();
//!
//! let object = ObjectIdentity::parse("SNMPv2-MIB::sysDescr.0").unwrap();
//! let oid = object.resolve(&mib).unwrap();
//! assert_eq!(oid.to_string(), "1.3.6.1.2.1.1.1.0");
//! assert_eq!(mib.pretty(&oid), "SNMPv2-MIB::sysDescr.0");
//! ```

mod builtin;
pub mod parse;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::oid::Oid;

pub use parse::{Assignment, ModuleDef};

/// Base module every view starts with.
pub const BASE_MODULE: &str = "SNMPv2-SMI";

/// File name suffixes tried in each search directory.
const MIB_EXTENSIONS: &[&str] = &["", ".txt", ".mib"];

/// Names of the compiled-in modules.
pub fn builtin_modules() -> impl Iterator<Item = &'static str> {
    builtin::MODULES.iter().map(|(name, _)| *name)
}

/// Where to look for MIB files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MibConfig {
    /// Directories searched in order before falling back to the built-ins.
    pub search_dirs: Vec<PathBuf>,
}

impl MibConfig {
    pub fn with_dirs(dirs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            search_dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }
}

/// Loaded MIB modules and their symbol tables.
#[derive(Debug, Clone)]
pub struct MibView {
    config: MibConfig,
    loaded: Vec<String>,
    /// `(module, symbol) -> oid`
    symbols: HashMap<(String, String), Oid>,
    /// Unqualified symbol names, used for parent lookup across modules.
    by_name: HashMap<String, Oid>,
    /// First registration wins.
    names: HashMap<Oid, (String, String)>,
}

impl MibView {
    /// A view with only the base SMI module loaded.
    pub fn new() -> Result<Self> {
        Self::with_config(MibConfig::default())
    }

    pub fn with_config(config: MibConfig) -> Result<Self> {
        let mut view = Self {
            config,
            loaded: Vec::new(),
            symbols: HashMap::new(),
            by_name: HashMap::new(),
            names: HashMap::new(),
        };
        view.load([BASE_MODULE])?;
        Ok(view)
    }

    pub fn config(&self) -> &MibConfig {
        &self.config
    }

    /// Modules loaded so far, in load order.
    pub fn loaded_modules(&self) -> &[String] {
        &self.loaded
    }

    pub fn is_loaded(&self, module: &str) -> bool {
        self.loaded.iter().any(|m| m == module)
    }

    /// Load modules by name. Already loaded modules are skipped.
    ///
    /// Imported modules are loaded first when they can be found; a missing
    /// import only matters if the module actually refers to its symbols.
    pub fn load<I, S>(&mut self, modules: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut visiting = HashSet::new();
        for module in modules {
            self.load_one(module.as_ref(), &mut visiting, true)?;
        }
        Ok(())
    }

    /// Parse and register module text directly.
    pub fn load_text(&mut self, text: &str) -> Result<String> {
        let def = parse::parse(text)?;
        let name = def.name.clone();
        if !self.is_loaded(&name) {
            let mut visiting = HashSet::from([name.clone()]);
            self.register(def, &mut visiting)?;
        }
        Ok(name)
    }

    fn load_one(
        &mut self,
        module: &str,
        visiting: &mut HashSet<String>,
        required: bool,
    ) -> Result<()> {
        if self.is_loaded(module) || !visiting.insert(module.to_string()) {
            return Ok(());
        }
        let text = match self.find_source(module)? {
            Some(text) => text,
            None if required => {
                return Err(Error::Mib {
                    module: module.into(),
                    reason: "module not found in search path or built-in set".into(),
                }
                .boxed());
            }
            None => {
                tracing::debug!(target: "snmp_adapter::mib", { mib.module = module }, "imported module not available, skipping");
                return Ok(());
            }
        };

        let def = parse::parse(&text)?;
        if def.name != module {
            return Err(Error::Mib {
                module: module.into(),
                reason: format!("file defines module {}", def.name).into(),
            }
            .boxed());
        }
        self.register(def, visiting)
    }

    fn find_source(&self, module: &str) -> Result<Option<String>> {
        for dir in &self.config.search_dirs {
            if let Some(path) = find_in_dir(dir, module) {
                tracing::debug!(target: "snmp_adapter::mib", { mib.module = module, mib.path = %path.display() }, "loading MIB file");
                let text = std::fs::read_to_string(&path).map_err(|e| {
                    Error::Mib {
                        module: module.into(),
                        reason: format!("cannot read {}: {}", path.display(), e).into(),
                    }
                    .boxed()
                })?;
                return Ok(Some(text));
            }
        }
        Ok(builtin::find(module).map(str::to_string))
    }

    fn register(&mut self, def: ModuleDef, visiting: &mut HashSet<String>) -> Result<()> {
        for import in &def.imports {
            self.load_one(import, visiting, false)?;
        }

        let module = def.name;
        let mut local: HashMap<String, Oid> = HashMap::new();
        let mut pending = def.assignments;

        // Assignments may refer to parents defined further down the module.
        while !pending.is_empty() {
            let before = pending.len();
            let mut unresolved = Vec::new();
            for assignment in pending {
                let base = match &assignment.parent {
                    None => Some(Oid::empty()),
                    Some(parent) => local.get(parent).or_else(|| self.by_name.get(parent)).cloned(),
                };
                match base {
                    Some(base) => {
                        let oid = base.extend(&assignment.arcs);
                        local.insert(assignment.name, oid);
                    }
                    None => unresolved.push(assignment),
                }
            }
            if unresolved.len() == before {
                let names: Vec<String> = unresolved
                    .iter()
                    .map(|a| format!("{} (parent {})", a.name, a.parent.as_deref().unwrap_or("?")))
                    .collect();
                return Err(Error::Mib {
                    module: module.into(),
                    reason: format!("unresolved parents: {}", names.join(", ")).into(),
                }
                .boxed());
            }
            pending = unresolved;
        }

        tracing::debug!(target: "snmp_adapter::mib", { mib.module = %module, mib.symbols = local.len() }, "loaded MIB module");

        let mut ordered: Vec<(String, Oid)> = local.into_iter().collect();
        ordered.sort_by(|a, b| a.1.cmp(&b.1));
        for (name, oid) in ordered {
            self.names
                .entry(oid.clone())
                .or_insert_with(|| (module.clone(), name.clone()));
            self.by_name.entry(name.clone()).or_insert_with(|| oid.clone());
            self.symbols.insert((module.clone(), name), oid);
        }
        self.loaded.push(module);
        Ok(())
    }

    /// OID of `module::symbol`.
    pub fn resolve(&self, module: &str, symbol: &str) -> Result<Oid> {
        self.symbols
            .get(&(module.to_string(), symbol.to_string()))
            .cloned()
            .ok_or_else(|| {
                Error::UnknownObject {
                    module: module.into(),
                    symbol: symbol.into(),
                }
                .boxed()
            })
    }

    /// Name of the longest known prefix of `oid`, as `MODULE::name.suffix`.
    ///
    /// Falls back to dotted notation when no prefix is known.
    pub fn pretty(&self, oid: &Oid) -> String {
        let arcs = oid.arcs();
        for len in (1..=arcs.len()).rev() {
            if let Some((module, name)) = self.names.get(&Oid::from_slice(&arcs[..len])) {
                let mut out = format!("{module}::{name}");
                for arc in &arcs[len..] {
                    out.push('.');
                    out.push_str(&arc.to_string());
                }
                return out;
            }
        }
        oid.to_string()
    }
}

fn find_in_dir(dir: &Path, module: &str) -> Option<PathBuf> {
    MIB_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{module}{ext}")))
        .find(|path| path.is_file())
}

/// An object named either symbolically or by numeric OID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectIdentity {
    Symbol {
        module: String,
        symbol: String,
        indices: Vec<u32>,
    },
    Numeric(Oid),
}

impl ObjectIdentity {
    pub fn new(
        module: impl Into<String>,
        symbol: impl Into<String>,
        indices: impl IntoIterator<Item = u32>,
    ) -> Self {
        Self::Symbol {
            module: module.into(),
            symbol: symbol.into(),
            indices: indices.into_iter().collect(),
        }
    }

    /// Parse `MODULE::symbol[.index...]` or a dotted OID.
    ///
    /// ```
    /// use snmp_adapter::mib::ObjectIdentity;
    ///
    /// let obj = ObjectIdentity::parse("IF-MIB::ifInOctets.1").unwrap();
    /// assert_eq!(obj, ObjectIdentity::new("IF-MIB", "ifInOctets", [1]));
    /// assert!(matches!(ObjectIdentity::parse("1.3.6.1").unwrap(), ObjectIdentity::Numeric(_)));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let Some((module, rest)) = s.split_once("::") else {
            return Ok(Self::Numeric(Oid::parse(s)?));
        };
        let mut parts = rest.split('.');
        let symbol = parts.next().unwrap_or_default();
        if module.is_empty() || symbol.is_empty() {
            let msg = format!("expected MODULE::symbol, got {s:?}");
            return Err(Error::InvalidOid(msg.into()).boxed());
        }
        let indices = parts
            .map(|p| {
                p.parse::<u32>().map_err(|_| {
                    Error::InvalidOid(format!("bad index {p:?} in {s:?}").into()).boxed()
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(module, symbol, indices))
    }

    /// The module this object needs loaded, if symbolic.
    pub fn module(&self) -> Option<&str> {
        match self {
            Self::Symbol { module, .. } => Some(module),
            Self::Numeric(_) => None,
        }
    }

    pub fn resolve(&self, mib: &MibView) -> Result<Oid> {
        match self {
            Self::Symbol {
                module,
                symbol,
                indices,
            } => Ok(mib.resolve(module, symbol)?.extend(indices)),
            Self::Numeric(oid) => Ok(oid.clone()),
        }
    }
}

impl fmt::Display for ObjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol {
                module,
                symbol,
                indices,
            } => {
                write!(f, "{module}::{symbol}")?;
                for index in indices {
                    write!(f, ".{index}")?;
                }
                Ok(())
            }
            Self::Numeric(oid) => write!(f, "{oid}"),
        }
    }
}

impl From<Oid> for ObjectIdentity {
    fn from(oid: Oid) -> Self {
        Self::Numeric(oid)
    }
}
