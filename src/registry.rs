//! Named interpolants built once at startup.
//!
//! [DatasetRegistry::initialize] reads every configured table and builds every
//! configured spline. Initialization is all or nothing: the first failing table
//! aborts it and no registry is returned.
//!
//! Tables loaded without an interpolant bound to them (the K-Rb pair in the
//! default layout) are kept as *unbound* tables and reported with a warning.

use std::{collections::HashMap, sync::OnceLock};

use log::{debug, info, warn};

use crate::{
    config::{RegistryConfig, SINGLET, TRIPLET},
    error::{Error, Result},
    spline::Spline,
    table::SampleTable,
};

static GLOBAL_REGISTRY: OnceLock<DatasetRegistry> = OnceLock::new();

/// Read-only map from dataset name to spline.
#[derive(Debug)]
pub struct DatasetRegistry {
    splines: HashMap<String, Spline>,
    unbound_tables: HashMap<String, SampleTable>,
}

impl DatasetRegistry {
    /// Loads all tables named in `config` and builds the configured splines.
    /// # Errors
    /// [Error::Config] when `config` is inconsistent; otherwise the first load or
    /// build failure, wrapped in [Error::Dataset] with the table's name.
    pub fn initialize(config: &RegistryConfig) -> Result<Self> {
        config.validate()?;

        let mut tables = HashMap::with_capacity(config.tables.len());
        for source in &config.tables {
            let path = config.resolve(source);
            let table = SampleTable::load_with(&path, &config.format)
                .map_err(|e| e.in_dataset(&source.name))?;
            tables.insert(source.name.clone(), table);
        }

        let mut splines = HashMap::with_capacity(config.interpolants.len());
        for interpolant in &config.interpolants {
            let table = tables
                .get(&interpolant.table)
                .cloned()
                .ok_or_else(|| Error::UnknownDataset(interpolant.table.clone()))?;
            let spline = Spline::new(table).map_err(|e| e.in_dataset(&interpolant.table))?;
            debug!(
                "built spline '{}' from '{}' over [{}, {}]",
                interpolant.name,
                interpolant.table,
                spline.domain().0,
                spline.domain().1
            );
            splines.insert(interpolant.name.clone(), spline);
        }

        tables.retain(|name, _| !config.interpolants.iter().any(|i| &i.table == name));
        let mut unbound: Vec<&String> = tables.keys().collect();
        unbound.sort();
        for name in unbound {
            warn!("table '{}' is loaded but no interpolant is built from it", name);
        }

        info!("dataset registry initialized with {} interpolants", splines.len());
        Ok(DatasetRegistry { splines, unbound_tables: tables })
    }

    pub fn get(&self, name: &str) -> Option<&Spline> {
        self.splines.get(name)
    }

    /// Like [DatasetRegistry::get], with [Error::UnknownDataset] for missing names.
    pub fn spline(&self, name: &str) -> Result<&Spline> {
        self.get(name).ok_or_else(|| Error::UnknownDataset(name.to_string()))
    }

    pub fn singlet(&self) -> Result<&Spline> {
        self.spline(SINGLET)
    }

    pub fn triplet(&self) -> Result<&Spline> {
        self.spline(TRIPLET)
    }

    /// Interpolant names in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.splines.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.splines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.splines.is_empty()
    }

    /// Names of tables that were loaded but feed no interpolant, alphabetically.
    pub fn unbound_tables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.unbound_tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn unbound_table(&self, name: &str) -> Option<&SampleTable> {
        self.unbound_tables.get(name)
    }
}

/// Builds the process-wide registry. Succeeds once per process.
/// # Errors
/// [Error::AlreadyInitialized] on any call after a successful one, or the
/// initialization error of [DatasetRegistry::initialize].
pub fn init_global(config: &RegistryConfig) -> Result<&'static DatasetRegistry> {
    if GLOBAL_REGISTRY.get().is_some() {
        return Err(Error::AlreadyInitialized);
    }
    let registry = DatasetRegistry::initialize(config)?;
    GLOBAL_REGISTRY.set(registry).map_err(|_| Error::AlreadyInitialized)?;
    GLOBAL_REGISTRY.get().ok_or(Error::AlreadyInitialized)
}

/// The process-wide registry, if [init_global] has succeeded.
pub fn global() -> Option<&'static DatasetRegistry> {
    GLOBAL_REGISTRY.get()
}
