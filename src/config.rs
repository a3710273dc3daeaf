//! Registry configuration: which tables to load and which splines to build.
//!
//! The default layout is four tables in the working directory, of which only
//! the K-K pair feeds interpolants:
//! ```toml
//! base_dir = "."
//!
//! [[tables]]
//! name = "kk_singlet"
//! path = "kk_singlet"
//!
//! [[tables]]
//! name = "kk_triplet"
//! path = "kk_triplet"
//!
//! [[tables]]
//! name = "krb_singlet"
//! path = "krb_singlet"
//!
//! [[tables]]
//! name = "krb_triplet"
//! path = "krb_triplet"
//!
//! [[interpolants]]
//! name = "singlet"
//! table = "kk_singlet"
//!
//! [[interpolants]]
//! name = "triplet"
//! table = "kk_triplet"
//! ```

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    table::TableFormat,
};

pub const SINGLET: &str = "singlet";
pub const TRIPLET: &str = "triplet";

/// A table file to load at initialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TableSource {
    pub name: String,
    /// Relative paths are resolved against [RegistryConfig::base_dir].
    pub path: PathBuf,
}

/// A spline to build from one of the loaded tables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InterpolantSource {
    pub name: String,
    pub table: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
    #[serde(default)]
    pub format: TableFormat,
    #[serde(default)]
    pub tables: Vec<TableSource>,
    #[serde(default)]
    pub interpolants: Vec<InterpolantSource>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        let table = |name: &str| TableSource { name: name.to_string(), path: PathBuf::from(name) };
        let interpolant = |name: &str, table: &str| InterpolantSource {
            name: name.to_string(),
            table: table.to_string(),
        };

        RegistryConfig {
            base_dir: default_base_dir(),
            format: TableFormat::default(),
            tables: vec![
                table("kk_singlet"),
                table("kk_triplet"),
                table("krb_singlet"),
                table("krb_triplet"),
            ],
            interpolants: vec![
                interpolant(SINGLET, "kk_singlet"),
                interpolant(TRIPLET, "kk_triplet"),
            ],
        }
    }
}

impl RegistryConfig {
    /// Default layout with tables looked up in `base_dir`.
    pub fn with_base_dir<P: Into<PathBuf>>(base_dir: P) -> Self {
        RegistryConfig { base_dir: base_dir.into(), ..Self::default() }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RegistryConfig = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a TOML configuration file. A relative `base_dir` inside the file is
    /// taken relative to the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::NotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;
        if config.base_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.base_dir = parent.join(&config.base_dir);
            }
        }
        Ok(config)
    }

    pub fn resolve(&self, source: &TableSource) -> PathBuf {
        self.base_dir.join(&source.path)
    }

    pub fn table(&self, name: &str) -> Option<&TableSource> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Checks names before any file is touched.
    /// # Errors
    /// [Error::Config] on duplicate table or interpolant names, and on
    /// interpolants referring to a table that is not configured.
    pub fn validate(&self) -> Result<()> {
        let mut table_names = HashSet::new();
        for table in &self.tables {
            if !table_names.insert(table.name.as_str()) {
                return Err(Error::Config(format!("table '{}' is defined twice", table.name)));
            }
        }

        let mut interpolant_names = HashSet::new();
        for interpolant in &self.interpolants {
            if !interpolant_names.insert(interpolant.name.as_str()) {
                return Err(Error::Config(format!("interpolant '{}' is defined twice", interpolant.name)));
            }
            if !table_names.contains(interpolant.table.as_str()) {
                return Err(Error::Config(format!(
                    "interpolant '{}' refers to unknown table '{}'",
                    interpolant.name, interpolant.table
                )));
            }
        }
        Ok(())
    }
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let config = RegistryConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(4, config.tables.len());
        assert_eq!(2, config.interpolants.len());
        assert_eq!(Some("kk_singlet"), config.interpolants.iter().find(|i| i.name == SINGLET).map(|i| i.table.as_str()));
        assert_eq!(Some("kk_triplet"), config.interpolants.iter().find(|i| i.name == TRIPLET).map(|i| i.table.as_str()));
        assert_eq!(PathBuf::from("./krb_triplet"), config.resolve(config.table("krb_triplet").unwrap()));
    }

    #[test]
    fn with_base_dir_keeps_layout() {
        let config = RegistryConfig::with_base_dir("/data/potentials");

        assert_eq!(RegistryConfig::default().tables, config.tables);
        assert_eq!(
            PathBuf::from("/data/potentials/kk_singlet"),
            config.resolve(config.table("kk_singlet").unwrap())
        );
    }

    #[test]
    fn parse_toml() {
        let content = r#"
            base_dir = "tables"

            [format]
            delimiter = ","

            [[tables]]
            name = "ground"
            path = "x1sigma.dat"

            [[interpolants]]
            name = "ground"
            table = "ground"
        "#;
        let config = RegistryConfig::from_toml_str(content).unwrap();

        assert_eq!(PathBuf::from("tables"), config.base_dir);
        assert_eq!(Some(','), config.format.delimiter);
        assert_eq!('#', config.format.comment);
        assert_eq!(PathBuf::from("tables/x1sigma.dat"), config.resolve(&config.tables[0]));
    }

    #[test]
    fn unknown_table_is_config_error() {
        let content = r#"
            [[tables]]
            name = "a"
            path = "a"

            [[interpolants]]
            name = "singlet"
            table = "b"
        "#;
        assert!(matches!(RegistryConfig::from_toml_str(content), Err(Error::Config(_))));
    }

    #[test]
    fn duplicate_names_are_config_errors() {
        let mut config = RegistryConfig::default();
        config.tables.push(config.tables[0].clone());
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = RegistryConfig::default();
        config.interpolants.push(config.interpolants[0].clone());
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn malformed_toml_is_config_error() {
        assert!(matches!(RegistryConfig::from_toml_str("tables = 3"), Err(Error::Config(_))));
    }
}
