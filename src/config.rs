use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use validator::Validate;

use crate::core::GenericResult;

pub const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Extra company normalization rules which take precedence over the built-in ones.
    #[serde(default)]
    #[validate(nested)]
    pub companies: Vec<CompanyConfig>,

    #[serde(default = "default_metadata_scan_rows")]
    #[validate(range(min = 1, max = 1000))]
    pub metadata_scan_rows: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            companies: Vec::new(),
            metadata_scan_rows: default_metadata_scan_rows(),
        }
    }
}

impl Config {
    pub fn new(config_dir: &str) -> GenericResult<Config> {
        let config_dir = PathBuf::from(shellexpand::tilde(config_dir).as_ref());
        let path = config_dir.join(CONFIG_FILE_NAME);

        match fs::read(&path) {
            Ok(data) => Config::load(&path, &data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{:?} doesn't exist. Using the default configuration.", path);
                Ok(Config::default())
            },
            Err(e) => Err!("Unable to read {:?}: {}", path, e),
        }
    }

    fn load(path: &Path, data: &[u8]) -> GenericResult<Config> {
        let mut config: Config = serde_yaml::from_slice(data).map_err(|e| format!(
            "Error while reading {:?} configuration file: {}", path, e))?;

        config.validate().map_err(|e| format!(
            "Invalid {:?} configuration file: {}", path, e))?;

        let mut names = HashSet::new();

        for company in &mut config.companies {
            if !names.insert(company.name.clone()) {
                return Err!("Duplicate company name: {:?}", company.name);
            }

            for pattern in &mut company.patterns {
                *pattern = pattern.trim().to_lowercase();
                if pattern.is_empty() {
                    return Err!("{:?} company has an empty pattern", company.name);
                }
            }
        }

        Ok(config)
    }
}

fn default_metadata_scan_rows() -> usize {
    50
}

#[derive(Deserialize, Validate, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct CompanyConfig {
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(length(min = 1))]
    pub patterns: Vec<String>,
}
