//! `ldwizard.toml` settings
//!
//! Every field is optional. Lookup order is the `--config-file` flag, then
//! `./ldwizard.toml`, then built-in defaults.

use std::path::{Path, PathBuf};

use ldwizard_api::{PrefixMap, DEFAULT_BASE_IRI};
use serde::Deserialize;

use crate::error::{CliError, CliResult};

pub const SETTINGS_FILE: &str = "ldwizard.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Base IRI used when neither a mapping, a JSON config nor `--base-iri`
    /// provides one
    pub default_base_iri: String,
    /// Extra prefix bindings for Turtle output
    pub prefixes: Vec<PrefixBinding>,
    pub strict_extraction: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PrefixBinding {
    pub prefix: String,
    pub iri: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_base_iri: DEFAULT_BASE_IRI.to_string(),
            prefixes: Vec::new(),
            strict_extraction: false,
        }
    }
}

impl Settings {
    /// Load settings from `explicit`, else `./ldwizard.toml`, else defaults
    ///
    /// A missing explicit path is an error; a missing `./ldwizard.toml` is not.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        let path = match explicit {
            Some(p) => {
                if !p.is_file() {
                    return Err(CliError::Config(format!(
                        "settings file not found: {}",
                        p.display()
                    )));
                }
                p.to_path_buf()
            }
            None => {
                let local = PathBuf::from(SETTINGS_FILE);
                if !local.is_file() {
                    return Ok(Self::default());
                }
                local
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|e| {
            CliError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let settings = Self::parse(&text)?;
        tracing::info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn parse(text: &str) -> CliResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Prefix table for Turtle output: the well-known set with `:` bound to
    /// `base_iri`, then the configured bindings
    pub fn prefix_map(&self, base_iri: &str) -> PrefixMap {
        let mut prefixes = PrefixMap::well_known(base_iri);
        for binding in &self.prefixes {
            prefixes.insert(binding.prefix.as_str(), binding.iri.as_str());
        }
        prefixes
    }
}
