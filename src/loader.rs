//! This module provides the `ConfigLoader` struct, responsible for loading machine
//! configurations from JSON documents, either from files or from strings.

use crate::analyzer::analyze;
use crate::config::MachineConfig;
use crate::types::TuringMachineError;
use std::fs;
use std::path::{Path, PathBuf};

/// `ConfigLoader` is a utility struct for loading machine configurations.
/// It provides methods to load a configuration from a file, from string content,
/// and to discover and load all `.json` files within a specified directory.
///
/// Every call parses its source again; nothing is cached between loads.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads a single machine configuration from the specified file path.
    ///
    /// # Arguments
    ///
    /// * `path` - A reference to the `Path` of the `.json` file to load.
    ///
    /// # Returns
    ///
    /// * `Ok(MachineConfig)` if the file is successfully read, parsed and validated.
    /// * `Err(TuringMachineError::ConfigLoad)` if the file cannot be read or parsed.
    /// * `Err(TuringMachineError::Validation)` if the configuration is inconsistent.
    pub fn load_config(path: &Path) -> Result<MachineConfig, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::ConfigLoad(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Self::load_config_from_str(&content)
    }

    /// Loads a single machine configuration from the provided string content.
    ///
    /// Missing required fields, malformed JSON and unknown head moves are reported as
    /// `TuringMachineError::ConfigLoad`.
    pub fn load_config_from_str(content: &str) -> Result<MachineConfig, TuringMachineError> {
        let config: MachineConfig = serde_json::from_str(content)
            .map_err(|e| TuringMachineError::ConfigLoad(e.to_string()))?;

        analyze(&config)?;

        Ok(config)
    }

    /// Loads all machine configurations (`.json` extension) from a given directory.
    ///
    /// Directories and non-`.json` files are skipped. Each file yields its own result,
    /// so one broken file does not hide the others.
    pub fn load_configs(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, MachineConfig), TuringMachineError>> {
        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(TuringMachineError::ConfigLoad(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        let mut results: Vec<_> = entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(TuringMachineError::ConfigLoad(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                // Skip directories and non-.json files
                if path.is_dir() || path.extension().is_none_or(|ext| ext != "json") {
                    return None;
                }

                match Self::load_config(&path) {
                    Ok(config) => Some(Ok((path, config))),
                    Err(e) => Some(Err(TuringMachineError::ConfigLoad(format!(
                        "Failed to load configuration from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect();

        // read_dir order is platform dependent
        results.sort_by(|a, b| match (a, b) {
            (Ok((a, _)), Ok((b, _))) => a.cmp(b),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => std::cmp::Ordering::Equal,
        });

        results
    }
}
