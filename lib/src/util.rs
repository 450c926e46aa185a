use std::fs::OpenOptions;
use std::io::Write;

use serde::de::DeserializeOwned;

use crate::error::AdmissionError;

/// Read a yaml file into any deserializable type.
pub fn load_yaml<T: DeserializeOwned>(file_path: &str) -> Result<T, AdmissionError> {
    let content = std::fs::read_to_string(file_path).map_err(|source| AdmissionError::Io {
        path: file_path.to_string(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| AdmissionError::Yaml {
        path: file_path.to_string(),
        source,
    })
}

/// Append a yaml fragment to a file, creating it if needed.
pub fn append_info_to_yaml(file_path: &str, info: &str) -> Result<(), AdmissionError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)
        .map_err(|source| AdmissionError::Io {
            path: file_path.to_string(),
            source,
        })?;
    file.write_all(info.as_bytes())
        .map_err(|source| AdmissionError::Io {
            path: file_path.to_string(),
            source,
        })?;
    Ok(())
}
