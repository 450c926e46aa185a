use thiserror::Error;

/// Structural failures of a planner call. Admission outcomes (infeasible
/// SLO, exhausted capacity) are ordinary values, not errors.
#[derive(Debug, Error)]
pub enum AdmissionError {
    #[error("malformed dag: {0}")]
    MalformedDag(String),

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid yaml in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
