use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid sequence: {0}")]
    InvalidSequence(String),

    #[error("Lookup failed for '{accession}': {message}")]
    LookupFailed { accession: String, message: String },

    #[error("FASTA parsing failed: {0}")]
    ParseFailed(String),

    #[error("Invalid structure identifier '{0}'")]
    InvalidStructureId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {field} - {message}")]
    ConfigurationError { field: String, message: String },
}

impl AnalysisError {
    pub fn invalid_residue(residue: char, position: usize) -> Self {
        AnalysisError::InvalidSequence(format!(
            "Invalid amino acid '{}' found at position {}",
            residue, position
        ))
    }

    pub fn lookup_failed(accession: &str, message: impl Into<String>) -> Self {
        AnalysisError::LookupFailed { accession: accession.to_string(), message: message.into() }
    }

    /// Short label for the error kind, used in tabular reports
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::InvalidSequence(_) => "InvalidSequence",
            AnalysisError::LookupFailed { .. } => "LookupFailed",
            AnalysisError::ParseFailed(_) => "ParseFailed",
            AnalysisError::InvalidStructureId(_) => "InvalidStructureId",
            AnalysisError::Io(_) => "Io",
            AnalysisError::Json(_) | AnalysisError::Csv(_) | AnalysisError::Toml(_) => {
                "Serialization"
            }
            AnalysisError::ConfigurationError { .. } => "Configuration",
        }
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Extension trait for Result to add context
pub trait AnalysisResultExt<T> {
    /// Attach a configuration field name to an error
    fn with_field_context(self, field: &str, message: &str) -> AnalysisResult<T>;
}

impl<T, E> AnalysisResultExt<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn with_field_context(self, field: &str, message: &str) -> AnalysisResult<T> {
        self.map_err(|e| AnalysisError::ConfigurationError {
            field: field.to_string(),
            message: format!("{}: {}", message, e),
        })
    }
}
