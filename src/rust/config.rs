use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{AnalysisError, AnalysisResult, AnalysisResultExt};
use crate::isoelectric::PkaSet;

pub const DEFAULT_UNIPROT_URL: &str = "https://rest.uniprot.org/uniprotkb";

/// Representation styles understood by 3Dmol.js
pub const VIEWER_STYLES: [&str; 5] = ["cartoon", "stick", "sphere", "line", "cross"];

/// Configuration for a protein analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Isoelectric point estimator settings
    pub estimator: EstimatorConfig,
    /// Remote sequence lookup settings
    pub uniprot: UniProtConfig,
    /// Sequence display settings
    pub display: DisplayConfig,
    /// 3D structure viewer settings
    pub viewer: ViewerConfig,
}

/// Isoelectric point estimator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// pKa constant set
    pub pka_set: PkaSet,
    /// Bisection stops once the pH bracket is narrower than this
    pub tolerance: f64,
    /// Hard cap on bisection steps
    pub max_iterations: u32,
}

/// UniProt REST lookup settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniProtConfig {
    /// Base URL; `<base_url>/<accession>.fasta` is requested
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

/// Sequence display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Residues per line in wrapped output
    pub line_width: usize,
    /// Colour aromatic residues in terminal output
    pub color: bool,
}

/// 3D viewer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub style: String,
    pub color_scheme: String,
    pub background: String,
    pub width: u32,
    pub height: u32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self { pka_set: PkaSet::Emboss, tolerance: 0.001, max_iterations: 100 }
    }
}

impl Default for UniProtConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UNIPROT_URL.to_string(),
            timeout_secs: 30,
            user_agent: format!("protexplorer/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { line_width: 60, color: true }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            style: "cartoon".to_string(),
            color_scheme: "spectrum".to_string(),
            background: "white".to_string(),
            width: 700,
            height: 400,
        }
    }
}

fn config_error(field: &str, message: impl Into<String>) -> AnalysisError {
    AnalysisError::ConfigurationError { field: field.to_string(), message: message.into() }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file.
    ///
    /// Sections and keys left out of the file keep their defaults. The
    /// result is validated before it is returned.
    ///
    /// # Arguments
    /// * `path` - Path to a TOML file with any of the `estimator`, `uniprot`,
    ///   `display` and `viewer` tables
    ///
    /// # Returns
    /// * `Ok(AnalysisConfig)` - The merged, validated configuration
    /// * `Err(AnalysisError::ConfigurationError)` - The file cannot be read or
    ///   a value is out of range
    /// * `Err(AnalysisError::Toml)` - The file is not valid TOML
    pub fn from_file<P: AsRef<Path>>(path: P) -> AnalysisResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_field_context("config", &format!("cannot read {}", path.as_ref().display()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Examples
    /// ```
    /// use protexplorer::config::AnalysisConfig;
    /// use protexplorer::PkaSet;
    ///
    /// let config = AnalysisConfig::from_toml("[estimator]\npka_set = \"solomon\"\n")?;
    /// assert_eq!(config.estimator.pka_set, PkaSet::Solomon);
    /// assert_eq!(config.display.line_width, 60);
    /// # Ok::<(), protexplorer::AnalysisError>(())
    /// ```
    pub fn from_toml(content: &str) -> AnalysisResult<Self> {
        let config: AnalysisConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> AnalysisResult<()> {
        let estimator = &self.estimator;
        if !(estimator.tolerance > 0.0 && estimator.tolerance <= 0.01) {
            return Err(config_error(
                "tolerance",
                format!("Tolerance must be in (0, 0.01] pH units, got {}", estimator.tolerance),
            ));
        }
        if estimator.max_iterations == 0 {
            return Err(config_error("max_iterations", "Iteration cap must be greater than 0"));
        }

        let uniprot = &self.uniprot;
        if !(uniprot.base_url.starts_with("http://") || uniprot.base_url.starts_with("https://")) {
            return Err(config_error(
                "base_url",
                format!("Base URL must start with http:// or https://, got {}", uniprot.base_url),
            ));
        }
        if uniprot.timeout_secs == 0 {
            return Err(config_error("timeout_secs", "Timeout must be greater than 0"));
        }

        if self.display.line_width == 0 {
            return Err(config_error("line_width", "Line width must be greater than 0"));
        }

        if !VIEWER_STYLES.contains(&self.viewer.style.as_str()) {
            return Err(config_error(
                "style",
                format!(
                    "Unknown viewer style: {}. Must be one of: {}",
                    self.viewer.style,
                    VIEWER_STYLES.join(", ")
                ),
            ));
        }
        if self.viewer.width == 0 || self.viewer.height == 0 {
            return Err(config_error("viewer", "Viewer dimensions must be greater than 0"));
        }

        Ok(())
    }
}

/// Configuration builder for more complex setups
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl Default for AnalysisConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisConfigBuilder {
    /// Start from the defaults
    pub fn new() -> Self {
        Self { config: AnalysisConfig::default() }
    }

    /// Start from an existing configuration, e.g. one loaded from file
    pub fn from_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn pka_set(mut self, pka_set: PkaSet) -> Self {
        self.config.estimator.pka_set = pka_set;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.config.estimator.tolerance = tolerance;
        self
    }

    pub fn max_iterations(mut self, iterations: u32) -> Self {
        self.config.estimator.max_iterations = iterations;
        self
    }

    pub fn uniprot_url(mut self, url: &str) -> Self {
        self.config.uniprot.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.uniprot.timeout_secs = secs;
        self
    }

    pub fn line_width(mut self, width: usize) -> Self {
        self.config.display.line_width = width;
        self
    }

    pub fn color(mut self, enable: bool) -> Self {
        self.config.display.color = enable;
        self
    }

    pub fn viewer_size(mut self, width: u32, height: u32) -> Self {
        self.config.viewer.width = width;
        self.config.viewer.height = height;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> AnalysisResult<AnalysisConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
