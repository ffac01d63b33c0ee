use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root application configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `RFM_EXPRESS__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ingestion: IngestionConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestionConfig {
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,
    /// Invoices starting with this prefix denote cancellations and are
    /// dropped during cleaning.
    #[serde(default = "default_cancellation_prefix")]
    pub cancellation_prefix: String,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_chart_width")]
    pub chart_width: u32,
    #[serde(default = "default_chart_height")]
    pub chart_height: u32,
}

fn default_input_path() -> PathBuf {
    PathBuf::from("online_retail_II.csv")
}
fn default_cancellation_prefix() -> String {
    "C".to_string()
}
fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}
fn default_chart_width() -> u32 {
    1200
}
fn default_chart_height() -> u32 {
    600
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            cancellation_prefix: default_cancellation_prefix(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            chart_width: default_chart_width(),
            chart_height: default_chart_height(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ingestion: IngestionConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables only.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an optional TOML file plus environment
    /// variables. Environment values override file values.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.to_path_buf()));
        }
        let builder = builder.add_source(
            config::Environment::with_prefix("RFM_EXPRESS")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
