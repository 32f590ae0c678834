//! Configuration for the pipeline, describer and archive stages.
//!
//! Sources, later overriding earlier:
//! - Bundled defaults (include_str! from sfumato.toml)
//! - `~/.config/sfumato/sfumato.toml`
//! - `./sfumato.toml`
//! - An explicit file passed by the caller
//! - Environment variables prefixed `SFUMATO_`, sections separated by `__`
//!   (e.g. `SFUMATO_DESCRIBER__PROVIDER=gemini`)
//!
//! Credentials are never read from configuration files.

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use sfumato_error::{ConfigError, ConfigErrorKind};
use sfumato_interface::ImageDetail;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../sfumato.toml");

/// Batch execution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Items processed concurrently (0 = available parallelism)
    pub max_concurrent_items: usize,
    /// Largest accepted upload per item, in bytes
    pub max_upload_bytes: usize,
}

impl PipelineConfig {
    /// Effective batch width.
    pub fn concurrency(&self) -> usize {
        match self.max_concurrent_items {
            0 => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            n => n,
        }
    }
}

/// Hosted vision back-end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VisionProvider {
    /// OpenAI-compatible chat completions
    #[default]
    OpenAi,
    /// Google Gemini
    Gemini,
}

impl VisionProvider {
    /// Model used when the configuration names none.
    pub fn default_model(&self) -> &'static str {
        match self {
            VisionProvider::OpenAi => "gpt-4o-mini",
            VisionProvider::Gemini => "gemini-2.0-flash",
        }
    }
}

/// Describer and vision client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriberConfig {
    /// Back-end to call
    pub provider: VisionProvider,
    /// Model identifier; provider default when absent
    #[serde(default)]
    pub model: Option<String>,
    /// Resolution hint sent with each image
    pub detail: ImageDetail,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Outbound calls in flight at once
    pub max_concurrent: usize,
    /// Optional requests-per-minute cap
    #[serde(default)]
    pub requests_per_minute: Option<u32>,
    /// Retry attempts after a transient failure
    #[serde(default)]
    pub max_retries: Option<usize>,
    /// Initial retry backoff in milliseconds
    #[serde(default)]
    pub retry_backoff_ms: Option<u64>,
    /// Alternative API root
    #[serde(default)]
    pub base_url: Option<String>,
}

impl DescriberConfig {
    /// Configured model, or the provider default.
    pub fn model_name(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }
}

/// Bulk download settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Deflate level (0-9)
    pub compression_level: i64,
}

/// Complete Sfumato configuration.
///
/// # Example
///
/// ```no_run
/// use sfumato_pipeline::SfumatoConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SfumatoConfig::load()?;
/// println!("describer: {}", config.describer.provider);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SfumatoConfig {
    /// Batch execution
    pub pipeline: PipelineConfig,
    /// Describer
    pub describer: DescriberConfig,
    /// Bulk download
    pub archive: ArchiveConfig,
}

impl SfumatoConfig {
    /// The bundled defaults alone.
    #[instrument]
    pub fn bundled() -> Result<Self, ConfigError> {
        finish(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)))
    }

    /// Load with precedence: environment > current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None::<&Path>)
    }

    /// Like [`load`](Self::load), with `path` layered above the user files.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is given but missing, or any source fails to parse.
    #[instrument(skip(path))]
    pub fn load_from(path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        let builder = user_sources(path);
        finish(builder.add_source(environment()))
    }

    /// Like [`load_from`](Self::load_from), reading environment overrides from `env`
    /// instead of the process environment.
    #[instrument(skip(path, env))]
    pub fn load_with_env(
        path: Option<impl AsRef<Path>>,
        env: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let builder = user_sources(path);
        finish(builder.add_source(environment().source(Some(env))))
    }
}

fn user_sources(path: Option<impl AsRef<Path>>) -> ConfigBuilder<DefaultState> {
    debug!("Loading configuration with precedence: env > explicit > current dir > home dir > bundled");

    let mut builder =
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config/sfumato/sfumato.toml");
        builder = builder.add_source(File::from(home_config).required(false));
    }

    builder = builder.add_source(File::with_name("sfumato").required(false));

    if let Some(path) = path {
        builder = builder.add_source(File::from(path.as_ref()));
    }
    builder
}

fn environment() -> Environment {
    Environment::with_prefix("SFUMATO")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<SfumatoConfig, ConfigError> {
    builder
        .build()
        .map_err(|e| ConfigError::new(ConfigErrorKind::Build(e.to_string())))?
        .try_deserialize()
        .map_err(|e| ConfigError::new(ConfigErrorKind::Parse(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_defaults_parse() {
        let config = SfumatoConfig::bundled().unwrap();
        assert_eq!(config.pipeline.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.describer.provider, VisionProvider::OpenAi);
        assert_eq!(config.describer.detail, ImageDetail::Low);
        assert_eq!(config.describer.model_name(), "gpt-4o-mini");
        assert_eq!(config.archive.compression_level, 9);
    }

    #[test]
    fn zero_concurrency_means_available_parallelism() {
        let pipeline = PipelineConfig {
            max_concurrent_items: 0,
            max_upload_bytes: 1,
        };
        assert!(pipeline.concurrency() >= 1);

        let fixed = PipelineConfig {
            max_concurrent_items: 3,
            ..pipeline
        };
        assert_eq!(fixed.concurrency(), 3);
    }

    #[test]
    fn provider_default_models() {
        assert_eq!(VisionProvider::Gemini.default_model(), "gemini-2.0-flash");
        assert_eq!(VisionProvider::Gemini.to_string(), "gemini");
    }
}
