/// Decoder configuration
///
/// Settings are read from environment variables (a `.env` file is honored)
/// or from a JSON file; unset fields take their defaults.

use serde::Deserialize;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub decoder: DecoderConfig,
    pub logging: LoggingConfig,
    pub batch: BatchConfig,
}

/// Row decoding policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Skip partitioned vertices (and edges to them) instead of failing
    pub filter_partitioned_vertices: bool,

    /// Discard rows without a vertex-exists marker
    pub verify_vertex_existence: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            filter_partitioned_vertices: true,
            verify_vertex_existence: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Batch decoding options
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Worker threads for parallel decoding
    pub threads: usize,
    /// Rows handed to the worker pool at a time
    pub chunk_size: usize,
    /// Record failed rows and keep going instead of aborting
    pub skip_errors: bool,
    /// Progress log interval (rows)
    pub progress_interval: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            chunk_size: 1000,
            skip_errors: false,
            progress_interval: 10000,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        let config = Self {
            decoder: DecoderConfig {
                filter_partitioned_vertices: env_or(
                    "DECODER_FILTER_PARTITIONED",
                    defaults.decoder.filter_partitioned_vertices,
                )?,
                verify_vertex_existence: env_or(
                    "DECODER_VERIFY_EXISTENCE",
                    defaults.decoder.verify_vertex_existence,
                )?,
            },
            logging: LoggingConfig {
                level: env::var("LOG_LEVEL").unwrap_or(defaults.logging.level),
                format: env::var("LOG_FORMAT").unwrap_or(defaults.logging.format),
            },
            batch: BatchConfig {
                threads: env_or("DECODER_THREADS", defaults.batch.threads)?,
                chunk_size: env_or("DECODER_CHUNK_SIZE", defaults.batch.chunk_size)?,
                skip_errors: env_or("DECODER_SKIP_ERRORS", defaults.batch.skip_errors)?,
                progress_interval: env_or(
                    "DECODER_PROGRESS_INTERVAL",
                    defaults.batch.progress_interval,
                )?,
            },
        };

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

fn env_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => Ok(raw.trim().parse()?),
        Err(_) => Ok(default),
    }
}
