use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

const DEFAULT_DATA_FILE: &str = "data/essays.jsonl";
const DEFAULT_HTTP_BIND: &str = "127.0.0.1:8087";
const DEFAULT_HISTORY_LIMIT: usize = 50;
const DEFAULT_HISTORY_PREVIEW_CHARS: usize = 800;
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub data_file: PathBuf,
    pub http_bind_address: SocketAddr,
    pub history_limit: usize,
    pub history_preview_chars: usize,
    pub graceful_shutdown_timeout_secs: u64,
}

impl ServerConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            config,
            data_file: cli_data_file,
            http_bind: cli_http_bind,
            history_limit: cli_history_limit,
            history_preview_chars: cli_history_preview_chars,
            shutdown_timeout: cli_shutdown_timeout,
        } = args;

        let file_config = if let Some(path) = config.as_ref() {
            load_config_file(path)?
        } else {
            PartialConfig::default()
        };

        let PartialConfig {
            data_file: file_data_file,
            http_bind: file_http_bind,
            history_limit: file_history_limit,
            history_preview_chars: file_history_preview_chars,
            shutdown_timeout_secs: file_shutdown_timeout,
        } = file_config;

        let data_file = cli_data_file
            .or(file_data_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        let http_bind_address = cli_http_bind.or(file_http_bind).unwrap_or_else(|| {
            DEFAULT_HTTP_BIND
                .parse()
                .expect("default bind address valid")
        });

        let history_limit = cli_history_limit
            .or(file_history_limit)
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .max(1);

        let history_preview_chars = cli_history_preview_chars
            .or(file_history_preview_chars)
            .unwrap_or(DEFAULT_HISTORY_PREVIEW_CHARS)
            .max(1);

        let graceful_shutdown_timeout_secs = cli_shutdown_timeout
            .or(file_shutdown_timeout)
            .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS);

        Ok(Self {
            data_file,
            http_bind_address,
            history_limit,
            history_preview_chars,
            graceful_shutdown_timeout_secs,
        })
    }

    /// Fail-fast startup check: the data file's parent directory must be
    /// creatable and the file itself, if present, must be a regular file.
    pub fn validate(&self) -> Result<()> {
        if let Some(parent) = self.data_file.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create data directory {:?}", parent))?;
        }
        anyhow::ensure!(
            !self.data_file.exists() || self.data_file.is_file(),
            "data file {:?} exists but is not a regular file",
            self.data_file
        );
        Ok(())
    }
}

#[derive(Parser, Debug, Default, Clone)]
#[command(name = "essay-metrics", about = "Essay metrics HTTP service", version)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to a configuration file (YAML or JSON)",
        global = true
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "ESSAY_METRICS_DATA_FILE",
        value_name = "FILE",
        help = "Append-only JSON Lines file holding stored essays"
    )]
    pub data_file: Option<PathBuf>,

    #[arg(
        long,
        env = "ESSAY_METRICS_HTTP_BIND",
        value_name = "ADDR",
        help = "HTTP bind address"
    )]
    pub http_bind: Option<SocketAddr>,

    #[arg(
        long,
        env = "ESSAY_METRICS_HISTORY_LIMIT",
        value_name = "N",
        help = "Maximum number of essays returned by the history endpoint",
        value_parser = clap::value_parser!(usize)
    )]
    pub history_limit: Option<usize>,

    #[arg(
        long,
        env = "ESSAY_METRICS_HISTORY_PREVIEW_CHARS",
        value_name = "N",
        help = "Essay text longer than this is truncated in history responses",
        value_parser = clap::value_parser!(usize)
    )]
    pub history_preview_chars: Option<usize>,

    #[arg(
        long,
        env = "ESSAY_METRICS_SHUTDOWN_TIMEOUT",
        value_name = "SECS",
        help = "Graceful shutdown budget in seconds",
        value_parser = clap::value_parser!(u64)
    )]
    pub shutdown_timeout: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    data_file: Option<PathBuf>,
    http_bind: Option<SocketAddr>,
    history_limit: Option<usize>,
    history_preview_chars: Option<usize>,
    shutdown_timeout_secs: Option<u64>,
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("config file {:?} does not exist", path);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML config {:?}", path))?,
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON config {:?}", path))?,
        other => anyhow::bail!("unsupported config extension: {other}"),
    };
    Ok(parsed)
}
