use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use saa_engine::cards::{MAX_RANKS, MIN_RANKS, Ranks};
use saa_engine::errors::RanksError;
use saa_engine::persistence::DEFAULT_SAVE_FILE;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub ranks: u8,
    pub seed: Option<u64>,
    pub save_file: PathBuf,
    pub history_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub ranks: ValueSource,
    pub seed: ValueSource,
    pub save_file: ValueSource,
    pub history_file: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            ranks: ValueSource::Default,
            seed: ValueSource::Default,
            save_file: ValueSource::Default,
            history_file: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl ConfigResolved {
    /// A rank count given on the command line beats every other source.
    pub fn apply_cli_ranks(&mut self, ranks: Option<u8>) {
        if let Some(r) = ranks {
            self.config.ranks = r;
            self.sources.ranks = ValueSource::Cli;
        }
    }

    pub fn ranks(&self) -> Result<Ranks, RanksError> {
        Ranks::new(self.config.ranks)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ranks: MAX_RANKS,
            seed: None,
            save_file: PathBuf::from(DEFAULT_SAVE_FILE),
            history_file: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

/// Resolves the configuration from defaults, the file named by `SAA_CONFIG`,
/// then the `SAA_*` environment variables, recording where each value came from.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("SAA_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.ranks {
            cfg.ranks = v;
            sources.ranks = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.save_file {
            cfg.save_file = v;
            sources.save_file = ValueSource::File;
        }
        if let Some(v) = f.history_file {
            cfg.history_file = Some(v);
            sources.history_file = ValueSource::File;
        }
    }

    if let Ok(ranks) = std::env::var("SAA_RANKS")
        && !ranks.is_empty()
    {
        cfg.ranks = ranks
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid ranks".into()))?;
        sources.ranks = ValueSource::Env;
    }
    if let Ok(seed) = std::env::var("SAA_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(path) = std::env::var("SAA_SAVE_FILE")
        && !path.is_empty()
    {
        cfg.save_file = PathBuf::from(path);
        sources.save_file = ValueSource::Env;
    }
    if let Ok(path) = std::env::var("SAA_HISTORY")
        && !path.is_empty()
    {
        cfg.history_file = Some(PathBuf::from(path));
        sources.history_file = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    ranks: Option<u8>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    save_file: Option<PathBuf>,
    #[serde(default)]
    history_file: Option<PathBuf>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(MIN_RANKS..=MAX_RANKS).contains(&cfg.ranks) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: ranks must be between {} and {}",
            MIN_RANKS, MAX_RANKS
        )));
    }
    if cfg.save_file.as_os_str().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: save_file must not be empty".into(),
        ));
    }
    Ok(())
}
