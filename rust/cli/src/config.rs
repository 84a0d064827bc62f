use holdem_engine::game::TableConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::io_utils::read_text;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    /// Seats at the table, all of them filled
    pub players: usize,
    pub small_blind: u32,
    pub big_blind: u32,
    pub starting_stack: u32,
    /// Agent kind for automated seats
    pub ai: String,
}

impl Default for Config {
    fn default() -> Self {
        let table = TableConfig::default();
        Self {
            seed: None,
            players: table.max_players,
            small_blind: table.small_blind,
            big_blind: table.big_blind,
            starting_stack: table.starting_stack,
            ai: "baseline".into(),
        }
    }
}

impl Config {
    pub fn table(&self) -> TableConfig {
        TableConfig {
            max_players: self.players,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            starting_stack: self.starting_stack,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Flag,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub players: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub starting_stack: ValueSource,
    pub ai: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            players: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            starting_stack: ValueSource::Default,
            ai: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

/// Values given on the command line; they win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub players: Option<usize>,
    pub small_blind: Option<u32>,
    pub big_blind: Option<u32>,
    pub starting_stack: Option<u32>,
    pub ai: Option<String>,
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
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

/// Resolve the configuration: defaults, then the TOML file named by
/// `HOLDEM_CONFIG`, then `HOLDEM_*` variables, then `flags`.
pub fn load_with_sources(flags: &Overrides) -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("HOLDEM_CONFIG")
        && !path.is_empty()
    {
        let s = read_text(Path::new(&path))?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.ai {
            cfg.ai = v;
            sources.ai = ValueSource::File;
        }
    }

    if let Some(v) = env_number("HOLDEM_SEED")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_number("HOLDEM_PLAYERS")? {
        cfg.players = v;
        sources.players = ValueSource::Env;
    }
    if let Some(v) = env_number("HOLDEM_SMALL_BLIND")? {
        cfg.small_blind = v;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(v) = env_number("HOLDEM_BIG_BLIND")? {
        cfg.big_blind = v;
        sources.big_blind = ValueSource::Env;
    }
    if let Some(v) = env_number("HOLDEM_STACK")? {
        cfg.starting_stack = v;
        sources.starting_stack = ValueSource::Env;
    }
    if let Ok(ai) = std::env::var("HOLDEM_AI")
        && !ai.is_empty()
    {
        cfg.ai = ai;
        sources.ai = ValueSource::Env;
    }

    if let Some(v) = flags.seed {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Flag;
    }
    if let Some(v) = flags.players {
        cfg.players = v;
        sources.players = ValueSource::Flag;
    }
    if let Some(v) = flags.small_blind {
        cfg.small_blind = v;
        sources.small_blind = ValueSource::Flag;
    }
    if let Some(v) = flags.big_blind {
        cfg.big_blind = v;
        sources.big_blind = ValueSource::Flag;
    }
    if let Some(v) = flags.starting_stack {
        cfg.starting_stack = v;
        sources.starting_stack = ValueSource::Flag;
    }
    if let Some(v) = &flags.ai {
        cfg.ai = v.clone();
        sources.ai = ValueSource::Flag;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    ai: Option<String>,
}

fn env_number<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: '{}'", key, v))),
        _ => Ok(None),
    }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.table()
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))?;
    if !holdem_ai::AVAILABLE.contains(&cfg.ai.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: unknown ai '{}'",
            cfg.ai
        )));
    }
    Ok(())
}
