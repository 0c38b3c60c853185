use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub threads: usize,
    pub iterations: u64,
    pub seed: Option<u64>,
    pub multipliers: [u32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub threads: ValueSource,
    pub iterations: ValueSource,
    pub seed: ValueSource,
    pub multipliers: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            threads: ValueSource::Default,
            iterations: ValueSource::Default,
            seed: ValueSource::Default,
            multipliers: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

/// Trials per run when nothing else is configured.
pub const DEFAULT_ITERATIONS: u64 = 2_500_000;

impl Default for Config {
    fn default() -> Self {
        let multipliers = cardsim_engine::Multipliers::default();
        Self {
            threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            multipliers: [multipliers.a(), multipliers.b()],
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
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_with_sources_from(|key| std::env::var(key).ok())
}

/// Resolve defaults, then the TOML file named by `CARDSIM_CONFIG`, then
/// `CARDSIM_*` variables, reading variables through `env`.
pub fn load_with_sources_from<F>(env: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = env("CARDSIM_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.threads {
            cfg.threads = v;
            sources.threads = ValueSource::File;
        }
        if let Some(v) = f.iterations {
            cfg.iterations = v;
            sources.iterations = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.multipliers {
            cfg.multipliers = v;
            sources.multipliers = ValueSource::File;
        }
    }

    if let Some(threads) = env("CARDSIM_THREADS")
        && !threads.is_empty()
    {
        cfg.threads = threads
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid threads".into()))?;
        sources.threads = ValueSource::Env;
    }
    if let Some(iterations) = env("CARDSIM_ITERATIONS")
        && !iterations.is_empty()
    {
        cfg.iterations = iterations
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid iterations".into()))?;
        sources.iterations = ValueSource::Env;
    }
    if let Some(seed) = env("CARDSIM_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
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
    threads: Option<usize>,
    #[serde(default)]
    iterations: Option<u64>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    multipliers: Option<[u32; 2]>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.threads == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: threads must be >=1".into(),
        ));
    }
    if cfg.iterations == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: iterations must be >0".into(),
        ));
    }
    let [a, b] = cfg.multipliers;
    cardsim_engine::Multipliers::new(a, b)
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))?;
    Ok(())
}
