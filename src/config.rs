use std::{env, path::PathBuf};

/// Settings read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub animate: bool,
    pub coin_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);
        let data_dir = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data"));
        let animate = lookup("FLIP_ANIMATION")
            .map(|value| !is_off(&value))
            .unwrap_or(true);
        let coin_seed = lookup("COIN_SEED").and_then(|value| value.trim().parse::<u64>().ok());

        Self {
            port,
            data_dir,
            animate,
            coin_seed,
        }
    }
}

fn is_off(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}
