use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use tracing::warn;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TICK_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub enum Source {
    Url(String),
    Path(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub route: Option<Source>,
    pub status_url: Option<String>,
    pub port: u16,
    pub tick: Duration,
}

impl Settings {
    /// A path given as the first argument takes precedence over `WAYMARK_ROUTE_URL`.
    pub fn from_env() -> Self {
        let route = env::args()
            .nth(1)
            .map(|path| Source::Path(path.into()))
            .or_else(|| var("WAYMARK_ROUTE_URL").map(Source::Url));
        Self {
            route,
            status_url: var("WAYMARK_STATUS_URL"),
            port: parsed("WAYMARK_PORT", DEFAULT_PORT),
            tick: Duration::from_millis(parsed("WAYMARK_TICK_MS", DEFAULT_TICK_MS).max(1)),
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parsed<T: FromStr + Display>(key: &str, default: T) -> T {
    match var(key).map(|value| value.parse::<T>()) {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            warn!("Invalid {key}, using {default}");
            default
        }
        None => default,
    }
}
