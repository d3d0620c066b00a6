use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use quote_core::Quote;
use thiserror::Error;

const DEFAULT_QUOTES: &str = include_str!("../assets/quotes.json");

pub(crate) const HTTP_BIND_ADDR: &str = "0.0.0.0:8080";

/// сколько ждём заголовки запроса от клиента
pub(crate) const CLIENT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// сколько секунд после Ctrl+C даём текущим запросам
pub(crate) const SHUTDOWN_TIMEOUT_S: u64 = 5;

/// предел на тело POST
pub(crate) const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Error)]
pub(crate) enum SeedError {
    #[error("failed to read seed file: {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("seed file is not a JSON array of {{text, author}}: {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("built-in quotes are malformed")]
    BuiltIn(#[source] serde_json::Error),
}

/// Стартовый набор цитат: из файла или встроенный
pub(crate) fn load_seed_quotes(path: Option<&Path>) -> Result<Vec<Quote>, SeedError> {
    match path {
        Some(p) => {
            let raw = fs::read_to_string(p).map_err(|source| SeedError::Read {
                path: p.to_path_buf(),
                source,
            })?;
            serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
                path: p.to_path_buf(),
                source,
            })
        }
        None => serde_json::from_str(DEFAULT_QUOTES).map_err(SeedError::BuiltIn),
    }
}
