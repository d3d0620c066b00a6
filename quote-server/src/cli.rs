use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::config;

/// Quote Server - HTTP API цитат: GET /quotes отдаёт случайную, POST /quotes добавляет.
#[derive(Parser, Debug, Clone)]
#[command(name = "quote-server", version, about)]
pub(crate) struct Args {
    /// HTTP bind address, например 0.0.0.0:8080
    #[arg(long, default_value = config::HTTP_BIND_ADDR)]
    pub(crate) bind: SocketAddr,

    /// JSON-файл со стартовыми цитатами: [{"text": "...", "author": "..."}, ...]
    /// Без него берётся встроенный набор
    #[arg(long)]
    pub(crate) seed_file: Option<PathBuf>,
}
