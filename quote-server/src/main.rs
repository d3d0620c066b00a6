//! Точка входа `quote-server`.
//!
//! Жизненный цикл:
//! - парсинг CLI и загрузка стартовых цитат (файл или встроенный набор)
//! - HTTP-сервер на `actix-web`: маршруты `/quotes`, CORS на каждом ответе
//! - корректная остановка по `Ctrl+C`: actix перестаёт принимать соединения
//!   и даёт текущим запросам до `SHUTDOWN_TIMEOUT_S` секунд

mod cli;
mod config;
mod routes;
mod store;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use clap::Parser;
use log::info;

use crate::store::QuoteStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG=info/debug
    env_logger::init();

    let args = cli::Args::parse();

    let seed = config::load_seed_quotes(args.seed_file.as_deref())
        .context("failed to load seed quotes")?;
    let store = web::Data::new(QuoteStore::with_quotes(seed));
    info!("quote-server: loaded {} quotes", store.len());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(web::PayloadConfig::new(config::MAX_BODY_BYTES))
            .wrap(routes::cors_headers())
            .wrap(Logger::default())
            .configure(routes::configure)
            .default_service(web::to(routes::fallback))
    })
    .client_request_timeout(config::CLIENT_REQUEST_TIMEOUT)
    .shutdown_timeout(config::SHUTDOWN_TIMEOUT_S)
    .bind(args.bind)
    .with_context(|| format!("bind HTTP listener {}", args.bind))?;

    info!("quote-server: listening on http://{}", args.bind);
    server.run().await.context("http server failed")?;
    info!("quote-server: stopped");

    Ok(())
}
