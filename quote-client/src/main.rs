//! Точка входа `quote-client`.
//!
//! Жизненный цикл:
//! - парсинг CLI и выбор API по `--api-base` (или адресу, зашитому при сборке)
//! - `random`: одна цитата, две строки на stdout
//! - `add`: валидация + POST, статус на stdout, код выхода 1 при ошибке
//! - `board`: интерактивная доска с рабочими потоками и таймером статуса
//! - корректная остановка доски по `Ctrl+C`

mod api;
mod board;
mod cli;
mod page;

use std::sync::{Arc, atomic::AtomicBool, atomic::Ordering};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::info;

use crate::cli::{Args, Command};
use crate::page::Page;

fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG=info/debug
    env_logger::init();

    let args = Args::parse();

    let api = api::connect(&args.api_base)
        .with_context(|| format!("invalid --api-base: {}", args.api_base))?;

    info!("quote-client: api_base={}", args.api_base);

    match args.command {
        Command::Random => {
            let mut page = Page::new();
            page.fetch_random_quote(api.as_ref());
            println!("{}", page.quote_text);
            println!("{}", page.quote_author);
        }
        Command::Add { text, author } => {
            let mut page = Page::new();
            page.text_input = text;
            page.author_input = author;
            page.handle_add_quote(api.as_ref(), Instant::now());

            if let Some(status) = page.status() {
                println!("{}", status.message);
                if status.is_error() {
                    std::process::exit(1);
                }
            }
        }
        Command::Board => {
            let shutdown = Arc::new(AtomicBool::new(false));

            // Ctrl+C => ставим shutdown=true
            {
                let shutdown = shutdown.clone();
                ctrlc::set_handler(move || {
                    shutdown.store(true, Ordering::Relaxed);
                    info!("shutting down...");
                })?;
            }

            board::run_board(api, shutdown)?;
        }
    }

    Ok(())
}
