use clap::{Parser, Subcommand};
use quote_core::UNCONFIGURED_API_BASE;

/// Адрес API, зашитый при сборке: `QUOTE_API_BASE=https://... cargo build`
pub(crate) const DEFAULT_API_BASE: &str = match option_env!("QUOTE_API_BASE") {
    Some(base) => base,
    None => UNCONFIGURED_API_BASE,
};

/// Quote Client - случайная цитата и добавление новых через HTTP API.
#[derive(Parser, Debug, Clone)]
#[command(name = "quote-client", version, about)]
pub(crate) struct Args {
    /// Базовый адрес API, например http://127.0.0.1:8080 или https://host/prod
    #[arg(long, global = true, default_value = DEFAULT_API_BASE)]
    pub(crate) api_base: String,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Command {
    /// Показать случайную цитату
    Random,

    /// Добавить цитату (оба поля обязательны, пробелы по краям отрезаются)
    Add {
        /// Текст цитаты
        #[arg(long, default_value = "")]
        text: String,

        /// Автор
        #[arg(long, default_value = "")]
        author: String,
    },

    /// Интерактивная доска: n - новая цитата, a <текст> | <автор> - добавить, q - выход
    Board,
}
