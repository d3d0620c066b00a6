//! # quote-core
//!
//! Базовые типы и протокол для Quote Server / Quote Client.
//!
//! Этот крейт содержит:
//!
//! - [`types`] — доменные типы (цитата, статусное сообщение, тело ошибки)
//! - [`endpoint`] — разбор базового адреса API (`http(s)://host:port/prefix`)
//! - [`error`] — типы ошибок, которые возвращают компоненты `quote-core`
//!
//! ## Быстрый пример: цитата из полей формы
//!
//! ```rust
//! use quote_core::{Quote, ValidationError};
//!
//! let q = Quote::from_form("  Less is more. ", " Mies ").unwrap();
//! assert_eq!(q.display_text(), "\"Less is more.\"");
//! assert_eq!(q.display_author(), "- Mies");
//!
//! assert_eq!(Quote::from_form("text", "  "), Err(ValidationError::MissingFields));
//! ```
//!
//! ## Пример: адрес API
//!
//! ```rust
//! use quote_core::ApiBase;
//!
//! let base: ApiBase = "https://api.example.com/prod".parse().unwrap();
//! assert_eq!(
//!     base.url(quote_core::QUOTES_PATH),
//!     "https://api.example.com/prod/quotes"
//! );
//! assert_eq!(base.port(), 443);
//! ```
//!
//! ## Дизайн
//!
//! `quote-core` задуман как “нулевая” зависимость для всех частей системы:
//! сервер, клиент, тесты. Поэтому здесь держим только чистые типы,
//! парсинг/сериализацию и простую утилитарщину, без потоков и без сокетов.
//! HTTP живёт в бинарниках: `reqwest` в клиенте, `actix-web` в сервере.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Доменные типы
pub mod types;

/// Базовый адрес API
pub mod endpoint;

/// Ошибки `quote-core`.
pub mod error;

/// Общие константы
mod constants;
pub use constants::{
    ADD_FAILED_MSG, FETCH_FAILED_MSG, FIELDS_REQUIRED_MSG, QUOTE_ADDED_MSG, QUOTES_PATH,
    STATUS_DISPLAY_TIME, UNCONFIGURED_API_BASE, UNCONFIGURED_MSG,
};

// --- Re-exports (публичный фасад API) ---

pub use crate::endpoint::{ApiBase, Scheme};
pub use crate::error::{EndpointError, ValidationError};
pub use crate::types::{ErrorBody, Quote, StatusKind, StatusMessage, StoredQuote};
