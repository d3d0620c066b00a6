use thiserror::Error;

use crate::constants::FIELDS_REQUIRED_MSG;

/// Ошибки валидации формы (до любого сетевого вызова)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Текст или автор пусты после trim
    #[error("{}", FIELDS_REQUIRED_MSG)]
    MissingFields,
}

/// Ошибки разбора базового адреса API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    /// Пустая строка
    #[error("api base is empty")]
    Empty,

    /// Нет `scheme://`
    #[error("api base must start with http:// or https:// (got: {0})")]
    MissingScheme(String),

    /// Схема, которую мы не умеем (например ftp)
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    /// Пустой хост
    #[error("api base has no host")]
    MissingHost,

    /// Порт не число / вне диапазона
    #[error("invalid port: {0}")]
    InvalidPort(String),
}
