use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Цитата в том виде, в каком её видит клиент
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Текст цитаты
    pub text: String,
    /// Автор
    pub author: String,
}

impl Quote {
    /// Собирает цитату из полей формы: trim обоих полей, оба обязательны.
    pub fn from_form(text: &str, author: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        let author = author.trim();

        if text.is_empty() || author.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        Ok(Self {
            text: text.to_string(),
            author: author.to_string(),
        })
    }

    /// Строка для области текста: `"text"`
    pub fn display_text(&self) -> String {
        format!("\"{}\"", self.text)
    }

    /// Строка для области автора: `- author`
    pub fn display_author(&self) -> String {
        format!("- {}", self.author)
    }
}

/// Цитата в хранилище сервера
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredQuote {
    /// UUID v4 в строковом виде
    pub quote_id: String,
    /// Текст цитаты
    pub text: String,
    /// Автор
    pub author: String,
}

/// JSON-тело ошибки: `{"error": "..."}`, поле необязательное
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Человекочитаемая причина
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Тело с заданным текстом ошибки
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            error: Some(msg.into()),
        }
    }
}

/// Класс статусного сообщения
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Успех
    Success,
    /// Ошибка
    Error,
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusKind::Success => f.write_str("success"),
            StatusKind::Error => f.write_str("error"),
        }
    }
}

/// Короткоживущее сообщение в статусной области
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Текст
    pub message: String,
    /// Класс
    pub kind: StatusKind,
}

impl StatusMessage {
    /// Успешный статус
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Success,
        }
    }

    /// Статус-ошибка
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Error,
        }
    }

    /// `true` для [`StatusKind::Error`]
    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}
