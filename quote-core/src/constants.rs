use std::time::Duration;

/// сколько висит статусное сообщение, прежде чем исчезнуть
pub const STATUS_DISPLAY_TIME: Duration = Duration::from_secs(3);

/// Единственный маршрут API
pub const QUOTES_PATH: &str = "/quotes";

/// Заглушка вместо адреса API, если при сборке `QUOTE_API_BASE` не задан
pub const UNCONFIGURED_API_BASE: &str = "YOUR_API_BASE_URL_HERE";

/// Текст вместо цитаты при любой ошибке чтения
pub const FETCH_FAILED_MSG: &str = "Could not fetch a quote. Is the backend deployed?";

/// Текст вместо цитаты, если адрес API не настроен
pub const UNCONFIGURED_MSG: &str = "Please configure the API base URL (--api-base).";

/// Локальная ошибка валидации формы
pub const FIELDS_REQUIRED_MSG: &str = "Both fields are required.";

/// Успешное добавление
pub const QUOTE_ADDED_MSG: &str = "Quote added successfully!";

/// Общий текст ошибки, если сервер не прислал `{"error": ...}`
pub const ADD_FAILED_MSG: &str = "Failed to add quote";
