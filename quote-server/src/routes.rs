use actix_web::http::{Method, StatusCode};
use actix_web::middleware::DefaultHeaders;
use actix_web::{HttpRequest, HttpResponse, web};
use log::{error, info};
use quote_core::{ErrorBody, QUOTES_PATH};
use serde::Deserialize;
use serde_json::error::Category;

use crate::store::QuoteStore;

const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Access-Control-Allow-Methods", "OPTIONS,POST,GET"),
];

const NO_QUOTES_MSG: &str = "No quotes found in the database.";
const MISSING_FIELDS_MSG: &str = "Missing 'text' or 'author' field";
const NOT_FOUND_MSG: &str = "Not Found";
const INTERNAL_ERROR_MSG: &str = "Internal Server Error";

/// Тело POST: поля необязательны, отсутствие проверяем сами
#[derive(Debug, Deserialize)]
struct NewQuoteBody {
    text: Option<String>,
    author: Option<String>,
}

/// Почему POST не дошёл до хранилища
#[derive(Debug, PartialEq)]
enum RouteError {
    /// Ответ клиенту с кодом и сообщением
    Client(StatusCode, &'static str),
    /// Внутренняя ошибка: 500, подробности только в лог
    Internal(String),
}

/// CORS-заголовки на любой ответ, включая ошибки и preflight
pub(crate) fn cors_headers() -> DefaultHeaders {
    CORS_HEADERS
        .into_iter()
        .fold(DefaultHeaders::new(), |headers, pair| headers.add(pair))
}

/// Маршруты `/quotes`. Всё, что не совпало, уходит в [`fallback`].
pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(QUOTES_PATH)
            .route(web::get().to(get_random_quote))
            .route(web::post().to(add_quote))
            .default_service(web::to(fallback)),
    );
}

/// OPTIONS на любой путь => 200 без тела, остальное => 404
pub(crate) async fn fallback(req: HttpRequest) -> HttpResponse {
    if req.method() == Method::OPTIONS {
        return HttpResponse::Ok().finish();
    }
    info!("no route for {} {}", req.method(), req.path());
    error_response(StatusCode::NOT_FOUND, NOT_FOUND_MSG)
}

async fn get_random_quote(store: web::Data<QuoteStore>) -> HttpResponse {
    match store.random() {
        Some(q) => HttpResponse::Ok().json(q),
        None => error_response(StatusCode::NOT_FOUND, NO_QUOTES_MSG),
    }
}

async fn add_quote(body: web::Bytes, store: web::Data<QuoteStore>) -> HttpResponse {
    match parse_new_quote(&body) {
        Ok((text, author)) => {
            let stored = store.add(text, author);
            info!("stored quote {}", stored.quote_id);
            HttpResponse::Created().json(stored)
        }
        Err(RouteError::Client(status, msg)) => error_response(status, msg),
        Err(RouteError::Internal(detail)) => {
            error!("Error processing request: {detail}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MSG)
        }
    }
}

/// Разбор тела POST: `(text, author)`, оба непустые
fn parse_new_quote(body: &[u8]) -> Result<(String, String), RouteError> {
    let missing = RouteError::Client(StatusCode::BAD_REQUEST, MISSING_FIELDS_MSG);

    let parsed: NewQuoteBody = match serde_json::from_slice(body) {
        Ok(b) => b,
        // валидный JSON не той формы => как отсутствующие поля
        Err(e) if e.classify() == Category::Data => return Err(missing),
        Err(e) => return Err(RouteError::Internal(format!("bad request body: {e}"))),
    };

    match (parsed.text, parsed.author) {
        (Some(text), Some(author)) if !text.is_empty() && !author.is_empty() => Ok((text, author)),
        _ => Err(missing),
    }
}

fn error_response(status: StatusCode, msg: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody::new(msg))
}
