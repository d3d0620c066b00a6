use std::sync::Arc;
use std::time::Duration;

use log::debug;
use quote_core::{
    ADD_FAILED_MSG, ApiBase, EndpointError, ErrorBody, QUOTES_PATH, Quote, UNCONFIGURED_API_BASE,
    UNCONFIGURED_MSG,
};
use reqwest::blocking::{Client, Response};
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub(crate) enum ApiError {
    /// Адрес API так и не настроили
    #[error("api base is not configured")]
    Unconfigured,

    /// Не дошли до сервера или не дождались ответа
    #[error("request failed")]
    Transport(#[from] reqwest::Error),

    /// Сервер ответил не-2xx; `message` — поле `error` из тела, если оно разобралось
    #[error("HTTP error! status: {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("malformed response body")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// Текст для статусной области при неудачной отправке
    pub(crate) fn user_message(&self) -> &str {
        match self {
            ApiError::Rejected {
                message: Some(m), ..
            } => m,
            ApiError::Unconfigured => UNCONFIGURED_MSG,
            _ => ADD_FAILED_MSG,
        }
    }
}

/// Почему не удалось собрать API из строки адреса
#[derive(Debug, Error)]
pub(crate) enum ConnectError {
    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    #[error("failed to build http client")]
    Client(#[source] reqwest::Error),
}

/// Граница с внешним API цитат
pub(crate) trait QuoteApi: Send + Sync {
    /// `GET {base}/quotes`
    fn random_quote(&self) -> Result<Quote, ApiError>;

    /// `POST {base}/quotes`
    fn add_quote(&self, quote: &Quote) -> Result<(), ApiError>;
}

/// Выбирает реализацию по строке адреса: заглушка -> [`Unconfigured`], иначе HTTP.
pub(crate) fn connect(raw_base: &str) -> Result<Arc<dyn QuoteApi>, ConnectError> {
    if raw_base.trim() == UNCONFIGURED_API_BASE {
        return Ok(Arc::new(Unconfigured));
    }
    let base: ApiBase = raw_base.parse()?;
    let api = HttpQuoteApi::new(base).map_err(ConnectError::Client)?;
    Ok(Arc::new(api))
}

/// API без адреса: ни одного сетевого вызова, всегда [`ApiError::Unconfigured`]
pub(crate) struct Unconfigured;

impl QuoteApi for Unconfigured {
    fn random_quote(&self) -> Result<Quote, ApiError> {
        Err(ApiError::Unconfigured)
    }

    fn add_quote(&self, _quote: &Quote) -> Result<(), ApiError> {
        Err(ApiError::Unconfigured)
    }
}

/// HTTP(S)-клиент на `reqwest::blocking`; один `Client` на всё время работы
pub(crate) struct HttpQuoteApi {
    base: ApiBase,
    client: Client,
}

impl HttpQuoteApi {
    pub(crate) fn new(base: ApiBase) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { base, client })
    }
}

impl QuoteApi for HttpQuoteApi {
    fn random_quote(&self) -> Result<Quote, ApiError> {
        let url = self.base.url(QUOTES_PATH);
        debug!("GET {url}");

        let resp = self.client.get(url.as_str()).send()?;
        debug!("-> {}", resp.status());

        if !resp.status().is_success() {
            return Err(rejected(resp));
        }

        resp.json().map_err(ApiError::Decode)
    }

    fn add_quote(&self, quote: &Quote) -> Result<(), ApiError> {
        let url = self.base.url(QUOTES_PATH);
        debug!("POST {url}");

        let resp = self.client.post(url.as_str()).json(quote).send()?;
        debug!("-> {}", resp.status());

        if !resp.status().is_success() {
            return Err(rejected(resp));
        }

        Ok(())
    }
}

fn rejected(resp: Response) -> ApiError {
    let status = resp.status().as_u16();
    let message = resp.json::<ErrorBody>().ok().and_then(|b| b.error);

    ApiError::Rejected { status, message }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    /// Запрос, как его увидел тестовый сервер
    pub(crate) struct Captured {
        pub(crate) method: String,
        pub(crate) path: String,
        pub(crate) headers: Vec<(String, String)>,
        pub(crate) body: Vec<u8>,
    }

    impl Captured {
        pub(crate) fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }
    }

    fn read_request(stream: &TcpStream) -> Captured {
        let mut reader = BufReader::new(stream);

        let mut start = String::new();
        reader.read_line(&mut start).unwrap();
        let mut parts = start.split_whitespace();
        let method = parts.next().unwrap().to_string();
        let path = parts.next().unwrap().to_string();

        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            let (k, v) = line.split_once(':').unwrap();
            headers.push((k.trim().to_string(), v.trim().to_string()));
        }

        let len = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .map(|(_, v)| v.parse::<usize>().unwrap())
            .unwrap_or(0);
        let mut body = vec![0; len];
        reader.read_exact(&mut body).unwrap();

        Captured {
            method,
            path,
            headers,
            body,
        }
    }

    /// Поднимает одноразовый HTTP-сервер на loopback: принимает один запрос,
    /// отвечает `raw_response` и возвращает разобранный запрос из join.
    pub(crate) fn one_shot_server(
        raw_response: &'static str,
    ) -> (ApiBase, thread::JoinHandle<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let h = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let req = read_request(&stream);
            (&stream).write_all(raw_response.as_bytes()).unwrap();
            req
        });

        let base = format!("http://{addr}/prod").parse().unwrap();
        (base, h)
    }

    /// Фейковый API: считает вызовы и отдаёт заранее заданные ответы
    pub(crate) struct FakeApi {
        pub(crate) quote: Mutex<Option<Result<Quote, ApiError>>>,
        pub(crate) add: Mutex<Option<Result<(), ApiError>>>,
        pub(crate) added: Mutex<Vec<Quote>>,
        pub(crate) calls: AtomicUsize,
    }

    impl FakeApi {
        pub(crate) fn new() -> Self {
            Self {
                quote: Mutex::new(None),
                add: Mutex::new(None),
                added: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn with_quote(self, r: Result<Quote, ApiError>) -> Self {
            *self.quote.lock().unwrap() = Some(r);
            self
        }

        pub(crate) fn with_add(self, r: Result<(), ApiError>) -> Self {
            *self.add.lock().unwrap() = Some(r);
            self
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl QuoteApi for FakeApi {
        fn random_quote(&self) -> Result<Quote, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.quote
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Err(ApiError::Rejected {
                    status: 500,
                    message: None,
                }))
        }

        fn add_quote(&self, quote: &Quote) -> Result<(), ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.added.lock().unwrap().push(quote.clone());
            self.add.lock().unwrap().take().unwrap_or(Ok(()))
        }
    }

    #[test]
    fn random_quote_parses_ok_response() {
        let (base, h) = one_shot_server(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 39\r\n\r\n{\"quoteId\":\"1\",\"text\":\"A\",\"author\":\"B\"}",
        );

        let api = HttpQuoteApi::new(base).unwrap();
        let q = api.random_quote().unwrap();
        assert_eq!(
            q,
            Quote {
                text: "A".to_string(),
                author: "B".to_string()
            }
        );

        let req = h.join().unwrap();
        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/prod/quotes");
        assert!(req.header("Host").is_some());
    }

    #[test]
    fn chunked_response_is_shown_as_quote() {
        // 0x19 = 25 байт JSON
        let (base, h) = one_shot_server(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nTransfer-Encoding: chunked\r\n\r\n19\r\n{\"text\":\"A\",\"author\":\"B\"}\r\n0\r\n\r\n",
        );

        let api = HttpQuoteApi::new(base).unwrap();
        let mut page = crate::page::Page::new();
        page.fetch_random_quote(&api);

        assert_eq!(page.quote_text, "\"A\"");
        assert_eq!(page.quote_author, "- B");
        h.join().unwrap();
    }

    #[test]
    fn random_quote_non_2xx_is_rejected() {
        let (base, h) = one_shot_server(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 16\r\n\r\n{\"error\":\"none\"}",
        );

        let err = HttpQuoteApi::new(base).unwrap().random_quote().unwrap_err();
        assert!(matches!(err, ApiError::Rejected { status: 404, .. }));
        h.join().unwrap();
    }

    #[test]
    fn random_quote_malformed_body_is_decode_error() {
        let (base, h) = one_shot_server("HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello");

        let err = HttpQuoteApi::new(base).unwrap().random_quote().unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        h.join().unwrap();
    }

    #[test]
    fn add_quote_posts_json_once() {
        let (base, h) = one_shot_server(
            "HTTP/1.1 201 Created\r\nContent-Length: 2\r\n\r\n{}",
        );

        let quote = Quote::from_form(" A ", " B ").unwrap();
        HttpQuoteApi::new(base).unwrap().add_quote(&quote).unwrap();

        let req = h.join().unwrap();
        assert_eq!(req.method, "POST");
        assert_eq!(req.header("content-type"), Some("application/json"));
        let sent: Quote = serde_json::from_slice(&req.body).unwrap();
        assert_eq!(sent, quote);
        assert_eq!(sent.text, "A");
    }

    #[test]
    fn add_quote_error_body_message_is_kept() {
        let (base, h) = one_shot_server(
            "HTTP/1.1 400 Bad Request\r\nContent-Length: 27\r\n\r\n{\"error\":\"Author required\"}",
        );

        let quote = Quote::from_form("A", "B").unwrap();
        let err = HttpQuoteApi::new(base).unwrap().add_quote(&quote).unwrap_err();
        assert_eq!(err.user_message(), "Author required");
        h.join().unwrap();
    }

    #[test]
    fn add_quote_unparsable_error_body_falls_back() {
        let (base, h) =
            one_shot_server("HTTP/1.1 502 Bad Gateway\r\nContent-Length: 7\r\n\r\noh no!!");

        let quote = Quote::from_form("A", "B").unwrap();
        let err = HttpQuoteApi::new(base).unwrap().add_quote(&quote).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Rejected {
                status: 502,
                message: None
            }
        ));
        assert_eq!(err.user_message(), ADD_FAILED_MSG);
        h.join().unwrap();
    }

    #[test]
    fn connect_error_when_nobody_listens() {
        // занимаем порт и сразу освобождаем => на нём никого
        let addr = {
            let l = TcpListener::bind("127.0.0.1:0").unwrap();
            l.local_addr().unwrap()
        };

        let api = HttpQuoteApi::new(format!("http://{addr}").parse().unwrap()).unwrap();
        let err = api.random_quote().unwrap_err();
        assert!(matches!(err, ApiError::Transport(ref e) if e.is_connect()));
        assert_eq!(err.user_message(), ADD_FAILED_MSG);
    }

    #[test]
    fn connect_picks_unconfigured_for_placeholder() {
        let api = connect(UNCONFIGURED_API_BASE).unwrap();
        assert!(matches!(api.random_quote(), Err(ApiError::Unconfigured)));

        assert!(connect("http://127.0.0.1:8080").is_ok());
        assert!(connect("https://kv5yope8cb.execute-api.us-east-1.amazonaws.com/prod").is_ok());
        assert!(matches!(
            connect("ftp://example.com"),
            Err(ConnectError::Endpoint(EndpointError::UnsupportedScheme(_)))
        ));
    }
}
