use std::fmt;
use std::str::FromStr;

use crate::error::EndpointError;

/// Схема базового адреса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// `http://`, порт по умолчанию 80
    Http,
    /// `https://`, порт по умолчанию 443
    Https,
}

impl Scheme {
    fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("http") {
            Some(Scheme::Http)
        } else if raw.eq_ignore_ascii_case("https") {
            Some(Scheme::Https)
        } else {
            None
        }
    }

    /// Имя схемы в URL
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// Порт, если в адресе его нет
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

/// Базовый адрес API вида `http(s)://host[:port][/prefix]`.
///
/// Пути маршрутов дописываются к `prefix`: для
/// `https://api.example.com/prod` маршрут `/quotes` превращается в
/// `https://api.example.com/prod/quotes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase {
    scheme: Scheme,
    host: String,
    port: u16,
    prefix: String,
}

impl ApiBase {
    /// Схема
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Хост без порта (для IPv6 без скобок)
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Порт (по умолчанию для схемы, если не указан)
    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host[:port]`; порт по умолчанию опускается
    pub fn authority(&self) -> String {
        let host = if self.host.contains(':') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };

        if self.port == self.scheme.default_port() {
            host
        } else {
            format!("{host}:{}", self.port)
        }
    }

    /// Абсолютный URL маршрута
    pub fn url(&self, route: &str) -> String {
        format!("{self}{route}")
    }
}

impl fmt::Display for ApiBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}{}",
            self.scheme.as_str(),
            self.authority(),
            self.prefix
        )
    }
}

impl FromStr for ApiBase {
    type Err = EndpointError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(EndpointError::Empty);
        }

        let (scheme, rest) = raw
            .split_once("://")
            .ok_or_else(|| EndpointError::MissingScheme(raw.to_string()))?;

        let scheme = Scheme::parse(scheme)
            .ok_or_else(|| EndpointError::UnsupportedScheme(scheme.to_string()))?;

        // http://host:port/prod/ -> ("host:port", "/prod")
        let (authority, path) = match rest.find('/') {
            Some(i) => rest.split_at(i),
            None => (rest, ""),
        };
        let prefix = path.trim_end_matches('/').to_string();

        let (host, port) = split_host_port(authority, scheme.default_port())?;
        if host.is_empty() {
            return Err(EndpointError::MissingHost);
        }

        Ok(Self {
            scheme,
            host: host.to_string(),
            port,
            prefix,
        })
    }
}

fn split_host_port(authority: &str, default_port: u16) -> Result<(&str, u16), EndpointError> {
    // [::1]:8080
    if let Some(rest) = authority.strip_prefix('[') {
        let (host, tail) = rest.split_once(']').ok_or(EndpointError::MissingHost)?;
        return match tail.strip_prefix(':') {
            Some(p) => Ok((host, parse_port(p)?)),
            None if tail.is_empty() => Ok((host, default_port)),
            None => Err(EndpointError::InvalidPort(tail.to_string())),
        };
    }

    match authority.rsplit_once(':') {
        Some((host, p)) => Ok((host, parse_port(p)?)),
        None => Ok((authority, default_port)),
    }
}

fn parse_port(raw: &str) -> Result<u16, EndpointError> {
    raw.parse::<u16>()
        .ok()
        .filter(|p| *p != 0)
        .ok_or_else(|| EndpointError::InvalidPort(raw.to_string()))
}
