//! Модель страницы: две области цитаты, форма из двух полей и статусная строка.
//!
//! Сетевые вызовы идут через [`QuoteApi`]; сама страница только применяет
//! результаты. Так `board` может гонять запросы в рабочих потоках, а
//! одноразовые команды зовут обработчики синхронно.

use std::time::Instant;

use log::{error, info};
use quote_core::{
    FETCH_FAILED_MSG, QUOTE_ADDED_MSG, Quote, STATUS_DISPLAY_TIME, StatusMessage, UNCONFIGURED_MSG,
};

use crate::api::{ApiError, QuoteApi};

/// Номер запроса цитаты; побеждает последний выданный
pub(crate) type FetchSeq = u64;

#[derive(Debug)]
struct ShownStatus {
    msg: StatusMessage,
    expires_at: Instant,
}

#[derive(Debug, Default)]
pub(crate) struct Page {
    pub(crate) quote_text: String,
    pub(crate) quote_author: String,
    pub(crate) text_input: String,
    pub(crate) author_input: String,
    status: Option<ShownStatus>,
    last_fetch: FetchSeq,
}

impl Page {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Выдаёт номер для нового запроса цитаты. Ответы на более ранние запросы
    /// после этого игнорируются.
    pub(crate) fn begin_fetch(&mut self) -> FetchSeq {
        self.last_fetch += 1;
        self.last_fetch
    }

    /// Применяет ответ на запрос `seq`. `false` — ответ устарел и отброшен.
    pub(crate) fn apply_fetch(&mut self, seq: FetchSeq, result: Result<Quote, ApiError>) -> bool {
        if seq != self.last_fetch {
            info!("dropping stale quote response #{seq} (latest #{})", self.last_fetch);
            return false;
        }

        match result {
            Ok(q) => {
                self.quote_text = q.display_text();
                self.quote_author = q.display_author();
            }
            Err(ApiError::Unconfigured) => {
                self.quote_text = UNCONFIGURED_MSG.to_string();
                self.quote_author.clear();
            }
            Err(e) => {
                error!("Failed to fetch quote: {e}");
                self.quote_text = FETCH_FAILED_MSG.to_string();
                self.quote_author.clear();
            }
        }
        true
    }

    /// Quote Fetcher: запрос + отрисовка в одном вызове
    pub(crate) fn fetch_random_quote(&mut self, api: &dyn QuoteApi) {
        let seq = self.begin_fetch();
        let result = api.random_quote();
        self.apply_fetch(seq, result);
    }

    /// Валидация формы. `None` — поля пустые, статус уже показан, в сеть не идём.
    pub(crate) fn begin_submit(&mut self, now: Instant) -> Option<Quote> {
        match Quote::from_form(&self.text_input, &self.author_input) {
            Ok(q) => Some(q),
            Err(e) => {
                self.show_status(StatusMessage::error(e.to_string()), now);
                None
            }
        }
    }

    /// Применяет результат POST
    pub(crate) fn apply_submit(&mut self, result: Result<(), ApiError>, now: Instant) {
        match result {
            Ok(()) => {
                self.show_status(StatusMessage::success(QUOTE_ADDED_MSG), now);
                self.text_input.clear();
                self.author_input.clear();
            }
            Err(e) => {
                error!("Error adding quote: {e}");
                self.show_status(StatusMessage::error(e.user_message()), now);
            }
        }
    }

    /// Quote Submitter: валидация, запрос, статус
    pub(crate) fn handle_add_quote(&mut self, api: &dyn QuoteApi, now: Instant) {
        let Some(quote) = self.begin_submit(now) else {
            return;
        };
        let result = api.add_quote(&quote);
        self.apply_submit(result, now);
    }

    /// Заменяет текущий статус; окно показа отсчитывается заново
    pub(crate) fn show_status(&mut self, msg: StatusMessage, now: Instant) {
        self.status = Some(ShownStatus {
            msg,
            expires_at: now + STATUS_DISPLAY_TIME,
        });
    }

    pub(crate) fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref().map(|s| &s.msg)
    }

    /// Гасит статус, если его окно истекло. `true` — что-то изменилось.
    pub(crate) fn tick(&mut self, now: Instant) -> bool {
        let expired = self
            .status
            .as_ref()
            .is_some_and(|s| now >= s.expires_at);
        if expired {
            self.status = None;
        }
        expired
    }

    pub(crate) fn render(&self) -> String {
        let rule = "-".repeat(48);
        // пустая строка, когда статуса нет: высота экрана не прыгает
        let status = self.status().map(ToString::to_string).unwrap_or_default();

        format!(
            "{rule}\n{}\n{}\n\n{status}\n{rule}\n",
            self.quote_text, self.quote_author
        )
    }
}
