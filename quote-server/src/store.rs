use quote_core::{Quote, StoredQuote};
use rand::seq::IndexedRandom;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Хранилище цитат в памяти процесса
pub(crate) struct QuoteStore {
    quotes: Mutex<Vec<StoredQuote>>,
}

impl QuoteStore {
    pub(crate) fn new() -> Self {
        Self {
            quotes: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_quotes(seed: impl IntoIterator<Item = Quote>) -> Self {
        let store = Self::new();
        for q in seed {
            store.add(q.text, q.author);
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, Vec<StoredQuote>> {
        match self.quotes.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(), // продолжаем, несмотря на poison
        }
    }

    /// Сохраняет цитату под новым UUID и возвращает сохранённое
    pub(crate) fn add(&self, text: String, author: String) -> StoredQuote {
        let stored = StoredQuote {
            quote_id: Uuid::new_v4().to_string(),
            text,
            author,
        };

        self.lock().push(stored.clone());
        stored
    }

    /// Случайная цитата; `None`, если хранилище пусто
    pub(crate) fn random(&self) -> Option<StoredQuote> {
        let quotes = self.lock();
        quotes.choose(&mut rand::rng()).cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }
}
