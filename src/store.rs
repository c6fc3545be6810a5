// Lookup collaborator for the retrieval endpoint
//
// Handlers only ever see `dyn CashCardStore`; the server picks the backing
// implementation (in-memory here, SQLite in db.rs).

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::cashcard::CashCard;
use crate::error::{CashCardError, Result};

pub trait CashCardStore: Send + Sync {
    /// `Ok(None)` when no record carries `id`
    fn find(&self, id: i64) -> Result<Option<CashCard>>;
}

/// HashMap-backed store, used for the demo server and in tests
#[derive(Debug, Default)]
pub struct InMemoryStore {
    cards: RwLock<HashMap<i64, CashCard>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards<I>(cards: I) -> Self
    where
        I: IntoIterator<Item = CashCard>,
    {
        let cards = cards.into_iter().map(|card| (card.id(), card)).collect();
        Self {
            cards: RwLock::new(cards),
        }
    }

    /// Insert or replace the record with the same id
    pub fn insert(&self, card: CashCard) -> Result<()> {
        let mut cards = self
            .cards
            .write()
            .map_err(|_| CashCardError::Storage("in-memory store lock poisoned".to_string()))?;
        cards.insert(card.id(), card);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cards
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CashCardStore for InMemoryStore {
    fn find(&self, id: i64) -> Result<Option<CashCard>> {
        let cards = self
            .cards
            .read()
            .map_err(|_| CashCardError::Storage("in-memory store lock poisoned".to_string()))?;
        Ok(cards.get(&id).copied())
    }
}
