// 💳 CashCard - the record served by the API
//
// Two immutable fields: a non-negative id and a finite amount.
// Wire shape is exactly {"id": <integer>, "amount": <number>}.

use serde::{Deserialize, Serialize};

use crate::error::{CashCardError, Result};

/// A monetary balance tied to an identifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCashCard")]
pub struct CashCard {
    id: i64,
    amount: f64,
}

/// Unchecked wire form; validated into a `CashCard` on deserialize
#[derive(Deserialize)]
struct RawCashCard {
    id: i64,
    amount: f64,
}

impl TryFrom<RawCashCard> for CashCard {
    type Error = CashCardError;

    fn try_from(raw: RawCashCard) -> Result<Self> {
        CashCard::new(raw.id, raw.amount)
    }
}

impl CashCard {
    /// Card the demo server starts with when no database is configured
    pub const DEMO: CashCard = CashCard {
        id: 99,
        amount: 123.45,
    };

    pub fn new(id: i64, amount: f64) -> Result<Self> {
        if id < 0 {
            return Err(CashCardError::MalformedInput(format!(
                "id must be non-negative, got {}",
                id
            )));
        }
        if !amount.is_finite() {
            return Err(CashCardError::MalformedInput(format!(
                "amount must be finite, got {}",
                amount
            )));
        }
        Ok(Self { id, amount })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Serialize to the compact wire form
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse the wire form. Missing keys, wrong types and invariant
    /// violations all come back as `MalformedInput`.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }
}
