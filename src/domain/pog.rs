use derive_more::derive::Display;
use serde::{Deserialize, Serialize};

// a stored pog, as handed back to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Display)]
#[display("{} ({})", name, ticker_symbol)]
pub struct Pog {
    pub id: i64,
    pub name: String,
    pub ticker_symbol: String,
    pub price: f64,
    pub color: String,
}

// the writable part of a pog. create and update both take the full set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PogFields {
    pub name: String,
    pub ticker_symbol: String,
    pub price: f64,
    pub color: String,
}

/// Text columns a pog can be looked up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PogField {
    Name,
    TickerSymbol,
    Color,
}

impl PogField {
    pub fn column(self) -> &'static str {
        match self {
            PogField::Name => "name",
            PogField::TickerSymbol => "ticker_symbol",
            PogField::Color => "color",
        }
    }
}
