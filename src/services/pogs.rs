use crate::database::{PogRepository, StoreError};
use crate::domain::{Pog, PogField, PogFields};
use crate::services::error::{PogError, PogResult};
use std::sync::Arc;

const CREATE_FAILED: &str = "Failed to create pog";
const INTERNAL: &str = "Internal server error";

// owns the pog lifecycle rules: ticker uniqueness and not-found mapping.
// the pre-checks only give a friendlier error, the store's unique index has the final say.
#[derive(Clone)]
pub struct PogService {
    repo: Arc<dyn PogRepository>,
}

impl PogService {
    pub fn new(repo: Arc<dyn PogRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, fields: PogFields) -> PogResult<Pog> {
        let existing = self
            .repo
            .find_by_field(PogField::TickerSymbol, &fields.ticker_symbol)
            .await
            .map_err(|source| store_failure(CREATE_FAILED, source))?;

        if existing.is_some() {
            return Err(PogError::DuplicateTicker {
                ticker_symbol: fields.ticker_symbol,
            });
        }

        match self.repo.create(&fields).await {
            Ok(pog) => {
                tracing::info!(id = pog.id, "created pog {}", pog);
                Ok(pog)
            }
            // lost the race against a concurrent writer
            Err(StoreError::UniqueViolation(_)) => Err(PogError::DuplicateTicker {
                ticker_symbol: fields.ticker_symbol,
            }),
            Err(source) => Err(store_failure(CREATE_FAILED, source)),
        }
    }

    pub async fn list(&self) -> PogResult<Vec<Pog>> {
        self.repo
            .find_all()
            .await
            .map_err(|source| store_failure(INTERNAL, source))
    }

    pub async fn get(&self, id: i64) -> PogResult<Pog> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|source| store_failure(INTERNAL, source))?
            .ok_or(PogError::NotFound { id: Some(id) })
    }

    // full replace: every field is written, whether it changed or not
    pub async fn update(&self, id: i64, fields: PogFields) -> PogResult<Pog> {
        let clash = self
            .repo
            .find_by_field_excluding_id(PogField::TickerSymbol, &fields.ticker_symbol, id)
            .await
            .map_err(|source| store_failure(INTERNAL, source))?;

        if clash.is_some() {
            return Err(PogError::DuplicateTicker {
                ticker_symbol: fields.ticker_symbol,
            });
        }

        match self.repo.update(id, &fields).await {
            Ok(pog) => {
                tracing::info!(id, "updated pog {}", pog);
                Ok(pog)
            }
            Err(StoreError::NotFound(_)) => Err(PogError::UpdateFailed { id }),
            Err(StoreError::UniqueViolation(_)) => Err(PogError::DuplicateTicker {
                ticker_symbol: fields.ticker_symbol,
            }),
            Err(source) => Err(store_failure(INTERNAL, source)),
        }
    }

    pub async fn delete(&self, id: i64) -> PogResult<()> {
        match self.repo.delete(id).await {
            Ok(()) => {
                tracing::info!(id, "deleted pog");
                Ok(())
            }
            Err(StoreError::NotFound(_)) => Err(PogError::NotFound { id: Some(id) }),
            Err(source) => Err(store_failure(INTERNAL, source)),
        }
    }
}

fn store_failure(message: &'static str, source: StoreError) -> PogError {
    PogError::Store { message, source }
}
