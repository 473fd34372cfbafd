use crate::database::{PogRepository, StoreError, StoreResult};
use crate::domain::{Pog, PogField, PogFields};
use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

// row shape of the `pogs` table
#[derive(sqlx::FromRow)]
struct DbPog {
    id: i64,
    name: String,
    ticker_symbol: String,
    price: f64,
    color: String,
}

impl From<DbPog> for Pog {
    fn from(row: DbPog) -> Self {
        Pog {
            id: row.id,
            name: row.name,
            ticker_symbol: row.ticker_symbol,
            price: row.price,
            color: row.color,
        }
    }
}

// ticker_symbol is the only unique column besides the key
fn map_write_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            StoreError::UniqueViolation(PogField::TickerSymbol.column())
        }
        other => StoreError::Backend(other),
    }
}

pub struct SqliteRepository {
    pool: Pool<Sqlite>,
}

impl SqliteRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PogRepository for SqliteRepository {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Pog>> {
        let row = sqlx::query_as::<_, DbPog>("SELECT * FROM pogs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Pog::from))
    }

    async fn find_by_field(&self, field: PogField, value: &str) -> StoreResult<Option<Pog>> {
        // column names come from a closed enum, never from the request
        let sql = format!("SELECT * FROM pogs WHERE {} = ? LIMIT 1", field.column());
        let row = sqlx::query_as::<_, DbPog>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Pog::from))
    }

    async fn find_by_field_excluding_id(
        &self,
        field: PogField,
        value: &str,
        exclude_id: i64,
    ) -> StoreResult<Option<Pog>> {
        let sql = format!(
            "SELECT * FROM pogs WHERE {} = ? AND id <> ? LIMIT 1",
            field.column()
        );
        let row = sqlx::query_as::<_, DbPog>(&sql)
            .bind(value)
            .bind(exclude_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Pog::from))
    }

    async fn find_all(&self) -> StoreResult<Vec<Pog>> {
        let rows = sqlx::query_as::<_, DbPog>("SELECT * FROM pogs ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Pog::from).collect())
    }

    async fn create(&self, fields: &PogFields) -> StoreResult<Pog> {
        let row = sqlx::query_as::<_, DbPog>(
            r#"
            INSERT INTO pogs (name, ticker_symbol, price, color)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, ticker_symbol, price, color
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.ticker_symbol)
        .bind(fields.price)
        .bind(&fields.color)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, fields: &PogFields) -> StoreResult<Pog> {
        let row = sqlx::query_as::<_, DbPog>(
            r#"
            UPDATE pogs
            SET name = ?, ticker_symbol = ?, price = ?, color = ?
            WHERE id = ?
            RETURNING id, name, ticker_symbol, price, color
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.ticker_symbol)
        .bind(fields.price)
        .bind(&fields.color)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        row.map(Pog::from).ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM pogs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }
}
