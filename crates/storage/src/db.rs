use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tally_core::NormalizedTransaction;

use crate::config::StoreConfig;

pub type DbPool = PgPool;

/// Rows per batch insert. Each chunk commits as one transaction.
pub const CHUNK_SIZE: usize = 1000;

/// Opens the store and ensures the target schema exists. The store is a
/// single-writer resource, so one connection is all the pool holds.
pub async fn create_pool(config: &StoreConfig) -> Result<DbPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.connection_url())
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE SCHEMA IF NOT EXISTS raw")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS raw.transactions (
            txn_date DATE NOT NULL,
            merchant TEXT,
            description TEXT,
            amount NUMERIC(12, 2) NOT NULL,
            category TEXT,
            src_file TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Appends one file's records to `raw.transactions` in source order.
///
/// Writes go out in chunks of [`CHUNK_SIZE`], each chunk inside its own
/// transaction, so a failure never leaves a partially written chunk.
/// Append-only by contract: re-running the same file inserts duplicates.
pub async fn append_transactions(
    pool: &DbPool,
    records: &[NormalizedTransaction],
) -> Result<u64, sqlx::Error> {
    let mut inserted = 0u64;

    for chunk in records.chunks(CHUNK_SIZE) {
        let mut tx = pool.begin().await?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO raw.transactions \
             (txn_date, merchant, description, amount, category, src_file) ",
        );
        builder.push_values(chunk, |mut b, record| {
            b.push_bind(record.txn_date)
                .push_bind(record.merchant.as_deref())
                .push_bind(record.description.as_str())
                .push_bind(record.amount)
                .push_bind(record.category.as_deref())
                .push_bind(record.source_file.as_str());
        });

        let result = builder.build().execute(&mut *tx).await?;
        tx.commit().await?;

        inserted += result.rows_affected();
    }

    Ok(inserted)
}
