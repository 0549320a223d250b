use anyhow::Context;
use sqlx::{postgres::PgArguments, query::Query, PgPool, Postgres, Transaction};

use crate::records::repo_types::{Record, RecordRow};

/// Load every user row in arrival order.
pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Record>> {
    let rows = sqlx::query_as::<_, RecordRow>(
        r#"
        SELECT id, name, email, password, registration_date, last_login, status
          FROM users
         ORDER BY id ASC
        "#,
    )
    .fetch_all(db)
    .await
    .context("select users")?;

    rows.into_iter().map(Record::try_from).collect()
}

/// Insert a single user row.
pub async fn insert(db: &PgPool, record: &Record) -> anyhow::Result<()> {
    insert_query(record)
        .execute(db)
        .await
        .with_context(|| format!("insert user {}", record.id))?;
    Ok(())
}

/// Insert a user row within a transaction.
pub async fn insert_tx(tx: &mut Transaction<'_, Postgres>, record: &Record) -> anyhow::Result<()> {
    insert_query(record)
        .execute(&mut **tx)
        .await
        .with_context(|| format!("insert user {}", record.id))?;
    Ok(())
}

fn insert_query(record: &Record) -> Query<'_, Postgres, PgArguments> {
    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password, registration_date, last_login, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(&record.id)
    .bind(&record.name)
    .bind(&record.email)
    .bind(&record.password)
    .bind(record.registration_date)
    .bind(record.last_login)
    .bind(record.status.as_str())
}

/// Remove every user row within a transaction.
pub async fn delete_all_tx(tx: &mut Transaction<'_, Postgres>) -> anyhow::Result<u64> {
    let done = sqlx::query("DELETE FROM users")
        .execute(&mut **tx)
        .await
        .context("delete all users")?;
    Ok(done.rows_affected())
}

/// Remove the given user rows in one statement.
pub async fn delete_by_ids(db: &PgPool, ids: &[String]) -> anyhow::Result<u64> {
    let done = sqlx::query("DELETE FROM users WHERE id = ANY($1)")
        .bind(ids)
        .execute(db)
        .await
        .context("delete users by id")?;
    Ok(done.rows_affected())
}
