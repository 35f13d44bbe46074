#[cfg(feature = "sqlite")]
mod common;

use std::future::Future;
use std::sync::Arc;

use catalog_db::prelude::*;

/// Executor that records statements and answers the id lookup from a fixed set.
struct Recording {
    existing: Vec<i64>,
    seen: Vec<(String, Vec<RowValues>)>,
}

impl Recording {
    fn new(existing: &[i64]) -> Self {
        Self {
            existing: existing.to_vec(),
            seen: Vec::new(),
        }
    }

    fn verbs(&self) -> Vec<&str> {
        self.seen
            .iter()
            .filter_map(|(sql, _)| sql.split_whitespace().next())
            .collect()
    }
}

impl StatementExecutor for Recording {
    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Postgres
    }

    fn fetch(
        &mut self,
        sql: &str,
        params: &[RowValues],
    ) -> impl Future<Output = Result<ResultSet, CatalogDbError>> + Send {
        self.seen.push((sql.to_string(), params.to_vec()));
        let mut rs = ResultSet::with_capacity(1);
        rs.set_column_names(Arc::new(vec!["id".to_string()]));
        if sql.starts_with("SELECT") {
            if let Some(RowValues::Int(id)) = params.first() {
                if self.existing.contains(id) {
                    rs.add_row_values(vec![RowValues::Int(*id)]);
                }
            }
        }
        async move { Ok(rs) }
    }
}

#[tokio::test]
async fn test04_upsert_without_id_inserts_directly() -> Result<(), Box<dyn std::error::Error>> {
    let mut exec = Recording::new(&[]);
    insert_or_update("users", &Record::new().with("name", "Ana"), &mut exec).await?;
    assert_eq!(exec.verbs(), vec!["INSERT"]);

    // a null id counts as absent and is left for the store to assign
    let record = Record::new().with("id", RowValues::Null).with("name", "Bia");
    insert_or_update("users", &record, &mut exec).await?;
    assert_eq!(exec.verbs(), vec!["INSERT", "INSERT"]);
    assert_eq!(exec.seen[1].0, "INSERT INTO users (name) VALUES ($1) RETURNING *");
    Ok(())
}

#[tokio::test]
async fn test04_upsert_looks_up_then_writes() -> Result<(), Box<dyn std::error::Error>> {
    let mut exec = Recording::new(&[7]);

    let known = Record::new().with("id", 7_i64).with("name", "Ana");
    insert_or_update("users", &known, &mut exec).await?;
    assert_eq!(exec.verbs(), vec!["SELECT", "UPDATE"]);
    assert_eq!(exec.seen[0].0, "SELECT id FROM users WHERE id = $1 LIMIT 1");
    assert_eq!(exec.seen[0].1, vec![RowValues::Int(7)]);
    assert_eq!(
        exec.seen[1].0,
        "UPDATE users SET name = $1 WHERE id = $2 RETURNING *"
    );

    let unknown = Record::new().with("id", 8_i64).with("name", "Bia");
    insert_or_update("users", &unknown, &mut exec).await?;
    assert_eq!(exec.verbs(), vec!["SELECT", "UPDATE", "SELECT", "INSERT"]);
    assert_eq!(
        exec.seen[3].0,
        "INSERT INTO users (id, name) VALUES ($1, $2) RETURNING *"
    );
    Ok(())
}

#[tokio::test]
async fn test04_upsert_validation_stops_before_lookup() -> Result<(), Box<dyn std::error::Error>> {
    let mut exec = Recording::new(&[]);
    let err = insert_or_update("bad table!", &Record::new().with("id", 1_i64), &mut exec)
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(exec.seen.is_empty());
    Ok(())
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test04_upsert_twice_leaves_one_row() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, pool) = common::catalog_pool().await?;
    let mut conn = pool.get_connection().await?;

    let payload = common::user("Ana");
    let first = insert_or_update("users", &payload, &mut conn).await?;
    assert_eq!(first.len(), 1);
    let id = first.first().and_then(DbRow::id).ok_or("no id")?;

    let second = insert_or_update(
        "users",
        &payload.clone().with("id", id).with("email", "ana@catalog.dev"),
        &mut conn,
    )
    .await?;
    assert_eq!(second.len(), 1);
    assert_eq!(second.first().and_then(DbRow::id), Some(id));
    assert_eq!(
        common::text(second.first().ok_or("no row")?, "email"),
        Some("ana@catalog.dev")
    );

    let all = select("users", &SelectOptions::default(), &mut conn).await?;
    assert_eq!(all.len(), 1);

    // explicit new id gets inserted under that id
    let bia = common::user("Bia").with("id", 42_i64);
    let chosen = insert_or_update("users", &bia, &mut conn).await?;
    assert_eq!(chosen.first().and_then(DbRow::id), Some(42));
    Ok(())
}

#[cfg(feature = "sqlite")]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test04_concurrent_callers_share_the_pool() -> Result<(), Box<dyn std::error::Error>> {
    let (_dir, pool) = common::catalog_pool().await?;

    let mut handles = Vec::new();
    for n in 0..8_i64 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            let mut conn = pool.get_connection().await?;
            let record = common::user(&format!("User{n}")).with("id", 100 + n);
            insert_or_update("users", &record, &mut conn).await?;
            let again = record.with("email", format!("user{n}@second.dev"));
            insert_or_update("users", &again, &mut conn).await
        }));
    }
    for handle in handles {
        let rs = handle.await??;
        assert_eq!(rs.len(), 1);
    }

    let mut conn = pool.get_connection().await?;
    let all = select("users", &SelectOptions::new().with_order_by("id"), &mut conn).await?;
    assert_eq!(all.len(), 8);
    assert!(all
        .iter()
        .all(|r| common::text(r, "email").is_some_and(|e| e.ends_with("@second.dev"))));
    Ok(())
}
