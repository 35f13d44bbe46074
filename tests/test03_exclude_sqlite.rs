#![cfg(feature = "sqlite")]

mod common;

use catalog_db::prelude::*;
use common::{catalog_pool, text, user};

async fn seed(conn: &mut StoreConnection) -> Result<Vec<i64>, CatalogDbError> {
    let records: Vec<Record> = ["Ana", "Bia", "Alice", "Caio"].into_iter().map(user).collect();
    let rs = batch_insert("users", &records, conn).await?;
    let mut ids: Vec<i64> = rs.iter().filter_map(DbRow::id).collect();
    ids.sort_unstable();
    Ok(ids)
}

#[test]
fn test03_exclude_by_id_removes_only_that_row() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (_dir, pool) = catalog_pool().await?;
        let mut conn = pool.get_connection().await?;
        let ids = seed(&mut conn).await?;

        let rs = exclude("users", &DeleteFilter::id(ids[1]), &mut conn).await?;
        assert_eq!(rs.len(), 1);
        assert_eq!(rs.first().and_then(DbRow::id), Some(ids[1]));
        assert_eq!(text(rs.first().ok_or("no row")?, "name"), Some("Bia"));

        let left = select("users", &SelectOptions::default(), &mut conn).await?;
        assert_eq!(left.len(), 3);
        assert!(left.iter().all(|r| r.id() != Some(ids[1])));

        // deleting it again matches nothing
        assert!(exclude("users", &DeleteFilter::id(ids[1]), &mut conn).await?.is_empty());
        Ok(())
    })
}

#[test]
fn test03_exclude_by_literal_returns_deleted_rows() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (_dir, pool) = catalog_pool().await?;
        let mut conn = pool.get_connection().await?;
        seed(&mut conn).await?;

        let rs = exclude("users", &DeleteFilter::literal("name LIKE 'A%'"), &mut conn).await?;
        let mut names: Vec<&str> = rs.iter().filter_map(|r| text(r, "name")).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["Alice", "Ana"]);

        let left = select("users", &SelectOptions::new().with_order_by("name"), &mut conn).await?;
        let names: Vec<&str> = left.iter().filter_map(|r| text(r, "name")).collect();
        assert_eq!(names, vec!["Bia", "Caio"]);
        Ok(())
    })
}

#[test]
fn test03_exclude_all_empties_the_table() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (_dir, pool) = catalog_pool().await?;
        let mut conn = pool.get_connection().await?;
        seed(&mut conn).await?;

        let filter: DeleteFilter = serde_json::from_str("{}")?;
        assert_eq!(filter, DeleteFilter::All);
        let rs = exclude("users", &filter, &mut conn).await?;
        assert_eq!(rs.len(), 4);
        assert!(select("users", &SelectOptions::default(), &mut conn).await?.is_empty());
        Ok(())
    })
}

#[test]
fn test03_exclude_conditions_from_json() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (_dir, pool) = catalog_pool().await?;
        let mut conn = pool.get_connection().await?;
        let ids = seed(&mut conn).await?;

        let by_id: DeleteFilter = serde_json::from_value(serde_json::json!({ "id": ids[0] }))?;
        assert_eq!(exclude("users", &by_id, &mut conn).await?.len(), 1);

        let by_literal: DeleteFilter =
            serde_json::from_value(serde_json::json!({ "literal": "name = 'Caio'" }))?;
        assert_eq!(exclude("users", &by_literal, &mut conn).await?.len(), 1);

        let both = serde_json::from_value::<DeleteFilter>(serde_json::json!({
            "id": 1,
            "literal": "1=1"
        }));
        assert!(both.is_err());

        assert_eq!(select("users", &SelectOptions::default(), &mut conn).await?.len(), 2);
        Ok(())
    })
}
