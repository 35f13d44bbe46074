#![cfg(feature = "sqlite")]

mod common;

use catalog_db::prelude::*;
use common::{catalog_pool, int, text, user};

async fn seed_users(
    conn: &mut StoreConnection,
    names: &[&str],
) -> Result<Vec<i64>, CatalogDbError> {
    let records: Vec<Record> = names.iter().map(|n| user(n)).collect();
    let rs = batch_insert("users", &records, conn).await?;
    let mut ids: Vec<i64> = rs.iter().filter_map(DbRow::id).collect();
    ids.sort_unstable();
    Ok(ids)
}

#[test]
fn test02_select_without_options_returns_everything() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (_dir, pool) = catalog_pool().await?;
        let mut conn = pool.get_connection().await?;
        seed_users(&mut conn, &["Ana", "Bia", "Caio"]).await?;

        let rs = select("users", &SelectOptions::default(), &mut conn).await?;
        assert_eq!(rs.len(), 3);
        let columns = rs.get_column_names().ok_or("no columns")?;
        assert_eq!(
            columns.as_slice(),
            ["id", "name", "email", "active", "created_at"]
        );
        Ok(())
    })
}

#[test]
fn test02_limit_and_offset_page_through_ordered_rows() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (_dir, pool) = catalog_pool().await?;
        let mut conn = pool.get_connection().await?;
        let mut ids = Vec::new();
        for name in ["Ana", "Bia", "Caio", "Duda", "Enzo"] {
            let rs = insert("users", &user(name), &mut conn).await?;
            ids.push(rs.first().and_then(DbRow::id).ok_or("no id")?);
        }

        let options = SelectOptions::new()
            .with_order_by("id")
            .with_limit(3)
            .with_offset(2);
        let rs = select("users", &options, &mut conn).await?;
        let got: Vec<i64> = rs.iter().filter_map(DbRow::id).collect();
        assert_eq!(got, ids[2..5].to_vec());
        let names: Vec<&str> = rs.iter().filter_map(|r| text(r, "name")).collect();
        assert_eq!(names, vec!["Caio", "Duda", "Enzo"]);

        // offset alone skips without bounding
        let rs = select(
            "users",
            &SelectOptions::new().with_order_by("id").with_offset(3),
            &mut conn,
        )
        .await?;
        assert_eq!(rs.len(), 2);

        // limit past the end just returns what is there
        let rs = select(
            "users",
            &SelectOptions::new().with_order_by("id").with_limit(10).with_offset(4),
            &mut conn,
        )
        .await?;
        assert_eq!(rs.len(), 1);

        let err = select("users", &SelectOptions::new().with_limit(0), &mut conn)
            .await
            .unwrap_err();
        assert!(err.is_validation());
        Ok(())
    })
}

#[test]
fn test02_where_literal_filters_rows() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (_dir, pool) = catalog_pool().await?;
        let mut conn = pool.get_connection().await?;
        seed_users(&mut conn, &["Ana", "Bia", "Alice"]).await?;

        let rs = select(
            "users",
            &SelectOptions::new()
                .with_where("name LIKE 'A%'")
                .with_order_by("name"),
            &mut conn,
        )
        .await?;
        let names: Vec<&str> = rs.iter().filter_map(|r| text(r, "name")).collect();
        assert_eq!(names, vec!["Alice", "Ana"]);
        Ok(())
    })
}

#[test]
fn test02_joins_with_aliases_and_select_list() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (_dir, pool) = catalog_pool().await?;
        let mut conn = pool.get_connection().await?;
        let ids = seed_users(&mut conn, &["Ana", "Bia", "Caio"]).await?;

        let advisor = insert(
            "advisors",
            &Record::new().with("user_id", ids[0]).with("room", "B-12"),
            &mut conn,
        )
        .await?;
        let advisor_id = advisor.first().and_then(DbRow::id).ok_or("no advisor")?;
        batch_insert(
            "students",
            &[
                Record::new().with("user_id", ids[1]).with("advisor_id", advisor_id),
                Record::new().with("user_id", ids[2]).with("advisor_id", advisor_id),
            ],
            &mut conn,
        )
        .await?;

        let options = SelectOptions::new()
            .with_join(JoinKind::Inner, "students s", "s.user_id = u.id")
            .with_join(JoinKind::Inner, "advisors a", "a.id = s.advisor_id")
            .with_join(JoinKind::Left, "users au", "au.id = a.user_id")
            .with_column(SelectColumn::new("u", "name", "student"))
            .with_column(SelectColumn::new("au", "name", "advisor"))
            .with_column(SelectColumn::new("a", "room", "room"))
            .with_order_by("u.name");
        let rs = select("users as u", &options, &mut conn).await?;

        assert_eq!(rs.len(), 2);
        let columns = rs.get_column_names().ok_or("no columns")?;
        assert_eq!(columns.as_slice(), ["student", "advisor", "room"]);
        let first = rs.first().ok_or("no row")?;
        assert_eq!(text(first, "student"), Some("Bia"));
        assert_eq!(text(first, "advisor"), Some("Ana"));
        assert_eq!(text(first, "room"), Some("B-12"));
        Ok(())
    })
}

#[test]
fn test02_left_join_keeps_unmatched_rows() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (_dir, pool) = catalog_pool().await?;
        let mut conn = pool.get_connection().await?;

        let rs = batch_insert(
            "disciplines",
            &[
                Record::new().with("name", "Matemática"),
                Record::new().with("name", "História"),
            ],
            &mut conn,
        )
        .await?;
        let math = rs
            .iter()
            .find(|r| text(r, "name") == Some("Matemática"))
            .and_then(DbRow::id)
            .ok_or("no discipline")?;
        insert(
            "modules",
            &Record::new().with("discipline_id", math).with("title", "Álgebra"),
            &mut conn,
        )
        .await?;

        let options: SelectOptions = serde_json::from_value(serde_json::json!({
            "join": [{
                "target": "modules m",
                "on": "m.discipline_id = d.id",
                "type": "LEFT JOIN"
            }],
            "select": [
                { "table": "d", "column": "name", "as": "discipline" },
                { "table": "m", "column": "title" }
            ],
            "orderBy": "d.id"
        }))?;
        let rs = select("disciplines d", &options, &mut conn).await?;
        assert_eq!(rs.len(), 2);
        let history = rs
            .iter()
            .find(|r| text(r, "discipline") == Some("História"))
            .ok_or("missing row")?;
        assert!(history.get("title").is_some_and(RowValues::is_null));
        assert_eq!(text(&rs.rows[0], "title"), Some("Álgebra"));
        Ok(())
    })
}

#[test]
fn test02_bad_identifiers_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (_dir, pool) = catalog_pool().await?;
        let mut conn = pool.get_connection().await?;

        let err = select("users; DROP TABLE users", &SelectOptions::default(), &mut conn)
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let options = SelectOptions::new().with_column(SelectColumn::new("u", "name)", "x"));
        let err = select("users u", &options, &mut conn).await.unwrap_err();
        assert!(err.is_validation());

        // table is still there
        assert!(select("users", &SelectOptions::default(), &mut conn).await?.is_empty());
        assert_eq!(user_count(&mut conn).await?, 0);
        Ok(())
    })
}

async fn user_count(conn: &mut StoreConnection) -> Result<i64, CatalogDbError> {
    let rs = conn.execute_select("SELECT COUNT(*) AS n FROM users", &[]).await?;
    Ok(rs.first().and_then(|r| int(r, "n")).unwrap_or_default())
}
