//! Option descriptors for `select` and `exclude`.
//!
//! Both deserialize from the object shape callers already pass around:
//!
//! ```rust
//! use catalog_db::prelude::*;
//!
//! let options: SelectOptions = serde_json::from_value(serde_json::json!({
//!     "join": [{ "target": "students s", "on": "user_id = s.id", "type": "LEFT JOIN" }],
//!     "select": [{ "table": "s", "column": "id", "as": "student_id" }],
//!     "where": "s.id > 0",
//!     "limit": 3,
//!     "offset": 2
//! }))
//! .unwrap();
//! assert_eq!(options.joins[0].kind, JoinKind::Left);
//! ```

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::CatalogDbError;
use crate::types::RowValues;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

impl TryFrom<String> for JoinKind {
    type Error = CatalogDbError;

    /// Accepts `LEFT JOIN`, `left`, `LEFT OUTER JOIN` and the like.
    fn try_from(value: String) -> Result<Self, Self::Error> {
        let words: Vec<String> = value
            .split_whitespace()
            .map(str::to_ascii_uppercase)
            .filter(|w| w != "JOIN" && w != "OUTER")
            .collect();
        match words.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
            [] | ["INNER"] => Ok(JoinKind::Inner),
            ["LEFT"] => Ok(JoinKind::Left),
            ["RIGHT"] => Ok(JoinKind::Right),
            ["FULL"] => Ok(JoinKind::Full),
            ["CROSS"] => Ok(JoinKind::Cross),
            _ => Err(CatalogDbError::validation(format!(
                "unsupported join type {value:?}"
            ))),
        }
    }
}

/// One `JOIN` clause; `on` is a raw predicate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Join {
    pub target: String,
    #[serde(default)]
    pub on: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: JoinKind,
}

/// One select-list entry, rendered as `table.column AS alias`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectColumn {
    #[serde(default)]
    pub table: Option<String>,
    pub column: String,
    #[serde(rename = "as", default)]
    pub alias: Option<String>,
}

impl SelectColumn {
    pub fn new(
        table: impl Into<String>,
        column: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        Self {
            table: Some(table.into()),
            column: column.into(),
            alias: Some(alias.into()),
        }
    }
}

/// Options for `select`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectOptions {
    #[serde(rename = "join")]
    pub joins: Vec<Join>,
    #[serde(rename = "select")]
    pub columns: Vec<SelectColumn>,
    /// Raw predicate; `1=1` when absent.
    #[serde(rename = "where")]
    pub where_clause: Option<String>,
    /// Raw ordering clause, without the `ORDER BY` keywords.
    #[serde(alias = "orderBy")]
    pub order_by: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl SelectOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_join(
        mut self,
        kind: JoinKind,
        target: impl Into<String>,
        on: impl Into<String>,
    ) -> Self {
        self.joins.push(Join {
            target: target.into(),
            on: Some(on.into()),
            kind,
        });
        self
    }

    #[must_use]
    pub fn with_column(mut self, column: SelectColumn) -> Self {
        self.columns.push(column);
        self
    }

    #[must_use]
    pub fn with_where(mut self, predicate: impl Into<String>) -> Self {
        self.where_clause = Some(predicate.into());
        self
    }

    #[must_use]
    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Which rows `exclude` deletes.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "DeleteFilterFields")]
pub enum DeleteFilter {
    /// No predicate: every row goes.
    #[default]
    All,
    /// Raw predicate inlined after `WHERE`.
    Literal(String),
    /// `id = <value>`, bound.
    Id(RowValues),
}

impl DeleteFilter {
    pub fn literal(predicate: impl Into<String>) -> Self {
        DeleteFilter::Literal(predicate.into())
    }

    pub fn id(value: impl Into<RowValues>) -> Self {
        DeleteFilter::Id(value.into())
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DeleteFilterFields {
    literal: Option<String>,
    id: Option<JsonValue>,
}

impl TryFrom<DeleteFilterFields> for DeleteFilter {
    type Error = CatalogDbError;

    fn try_from(fields: DeleteFilterFields) -> Result<Self, Self::Error> {
        match (fields.literal, fields.id) {
            (None, None) => Ok(DeleteFilter::All),
            (Some(literal), None) => Ok(DeleteFilter::Literal(literal)),
            (None, Some(id)) => Ok(DeleteFilter::Id(RowValues::from_json(&id))),
            (Some(_), Some(_)) => Err(CatalogDbError::validation(
                "delete conditions take either `literal` or `id`, not both",
            )),
        }
    }
}
