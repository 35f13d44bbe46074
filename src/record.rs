//! Column/value records handed to the statement builder.

use serde_json::Value as JsonValue;

use crate::error::CatalogDbError;
use crate::types::RowValues;

/// Name of the primary-key column used by `update`, `insert_or_update` and `DeleteFilter::Id`.
pub const ID_COLUMN: &str = "id";

/// One entry of a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Sent to the store as a bound parameter.
    Bind(RowValues),
    /// Inlined into the statement text verbatim, e.g. a correlated sub-select
    /// such as `(select id from disciplines where name = 'Geografia' limit 1)`.
    Raw(String),
}

impl FieldValue {
    pub fn raw(expr: impl Into<String>) -> Self {
        FieldValue::Raw(expr.into())
    }

    /// Parenthesized strings become [`FieldValue::Raw`]; everything else is bound.
    #[must_use]
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::String(s) if is_parenthesized(s) => FieldValue::Raw(s.trim().to_string()),
            other => FieldValue::Bind(RowValues::from_json(other)),
        }
    }

    #[must_use]
    pub fn as_bound(&self) -> Option<&RowValues> {
        match self {
            FieldValue::Bind(value) => Some(value),
            FieldValue::Raw(_) => None,
        }
    }
}

fn is_parenthesized(s: &str) -> bool {
    let s = s.trim();
    s.len() >= 2 && s.starts_with('(') && s.ends_with(')')
}

impl From<RowValues> for FieldValue {
    fn from(value: RowValues) -> Self {
        FieldValue::Bind(value)
    }
}

macro_rules! bind_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::Bind(RowValues::from(value))
                }
            }
        )*
    };
}

bind_from!(
    i64,
    i32,
    f64,
    bool,
    &str,
    String,
    chrono::NaiveDateTime,
    JsonValue,
    Vec<u8>,
    Option<i64>,
    Option<String>,
    Option<chrono::NaiveDateTime>,
);

/// A single row's column -> value mapping, in insertion order.
///
/// Setting a column twice replaces the earlier value, so column names stay unique.
///
/// ```rust
/// use catalog_db::prelude::*;
///
/// let record = Record::new()
///     .with("title", "Xenoblade Chronicles X")
///     .with("finished", false)
///     .with("system_id", FieldValue::raw("(select id from systems where name = 'Wii U')"));
/// assert_eq!(record.columns().collect::<Vec<_>>(), ["title", "finished", "system_id"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON object.
    ///
    /// A string wrapped in parentheses, such as
    /// `"(select id from disciplines where name = 'Geografia' limit 1)"`, is taken
    /// as a SQL expression and becomes [`FieldValue::Raw`]. Every other value is
    /// bound, with scalars mapped by [`RowValues::from_json`].
    ///
    /// # Errors
    /// Returns [`CatalogDbError::Validation`] if `value` is not an object.
    pub fn from_json(value: &JsonValue) -> Result<Self, CatalogDbError> {
        let JsonValue::Object(map) = value else {
            return Err(CatalogDbError::validation(
                "record JSON must be an object of column -> value",
            ));
        };
        let mut record = Record::new();
        for (column, value) in map {
            record.set(column.as_str(), FieldValue::from_json(value));
        }
        Ok(record)
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<FieldValue>) -> &mut Self {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((column, value)),
        }
        self
    }

    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(column, value);
        self
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn remove(&mut self, column: &str) -> Option<FieldValue> {
        let idx = self.fields.iter().position(|(name, _)| name == column)?;
        Some(self.fields.remove(idx).1)
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// The `id` value, if present.
    #[must_use]
    pub fn id(&self) -> Option<&FieldValue> {
        self.get(ID_COLUMN)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (column, value) in iter {
            record.set(column, value);
        }
        record
    }
}
