//! Column values and result rows.

use std::fmt;

use indexmap::IndexMap;
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, Value as SqlValue, ValueRef};

/// A single column value as read from or bound to SQLite.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

/// One result row: column name to value, in select order.
pub type Row = IndexMap<String, Value>;

/// Ordered column/value pairs supplied for INSERT, SET, or WHERE.
pub type ColumnValues = IndexMap<String, Value>;

impl Value {
    /// Interpret operator input.
    ///
    /// `null` in any case means SQL NULL; anything else is bound as text and
    /// left to the column type to convert. Unconvertible text is rejected by
    /// the engine.
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("null") {
            Value::Null
        } else {
            Value::Text(trimmed.to_string())
        }
    }

    /// True for text that is empty once trimmed.
    pub fn is_blank(&self) -> bool {
        matches!(self, Value::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Real(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Value::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
            Value::Integer(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            Value::Real(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            Value::Text(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
        }
    }
}

impl FromSql for Value {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(v) => Value::Integer(v),
            ValueRef::Real(v) => Value::Real(v),
            ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => Value::Text(String::from_utf8_lossy(b).into_owned()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_token_is_case_insensitive() {
        assert_eq!(Value::from_input("null"), Value::Null);
        assert_eq!(Value::from_input("NULL"), Value::Null);
        assert_eq!(Value::from_input("  NuLl "), Value::Null);
    }

    #[test]
    fn other_input_is_text() {
        assert_eq!(Value::from_input(" 170 "), Value::Text("170".into()));
        assert_eq!(Value::from_input("nullish"), Value::Text("nullish".into()));
        assert!(Value::from_input("   ").is_blank());
        assert!(!Value::Null.is_blank());
    }

    #[test]
    fn display_renders_null() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Integer(7).to_string(), "7");
        assert_eq!(Value::Real(1.5).to_string(), "1.5");
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }
}
