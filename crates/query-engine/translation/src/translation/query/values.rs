//! Handle the translation of literal values.

use crate::translation::error::Error;
use query_engine_sql::sql;

/// Convert a JSON value into a SQL value.
pub fn translate_json_value(value: &serde_json::Value) -> Result<sql::ast::Value, Error> {
    match value {
        // numbers
        serde_json::Value::Number(num) => match num.as_i64() {
            Some(int) => Ok(sql::ast::Value::Int8(int)),
            None => num
                .as_f64()
                .map(sql::ast::Value::Float8)
                .ok_or_else(|| {
                    Error::InvalidQuery(format!("the number {num} has no SQL representation"))
                }),
        },

        // booleans
        serde_json::Value::Bool(b) => Ok(sql::ast::Value::Bool(*b)),

        // strings
        serde_json::Value::String(s) => Ok(sql::ast::Value::String(s.to_string())),

        // null
        serde_json::Value::Null => Ok(sql::ast::Value::Null),

        // compound values only appear where the query syntax expects them
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => Err(Error::InvalidQuery(
            format!("expected a scalar value, got {value}"),
        )),
    }
}
