//! Translate `limit` and `offset`.

use query_engine_sql::sql;

/// Only positive numbers paginate. Anything else leaves the clause out.
pub fn translate_limit(
    limit: Option<&serde_json::Value>,
    offset: Option<&serde_json::Value>,
) -> sql::ast::Limit {
    sql::ast::Limit {
        limit: limit.and_then(positive_count),
        offset: offset.and_then(positive_count),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn positive_count(value: &serde_json::Value) -> Option<u32> {
    let number = value.as_f64()?.trunc();
    if number >= 1.0 {
        // saturates at u32::MAX
        Some(number as u32)
    } else {
        None
    }
}
