//! Parse sort specifications and translate them to an ORDER BY clause.

use indexmap::IndexMap;
use serde::Deserialize;

use query_engine_sql::sql;

use super::associations::{self, FieldPath, JoinCollector};
use crate::translation::error::Error;
use crate::translation::helpers::Env;

/// The shapes a sort specification may take in a request.
///
/// Anything else is accepted too and means "no ordering", so that a malformed sort never
/// rejects a request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SortSpec {
    /// Field tokens separated by commas and/or whitespace: `"-votes, title"`.
    Text(String),
    /// One field token per entry: `["-votes", "title"]`.
    Fields(Vec<String>),
    /// Field names mapped to a signed weight, in document order: `{"votes": -1, "title": 1}`.
    Weights(IndexMap<String, f64>),
    Unsupported(serde_json::Value),
}

/// The direction of a single sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A single sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortEntry {
    pub path: FieldPath,
    pub direction: SortDirection,
}

/// Normalize a sort specification into sort keys, primary key first.
pub fn parse_sort_spec(spec: Option<&SortSpec>) -> Vec<SortEntry> {
    match spec {
        None => vec![],
        Some(SortSpec::Text(text)) => text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter_map(parse_sort_token)
            .collect(),
        Some(SortSpec::Fields(fields)) => fields
            .iter()
            .map(String::as_str)
            .filter_map(parse_sort_token)
            .collect(),
        Some(SortSpec::Weights(weights)) => weights
            .iter()
            .map(|(field, weight)| SortEntry {
                path: FieldPath::from(field.as_str()),
                direction: if *weight > 0.0 {
                    SortDirection::Ascending
                } else {
                    SortDirection::Descending
                },
            })
            .collect(),
        Some(SortSpec::Unsupported(value)) => {
            tracing::warn!("Ignoring unsupported sort specification: {}", value);
            vec![]
        }
    }
}

/// A token is a field path, optionally prefixed with `-` for descending order.
fn parse_sort_token(token: &str) -> Option<SortEntry> {
    let token = token.trim();
    let (field, direction) = match token.strip_prefix('-') {
        Some(field) => (field, SortDirection::Descending),
        None => (token, SortDirection::Ascending),
    };
    if field.is_empty() {
        None
    } else {
        Some(SortEntry {
            path: FieldPath::from(field),
            direction,
        })
    }
}

/// Convert the sort specification of a request to a SQL ORDER BY clause and the JOINs
/// needed when we order by fields of associated entities.
pub fn translate_order_by(
    env: &Env,
    spec: Option<&SortSpec>,
) -> Result<(sql::ast::OrderBy, Vec<sql::ast::Join>), Error> {
    let mut joins = JoinCollector::default();

    let elements = parse_sort_spec(spec)
        .into_iter()
        .map(|entry| {
            let resolved = associations::resolve_field_path(env, &entry.path)?;
            joins.extend(resolved.joins);

            let direction = match entry.direction {
                SortDirection::Ascending => sql::ast::OrderByDirection::Asc,
                SortDirection::Descending => sql::ast::OrderByDirection::Desc,
            };
            Ok(sql::ast::OrderByElement {
                target: resolved.reference,
                direction,
            })
        })
        .collect::<Result<Vec<sql::ast::OrderByElement>, Error>>()?;

    Ok((sql::ast::OrderBy { elements }, joins.into_joins()))
}
