//! Free-text search over a set of columns of the root entity.

use serde::Deserialize;

use query_engine_sql::sql;

use crate::translation::error::Error;
use crate::translation::helpers::Env;

/// The term of a search. Only a string searches anything.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SearchTerm {
    Text(String),
    Unsupported(serde_json::Value),
}

impl SearchTerm {
    /// The term to search for, if there is one to search for.
    pub fn text(&self) -> Option<&str> {
        match self {
            SearchTerm::Text(text) if !text.is_empty() => Some(text),
            SearchTerm::Text(_) => None,
            SearchTerm::Unsupported(value) => {
                tracing::warn!("Ignoring unsupported search term: {}", value);
                None
            }
        }
    }
}

/// The columns a search term is matched against.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SearchFields {
    /// Column names separated by whitespace: `"title content"`.
    Text(String),
    /// One column name per entry.
    List(Vec<String>),
    Unsupported(serde_json::Value),
}

impl SearchFields {
    pub fn names(&self) -> Vec<&str> {
        match self {
            SearchFields::Text(text) => text.split_whitespace().collect(),
            SearchFields::List(names) => names.iter().map(String::as_str).collect(),
            SearchFields::Unsupported(value) => {
                tracing::warn!("Ignoring unsupported search fields: {}", value);
                vec![]
            }
        }
    }
}

/// Build a predicate matching rows where any of the search fields contains the term.
///
/// Without search fields nothing matches.
pub fn translate_search(
    env: &Env,
    term: &str,
    fields: Option<&SearchFields>,
) -> Result<sql::ast::Expression, Error> {
    let operator = if env.settings.case_insensitive_search {
        sql::ast::BinaryOperator::CaseInsensitiveLike
    } else {
        sql::ast::BinaryOperator::Like
    };
    let pattern = format!("%{term}%");

    let names = fields.map(SearchFields::names).unwrap_or_default();

    let expressions = names
        .into_iter()
        .map(|name| {
            if name.is_empty() {
                Err(Error::MalformedFieldPath(name.to_string()))
            } else if name.contains('.') {
                Err(Error::UnsupportedSearchField(name.to_string()))
            } else {
                Ok(sql::ast::Expression::BinaryOperation {
                    left: Box::new(sql::helpers::make_column(name.to_string())),
                    operator,
                    right: Box::new(sql::ast::Expression::Value(sql::ast::Value::String(
                        pattern.clone(),
                    ))),
                })
            }
        })
        .collect::<Result<Vec<_>, Error>>()?;

    if expressions.is_empty() {
        tracing::debug!("Search for '{}' has no fields to search in", term);
    }

    Ok(sql::helpers::disjunction(expressions))
}
