//! Translate the `query` object of a filter request into a predicate.
//!
//! Field keys are used verbatim as columns of the root entity; the predicate does not
//! reach across associations.

use query_engine_metadata::metadata::{ComparisonOperator, LogicalOperator};
use query_engine_sql::sql;

use super::values;
use crate::translation::error::Error;

/// Translate a query object. An empty object matches everything.
pub fn translate_query(query: &serde_json::Value) -> Result<sql::ast::Expression, Error> {
    match query {
        serde_json::Value::Object(object) => translate_object(object),
        _ => Err(Error::InvalidQuery(format!(
            "expected a query object, got {query}"
        ))),
    }
}

/// Every key of an object must hold, in document order.
fn translate_object(
    object: &serde_json::Map<String, serde_json::Value>,
) -> Result<sql::ast::Expression, Error> {
    let expressions = object
        .iter()
        .map(|(key, value)| match LogicalOperator::from_name(key) {
            Some(operator) => translate_logical_operator(operator, value),
            None if key.starts_with('$') => Err(Error::UnknownOperator(key.clone())),
            None => translate_field(key, value),
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(sql::helpers::conjunction(expressions))
}

fn translate_logical_operator(
    operator: LogicalOperator,
    value: &serde_json::Value,
) -> Result<sql::ast::Expression, Error> {
    let serde_json::Value::Array(queries) = value else {
        return Err(Error::InvalidQuery(format!(
            "'{}' expects a list of queries",
            operator.name()
        )));
    };

    let expressions = queries
        .iter()
        .map(translate_query)
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(match operator {
        LogicalOperator::And => sql::helpers::conjunction(expressions),
        LogicalOperator::Or => sql::helpers::disjunction(expressions),
    })
}

/// A field maps either to a value it must equal, or to an object of operators.
fn translate_field(field: &str, value: &serde_json::Value) -> Result<sql::ast::Expression, Error> {
    match value {
        serde_json::Value::Object(operators) => {
            let expressions = operators
                .iter()
                .map(|(name, operand)| {
                    let operator = ComparisonOperator::from_name(name)
                        .ok_or_else(|| Error::UnknownOperator(name.clone()))?;
                    translate_comparison(field, operator, operand)
                })
                .collect::<Result<Vec<_>, Error>>()?;
            Ok(sql::helpers::conjunction(expressions))
        }
        _ => translate_comparison(field, ComparisonOperator::Equals, value),
    }
}

fn translate_comparison(
    field: &str,
    operator: ComparisonOperator,
    operand: &serde_json::Value,
) -> Result<sql::ast::Expression, Error> {
    let column = Box::new(sql::helpers::make_column(field.to_string()));

    let binary_operator = match operator {
        ComparisonOperator::In | ComparisonOperator::NotIn => {
            return translate_list_comparison(field, operator, operand, column)
        }
        ComparisonOperator::Equals => sql::ast::BinaryOperator::Equals,
        ComparisonOperator::NotEquals => sql::ast::BinaryOperator::NotEquals,
        ComparisonOperator::LessThan => sql::ast::BinaryOperator::LessThan,
        ComparisonOperator::LessThanOrEqualTo => sql::ast::BinaryOperator::LessThanOrEqualTo,
        ComparisonOperator::GreaterThan => sql::ast::BinaryOperator::GreaterThan,
        ComparisonOperator::GreaterThanOrEqualTo => {
            sql::ast::BinaryOperator::GreaterThanOrEqualTo
        }
        ComparisonOperator::Like => sql::ast::BinaryOperator::Like,
        ComparisonOperator::NotLike => sql::ast::BinaryOperator::NotLike,
        ComparisonOperator::CaseInsensitiveLike => sql::ast::BinaryOperator::CaseInsensitiveLike,
        ComparisonOperator::NotCaseInsensitiveLike => {
            sql::ast::BinaryOperator::NotCaseInsensitiveLike
        }
    };

    let value = values::translate_json_value(operand)?;

    // comparing with null is never true in SQL.
    match (binary_operator, value) {
        (sql::ast::BinaryOperator::Equals, sql::ast::Value::Null) => {
            Ok(sql::ast::Expression::UnaryOperation {
                expression: column,
                operator: sql::ast::UnaryOperator::IsNull,
            })
        }
        (sql::ast::BinaryOperator::NotEquals, sql::ast::Value::Null) => {
            Ok(sql::ast::Expression::UnaryOperation {
                expression: column,
                operator: sql::ast::UnaryOperator::IsNotNull,
            })
        }
        (operator, value) => Ok(sql::ast::Expression::BinaryOperation {
            left: column,
            operator,
            right: Box::new(sql::ast::Expression::Value(value)),
        }),
    }
}

/// `$in` and `$nin` against a list of scalars. An empty list is decided without asking the
/// database.
fn translate_list_comparison(
    field: &str,
    operator: ComparisonOperator,
    operand: &serde_json::Value,
    column: Box<sql::ast::Expression>,
) -> Result<sql::ast::Expression, Error> {
    let serde_json::Value::Array(items) = operand else {
        return Err(Error::InvalidQuery(format!(
            "'{operator}' on '{field}' expects a list of values"
        )));
    };

    let values = items
        .iter()
        .map(|item| values::translate_json_value(item).map(sql::ast::Expression::Value))
        .collect::<Result<Vec<_>, Error>>()?;

    let array_operator = if operator == ComparisonOperator::NotIn {
        sql::ast::BinaryArrayOperator::NotIn
    } else {
        sql::ast::BinaryArrayOperator::In
    };

    Ok(match (array_operator, values.is_empty()) {
        (sql::ast::BinaryArrayOperator::In, true) => sql::helpers::false_expr(),
        (sql::ast::BinaryArrayOperator::NotIn, true) => sql::helpers::true_expr(),
        (array_operator, false) => sql::ast::Expression::BinaryArrayOperation {
            left: column,
            operator: array_operator,
            right: values,
        },
    })
}
