//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;

// Empty clauses //

/// An empty `WHERE` clause.
pub fn empty_where() -> Expression {
    true_expr()
}

/// An empty `ORDER BY` clause.
pub fn empty_order_by() -> OrderBy {
    OrderBy { elements: vec![] }
}

/// Empty `LIMIT` and `OFFSET` clauses.
pub fn empty_limit() -> Limit {
    Limit {
        limit: None,
        offset: None,
    }
}

/// A `true` expression.
pub fn true_expr() -> Expression {
    Expression::Value(Value::Bool(true))
}

/// A `false` expression.
pub fn false_expr() -> Expression {
    Expression::Value(Value::Bool(false))
}

// Combining expressions //

/// Combine expressions with AND, left to right. No expressions at all is `true`.
pub fn conjunction(expressions: Vec<Expression>) -> Expression {
    expressions
        .into_iter()
        .reduce(|left, right| Expression::And {
            left: Box::new(left),
            right: Box::new(right),
        })
        .unwrap_or_else(true_expr)
}

/// Combine expressions with OR, left to right. No expressions at all is `false`.
pub fn disjunction(expressions: Vec<Expression>) -> Expression {
    expressions
        .into_iter()
        .reduce(|left, right| Expression::Or {
            left: Box::new(left),
            right: Box::new(right),
        })
        .unwrap_or_else(false_expr)
}

// Aliasing //

/// Create table aliases using this function so we build everything in one place.
pub fn make_table_alias(name: String) -> TableAlias {
    TableAlias { name }
}

/// A bare column of the root entity.
pub fn make_column(name: String) -> Expression {
    Expression::ColumnReference(ColumnReference::Column(ColumnName(name)))
}

/// A column of a joined entity.
pub fn make_aliased_column(table: TableAlias, name: String) -> Expression {
    Expression::ColumnReference(ColumnReference::AliasedColumn {
        table,
        name: ColumnName(name),
    })
}

/// Qualify every bare column in the expression with the given table alias.
///
/// Columns that already name a table are left alone.
pub fn qualify_columns(expression: Expression, alias: &TableAlias) -> Expression {
    let qualify = |expression: Box<Expression>| Box::new(qualify_columns(*expression, alias));
    match expression {
        Expression::ColumnReference(ColumnReference::Column(name)) => {
            Expression::ColumnReference(ColumnReference::AliasedColumn {
                table: alias.clone(),
                name,
            })
        }
        Expression::And { left, right } => Expression::And {
            left: qualify(left),
            right: qualify(right),
        },
        Expression::Or { left, right } => Expression::Or {
            left: qualify(left),
            right: qualify(right),
        },
        Expression::BinaryOperation {
            left,
            operator,
            right,
        } => Expression::BinaryOperation {
            left: qualify(left),
            operator,
            right: qualify(right),
        },
        Expression::BinaryArrayOperation {
            left,
            operator,
            right,
        } => Expression::BinaryArrayOperation {
            left: qualify(left),
            operator,
            right: right
                .into_iter()
                .map(|item| qualify_columns(item, alias))
                .collect(),
        },
        Expression::UnaryOperation {
            expression,
            operator,
        } => Expression::UnaryOperation {
            expression: qualify(expression),
            operator,
        },
        Expression::ColumnReference(ColumnReference::AliasedColumn { .. })
        | Expression::Value(_) => expression,
    }
}

// SELECTs //

/// Build a simple select with a select list and the rest are empty.
pub fn simple_select(select_list: SelectList, from: From) -> Select {
    Select {
        select_list,
        from,
        joins: vec![],
        where_: Where(empty_where()),
        order_by: empty_order_by(),
        limit: empty_limit(),
    }
}

/// Build a simple select *
pub fn star_select(from: From) -> Select {
    simple_select(SelectList::SelectStar, from)
}

/// Build a simple select count(*)
pub fn count_select(from: From) -> Select {
    simple_select(SelectList::CountStar, from)
}

/// Select from a table, using its own name as its alias.
pub fn from_table(table: TableName) -> From {
    let alias = make_table_alias(table.0.clone());
    From { table, alias }
}
