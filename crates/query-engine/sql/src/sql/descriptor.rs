//! The engine-ready description of a filtered query.

use super::ast;
use super::convert;
use super::helpers;
use super::string;

/// Whether the query returns the matching entities or only how many there are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Fetch,
    Count,
}

/// Predicate, ordering, joins and pagination for a query against a root entity.
///
/// A descriptor does not name its root entity: the caller that picked the association graph
/// supplies it again when the descriptor is rendered or executed.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    pub mode: Mode,
    pub predicate: ast::Expression,
    pub order_by: ast::OrderBy,
    pub joins: Vec<ast::Join>,
    pub limit: ast::Limit,
}

impl QueryDescriptor {
    /// The descriptor of an unfiltered, unordered, unpaginated query.
    pub fn everything(mode: Mode) -> Self {
        QueryDescriptor {
            mode,
            predicate: helpers::empty_where(),
            order_by: helpers::empty_order_by(),
            joins: vec![],
            limit: helpers::empty_limit(),
        }
    }

    /// Whether the predicate filters anything out.
    pub fn matches_all(&self) -> bool {
        self.predicate == helpers::true_expr()
    }

    /// Build a SELECT against the root entity's table.
    ///
    /// Bare columns in the descriptor belong to the root entity, so they are qualified with
    /// its alias to keep them apart from same-named columns of joined entities.
    ///
    /// Count queries select `COUNT(*)` and leave out ordering and pagination: the count is a
    /// single row, and it covers every matching entity.
    pub fn to_select(&self, root_table: &ast::TableName) -> ast::Select {
        let from = helpers::from_table(root_table.clone());
        let root = from.alias.clone();
        let mut select = match self.mode {
            Mode::Fetch => helpers::star_select(from),
            Mode::Count => helpers::count_select(from),
        };

        select.joins = self
            .joins
            .iter()
            .map(|join| ast::Join {
                on: helpers::qualify_columns(join.on.clone(), &root),
                ..join.clone()
            })
            .collect();
        select.where_ = ast::Where(helpers::qualify_columns(self.predicate.clone(), &root));

        if self.mode == Mode::Fetch {
            select.order_by = ast::OrderBy {
                elements: self
                    .order_by
                    .elements
                    .iter()
                    .map(|element| ast::OrderByElement {
                        target: helpers::qualify_columns(element.target.clone(), &root),
                        direction: element.direction,
                    })
                    .collect(),
            };
            select.limit = self.limit.clone();
        }

        select
    }

    /// Render the descriptor as a parameterized SQL query.
    pub fn query_sql(&self, root_table: &ast::TableName) -> string::SQL {
        convert::select_to_sql(&self.to_select(root_table))
    }
}
