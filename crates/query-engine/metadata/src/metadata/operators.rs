//! The operators understood in a filter request's `query` object.

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The complete list of supported comparison operators.
///
/// These must be kept in sync with the documentation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Sequence,
    Serialize,
    Deserialize,
    JsonSchema,
)]
pub enum ComparisonOperator {
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    In,
    NotIn,
    Like,
    NotLike,
    CaseInsensitiveLike,
    NotCaseInsensitiveLike,
}

impl ComparisonOperator {
    /// The name of the operator as it appears in a query object.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Equals => "$eq",
            Self::NotEquals => "$ne",
            Self::LessThan => "$lt",
            Self::LessThanOrEqualTo => "$lte",
            Self::GreaterThan => "$gt",
            Self::GreaterThanOrEqualTo => "$gte",
            Self::In => "$in",
            Self::NotIn => "$nin",
            Self::Like => "$like",
            Self::NotLike => "$notLike",
            Self::CaseInsensitiveLike => "$iLike",
            Self::NotCaseInsensitiveLike => "$notILike",
        }
    }

    /// Lookup an operator by its query object name.
    pub fn from_name(name: &str) -> Option<Self> {
        enum_iterator::all::<ComparisonOperator>().find(|operator| operator.name() == name)
    }
}

impl std::fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Operators combining several sub-queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn name(&self) -> &'static str {
        match self {
            Self::And => "$and",
            Self::Or => "$or",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        enum_iterator::all::<LogicalOperator>().find(|operator| operator.name() == name)
    }
}
