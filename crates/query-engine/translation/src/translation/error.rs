//! Errors for query translation.

/// A type for translation errors.
///
/// All of these are caused by the request or the configuration, so retrying the same
/// translation will fail in the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Entity '{0}' not found.")]
    EntityNotFound(String),
    #[error("Association '{association}' not found while resolving field '{path}'.")]
    UnresolvedAssociation { association: String, path: String },
    #[error("Field path '{0}' is malformed.")]
    MalformedFieldPath(String),
    #[error("Field '{path}' crosses more than {max_depth} associations.")]
    AssociationDepthExceeded { path: String, max_depth: usize },
    #[error("Search field '{0}' is not a column of the queried entity.")]
    UnsupportedSearchField(String),
    #[error("Unknown query operator '{0}'.")]
    UnknownOperator(String),
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}
