//! Translate an incoming `FilterRequest`.

pub mod associations;
pub mod filtering;
pub mod pagination;
pub mod search;
pub mod sorting;
pub mod values;

use serde::Deserialize;

use query_engine_metadata::metadata;
use query_engine_sql::sql;
use query_engine_sql::sql::descriptor::{Mode, QueryDescriptor};

use crate::translation::error::Error;
use crate::translation::helpers::{Env, Settings};

/// The filter object a caller sends alongside a request for a list of entities.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    /// A query object; see [`filtering`].
    #[serde(default)]
    pub query: Option<serde_json::Value>,
    /// A term to look for, which replaces `query` when non-empty.
    #[serde(default)]
    pub search: Option<search::SearchTerm>,
    #[serde(default)]
    pub search_fields: Option<search::SearchFields>,
    #[serde(default)]
    pub sort: Option<sorting::SortSpec>,
    #[serde(default)]
    pub limit: Option<serde_json::Value>,
    #[serde(default)]
    pub offset: Option<serde_json::Value>,
}

/// Translate a filter request against the associations of the root entity.
///
/// No request at all yields the descriptor of an unfiltered query.
pub fn translate(
    associations: &metadata::AssociationGraph,
    request: Option<FilterRequest>,
    mode: Mode,
    settings: &Settings,
) -> Result<QueryDescriptor, Error> {
    let Some(request) = request else {
        return Ok(QueryDescriptor::everything(mode));
    };
    let env = Env::new(associations, settings);

    let predicate = match request.search.as_ref().and_then(search::SearchTerm::text) {
        Some(term) => search::translate_search(&env, term, request.search_fields.as_ref())?,
        None => match &request.query {
            None => sql::helpers::empty_where(),
            Some(query) => filtering::translate_query(query)?,
        },
    };

    let (order_by, joins) = sorting::translate_order_by(&env, request.sort.as_ref())?;

    let limit = pagination::translate_limit(request.limit.as_ref(), request.offset.as_ref());

    let descriptor = QueryDescriptor {
        mode,
        predicate,
        order_by,
        joins,
        limit,
    };

    tracing::debug!("Query descriptor: {:?}", descriptor);
    Ok(descriptor)
}

/// Translate a filter request for an entity known to the association provider.
pub fn translate_for_entity<P>(
    provider: &P,
    entity: &str,
    request: Option<FilterRequest>,
    mode: Mode,
    settings: &Settings,
) -> Result<QueryDescriptor, Error>
where
    P: metadata::AssociationProvider + ?Sized,
{
    let associations = provider
        .association_graph(entity)
        .ok_or_else(|| Error::EntityNotFound(entity.to_string()))?;
    translate(associations, request, mode, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use query_engine_metadata::metadata::{
        AssociationGraph, EntitiesInfo, EntityDescriptor, EntityInfo,
    };
    use serde_json::json;
    use similar_asserts::assert_eq;

    fn blog() -> AssociationGraph {
        AssociationGraph::empty()
            .with_association(
                "author",
                EntityDescriptor::new("Author")
                    .with_column_mapping("author_id", "id")
                    .with_association(
                        "country",
                        EntityDescriptor::new("Country").with_column_mapping("country_id", "id"),
                    ),
            )
            .with_association(
                "editor",
                EntityDescriptor::new("Author").with_column_mapping("editor_id", "id"),
            )
    }

    fn request(value: serde_json::Value) -> Option<FilterRequest> {
        serde_json::from_value(value).unwrap()
    }

    fn order(descriptor: &QueryDescriptor) -> Vec<(String, sql::ast::OrderByDirection)> {
        descriptor
            .order_by
            .elements
            .iter()
            .map(|element| {
                let name = match &element.target {
                    sql::ast::Expression::ColumnReference(sql::ast::ColumnReference::Column(
                        column,
                    )) => column.0.clone(),
                    sql::ast::Expression::ColumnReference(
                        sql::ast::ColumnReference::AliasedColumn { table, name },
                    ) => format!("{}.{}", table.name, name.0),
                    other => panic!("unexpected order by target {other:?}"),
                };
                (name, element.direction)
            })
            .collect()
    }

    fn tables(descriptor: &QueryDescriptor) -> Vec<&str> {
        descriptor
            .joins
            .iter()
            .map(|join| join.table.0.as_str())
            .collect()
    }

    #[test]
    fn sorting_across_associations() {
        let descriptor = translate(
            &blog(),
            request(json!({
                "query": {},
                "sort": "-votes title author.name -author.country.name"
            })),
            Mode::Fetch,
            &Settings::default(),
        )
        .unwrap();

        assert_eq!(
            order(&descriptor),
            vec![
                ("votes".to_string(), sql::ast::OrderByDirection::Desc),
                ("title".to_string(), sql::ast::OrderByDirection::Asc),
                ("author.name".to_string(), sql::ast::OrderByDirection::Asc),
                (
                    "author.country.name".to_string(),
                    sql::ast::OrderByDirection::Desc
                ),
            ]
        );
        assert_eq!(tables(&descriptor), vec!["Author", "Country"]);
        assert!(descriptor.matches_all());
    }

    #[test]
    fn associations_to_the_same_entity_are_joined_separately() {
        let descriptor = translate(
            &blog(),
            request(json!({ "sort": ["author.name", "editor.name", "author.email"] })),
            Mode::Fetch,
            &Settings::default(),
        )
        .unwrap();

        assert_eq!(tables(&descriptor), vec!["Author", "Author"]);
        assert_eq!(descriptor.joins[1].alias.name, "editor");
    }

    #[test]
    fn pagination_only() {
        let descriptor = translate(
            &blog(),
            request(json!({ "limit": 5, "offset": 10 })),
            Mode::Fetch,
            &Settings::default(),
        )
        .unwrap();

        assert_eq!(
            descriptor,
            QueryDescriptor {
                limit: sql::ast::Limit {
                    limit: Some(5),
                    offset: Some(10),
                },
                ..QueryDescriptor::everything(Mode::Fetch)
            }
        );
    }

    #[test]
    fn search_replaces_the_query() {
        let with_query = translate(
            &blog(),
            request(json!({
                "search": "walter",
                "searchFields": ["title", "content"],
                "query": { "votes": { "$gt": 3 } }
            })),
            Mode::Fetch,
            &Settings::default(),
        )
        .unwrap();
        let without_query = translate(
            &blog(),
            request(json!({ "search": "walter", "searchFields": "title content" })),
            Mode::Fetch,
            &Settings::default(),
        )
        .unwrap();

        assert_eq!(with_query, without_query);
        assert!(matches!(
            with_query.predicate,
            sql::ast::Expression::Or { .. }
        ));
    }

    #[test]
    fn search_without_fields_matches_nothing() {
        let descriptor = translate(
            &blog(),
            request(json!({ "search": "walter" })),
            Mode::Fetch,
            &Settings::default(),
        )
        .unwrap();

        assert_eq!(descriptor.predicate, sql::helpers::false_expr());
    }

    #[test]
    fn empty_search_falls_back_to_the_query() {
        let descriptor = translate(
            &blog(),
            request(json!({ "search": "", "searchFields": ["title"], "query": { "votes": 1 } })),
            Mode::Fetch,
            &Settings::default(),
        )
        .unwrap();

        assert!(matches!(
            descriptor.predicate,
            sql::ast::Expression::BinaryOperation { .. }
        ));
    }

    #[test]
    fn search_of_the_wrong_type_is_ignored() {
        let descriptor = translate(
            &blog(),
            request(json!({ "search": 5, "searchFields": 7, "query": { "votes": 1 } })),
            Mode::Fetch,
            &Settings::default(),
        )
        .unwrap();

        assert!(matches!(
            descriptor.predicate,
            sql::ast::Expression::BinaryOperation { .. }
        ));

        let descriptor = translate(
            &blog(),
            request(json!({ "search": "walter", "searchFields": 7 })),
            Mode::Fetch,
            &Settings::default(),
        )
        .unwrap();

        assert_eq!(descriptor.predicate, sql::helpers::false_expr());
    }

    #[test]
    fn no_request_in_count_mode() {
        let descriptor = translate(&blog(), request(json!(null)), Mode::Count, &Settings::default())
            .unwrap();

        assert_eq!(descriptor, QueryDescriptor::everything(Mode::Count));
    }

    #[test]
    fn count_keeps_ordering_and_pagination() {
        let descriptor = translate(
            &blog(),
            request(json!({ "sort": "-editor.name", "limit": 3 })),
            Mode::Count,
            &Settings::default(),
        )
        .unwrap();

        assert_eq!(descriptor.mode, Mode::Count);
        assert_eq!(descriptor.order_by.elements.len(), 1);
        assert_eq!(descriptor.joins.len(), 1);
        assert_eq!(descriptor.limit.limit, Some(3));
    }

    #[test]
    fn unresolved_sort_fails_the_translation() {
        assert_eq!(
            translate(
                &blog(),
                request(json!({ "sort": "title -publisher.name" })),
                Mode::Fetch,
                &Settings::default(),
            ),
            Err(Error::UnresolvedAssociation {
                association: "publisher".to_string(),
                path: "publisher.name".to_string(),
            })
        );
    }

    #[test]
    fn malformed_sort_is_ignored() {
        let descriptor = translate(
            &blog(),
            request(json!({ "sort": 42 })),
            Mode::Fetch,
            &Settings::default(),
        )
        .unwrap();

        assert_eq!(descriptor, QueryDescriptor::everything(Mode::Fetch));
    }

    #[test]
    fn entities_are_looked_up_through_the_provider() {
        let mut entities = EntitiesInfo::default();
        entities.0.insert(
            "Post".to_string(),
            EntityInfo {
                description: None,
                associations: blog(),
            },
        );

        let descriptor = translate_for_entity(
            &entities,
            "Post",
            request(json!({ "sort": "author.name" })),
            Mode::Fetch,
            &Settings::default(),
        )
        .unwrap();
        assert_eq!(tables(&descriptor), vec!["Author"]);

        assert_eq!(
            translate_for_entity(&entities, "Comment", None, Mode::Fetch, &Settings::default()),
            Err(Error::EntityNotFound("Comment".to_string()))
        );
    }
}
