//! Resolve dotted field paths through the association graph into column references and joins.

use indexmap::IndexMap;

use query_engine_metadata::metadata;
use query_engine_sql::sql;

use crate::translation::error::Error;
use crate::translation::helpers::Env;

/// A field reference as written in a request, split on dots.
///
/// Every segment but the last names an association; the last one names a column of the
/// entity reached through them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Split the path into the associations it crosses and its leaf column.
    fn split_leaf(&self) -> Result<(&[String], &str), Error> {
        match self.0.split_last() {
            Some((leaf, associations))
                if !leaf.is_empty() && associations.iter().all(|segment| !segment.is_empty()) =>
            {
                Ok((associations, leaf))
            }
            _ => Err(Error::MalformedFieldPath(self.to_string())),
        }
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        FieldPath(path.split('.').map(str::to_string).collect())
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// A field path resolved against the association graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    /// A bare column for a single-segment path, a column qualified by the alias of the last
    /// join otherwise.
    pub reference: sql::ast::Expression,
    /// The joins needed to bring the referenced column into scope, outermost first.
    pub joins: Vec<sql::ast::Join>,
}

/// Resolve a field path against the root entity's associations.
///
/// Nothing is returned on failure, so a caller collecting joins from several paths never
/// sees a partial chain.
pub fn resolve_field_path(env: &Env, path: &FieldPath) -> Result<ResolvedField, Error> {
    let (associations, leaf) = path.split_leaf()?;

    if associations.len() > env.settings.max_association_depth {
        return Err(Error::AssociationDepthExceeded {
            path: path.to_string(),
            max_depth: env.settings.max_association_depth,
        });
    }

    let mut graph = env.associations;
    let mut joins = Vec::with_capacity(associations.len());
    let mut parent: Option<sql::ast::TableAlias> = None;

    for (depth, association) in associations.iter().enumerate() {
        let descriptor = graph
            .get(association)
            .ok_or_else(|| Error::UnresolvedAssociation {
                association: association.clone(),
                path: path.to_string(),
            })?;

        let alias = sql::helpers::make_table_alias(associations[..=depth].join("."));

        joins.push(sql::ast::Join {
            table: sql::ast::TableName(descriptor.entity.to_string()),
            alias: alias.clone(),
            on: translate_column_mapping(parent.as_ref(), &alias, descriptor),
        });

        parent = Some(alias);
        graph = &descriptor.associations;
    }

    let reference = match parent {
        None => sql::helpers::make_column(leaf.to_string()),
        Some(alias) => {
            tracing::debug!("Resolved '{}' through {} joins", path, joins.len());
            sql::helpers::make_aliased_column(alias, leaf.to_string())
        }
    };

    Ok(ResolvedField { reference, joins })
}

/// Given an association, turn its column mapping into the condition of its join.
///
/// The parent is the join we came from, or the root entity when there is none.
fn translate_column_mapping(
    parent: Option<&sql::ast::TableAlias>,
    alias: &sql::ast::TableAlias,
    descriptor: &metadata::EntityDescriptor,
) -> sql::ast::Expression {
    let conditions = descriptor
        .column_mapping
        .iter()
        .map(|(source_column, target_column)| {
            let source = match parent {
                None => sql::helpers::make_column(source_column.clone()),
                Some(parent) => {
                    sql::helpers::make_aliased_column(parent.clone(), source_column.clone())
                }
            };
            sql::ast::Expression::BinaryOperation {
                left: Box::new(source),
                operator: sql::ast::BinaryOperator::Equals,
                right: Box::new(sql::helpers::make_aliased_column(
                    alias.clone(),
                    target_column.clone(),
                )),
            }
        })
        .collect();

    sql::helpers::conjunction(conditions)
}

/// Accumulates joins from several resolved fields, keeping one join per association path in
/// the order they were first requested.
#[derive(Debug, Default)]
pub struct JoinCollector {
    joins: IndexMap<String, sql::ast::Join>,
}

impl JoinCollector {
    pub fn extend(&mut self, joins: Vec<sql::ast::Join>) {
        for join in joins {
            self.joins.entry(join.alias.name.clone()).or_insert(join);
        }
    }

    pub fn len(&self) -> usize {
        self.joins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joins.is_empty()
    }

    pub fn into_joins(self) -> Vec<sql::ast::Join> {
        self.joins.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::helpers::Settings;
    use query_engine_metadata::metadata::{AssociationGraph, EntityDescriptor};
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
            .with_association("editor", EntityDescriptor::new("Author"))
    }

    fn resolve(path: &str) -> Result<ResolvedField, Error> {
        let graph = blog();
        let settings = Settings::default();
        resolve_field_path(&Env::new(&graph, &settings), &FieldPath::from(path))
    }

    fn aliases(joins: &[sql::ast::Join]) -> Vec<&str> {
        joins.iter().map(|join| join.alias.name.as_str()).collect()
    }

    #[test]
    fn single_segment_is_a_bare_column() {
        let resolved = resolve("title").unwrap();
        assert_eq!(
            resolved,
            ResolvedField {
                reference: sql::helpers::make_column("title".to_string()),
                joins: vec![],
            }
        );
    }

    #[test]
    fn bare_column_may_share_a_name_with_an_association() {
        let resolved = resolve("author").unwrap();
        assert_eq!(
            resolved.reference,
            sql::helpers::make_column("author".to_string())
        );
        assert!(resolved.joins.is_empty());
    }

    #[test]
    fn nested_path_joins_every_association_on_the_way() {
        let resolved = resolve("author.country.name").unwrap();

        assert_eq!(
            resolved.reference,
            sql::helpers::make_aliased_column(
                sql::helpers::make_table_alias("author.country".to_string()),
                "name".to_string()
            )
        );
        assert_eq!(aliases(&resolved.joins), vec!["author", "author.country"]);
        assert_eq!(
            resolved.joins[1],
            sql::ast::Join {
                table: sql::ast::TableName("Country".to_string()),
                alias: sql::helpers::make_table_alias("author.country".to_string()),
                on: sql::ast::Expression::BinaryOperation {
                    left: Box::new(sql::helpers::make_aliased_column(
                        sql::helpers::make_table_alias("author".to_string()),
                        "country_id".to_string()
                    )),
                    operator: sql::ast::BinaryOperator::Equals,
                    right: Box::new(sql::helpers::make_aliased_column(
                        sql::helpers::make_table_alias("author.country".to_string()),
                        "id".to_string()
                    )),
                },
            }
        );
    }

    #[test]
    fn association_without_mapping_joins_unconditionally() {
        let resolved = resolve("editor.name").unwrap();
        assert_eq!(resolved.joins[0].on, sql::helpers::true_expr());
        assert_eq!(resolved.joins[0].table.0, "Author");
    }

    #[test]
    fn unknown_association_is_reported_with_its_path() {
        assert_eq!(
            resolve("author.publisher.name"),
            Err(Error::UnresolvedAssociation {
                association: "publisher".to_string(),
                path: "author.publisher.name".to_string(),
            })
        );
        assert_eq!(
            resolve("reviewer.name"),
            Err(Error::UnresolvedAssociation {
                association: "reviewer".to_string(),
                path: "reviewer.name".to_string(),
            })
        );
    }

    #[test]
    fn empty_segments_are_malformed() {
        for path in ["", "author.", ".name", "author..name"] {
            assert_eq!(
                resolve(path),
                Err(Error::MalformedFieldPath(path.to_string())),
                "{path:?} should be malformed"
            );
        }
    }

    #[test]
    fn depth_is_bounded() {
        let graph = blog();
        let settings = Settings {
            max_association_depth: 1,
            ..Settings::default()
        };
        let env = Env::new(&graph, &settings);

        assert!(resolve_field_path(&env, &FieldPath::from("author.name")).is_ok());
        assert_eq!(
            resolve_field_path(&env, &FieldPath::from("author.country.name")),
            Err(Error::AssociationDepthExceeded {
                path: "author.country.name".to_string(),
                max_depth: 1,
            })
        );
    }

    #[test]
    fn collector_keeps_first_seen_order_without_duplicates() {
        let mut collector = JoinCollector::default();
        collector.extend(resolve("author.name").unwrap().joins);
        collector.extend(resolve("editor.name").unwrap().joins);
        collector.extend(resolve("author.country.name").unwrap().joins);
        collector.extend(resolve("author.email").unwrap().joins);

        assert_eq!(collector.len(), 3);
        assert_eq!(
            aliases(&collector.into_joins()),
            vec!["author", "editor", "author.country"]
        );
    }
}
