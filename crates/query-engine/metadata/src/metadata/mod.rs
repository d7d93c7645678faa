//! Metadata information regarding the entities and their associations.

pub mod associations;
pub mod operators;

// re-export without modules
pub use associations::*;
pub use operators::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Metadata information.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Metadata {
    #[serde(default)]
    pub entities: EntitiesInfo,
}

impl Metadata {
    pub fn empty() -> Self {
        Metadata {
            entities: EntitiesInfo::empty(),
        }
    }
}

/// Supplies the association graph of a root entity.
///
/// Lookups are synchronous and by entity name. The graph is owned by the provider and
/// borrowed for the duration of a translation.
pub trait AssociationProvider {
    fn association_graph(&self, entity: &str) -> Option<&AssociationGraph>;
}

impl AssociationProvider for Metadata {
    fn association_graph(&self, entity: &str) -> Option<&AssociationGraph> {
        self.entities
            .0
            .get(entity)
            .map(|entity_info| &entity_info.associations)
    }
}

impl AssociationProvider for EntitiesInfo {
    fn association_graph(&self, entity: &str) -> Option<&AssociationGraph> {
        self.0.get(entity).map(|entity_info| &entity_info.associations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_provides_graph_of_known_entities_only() {
        let metadata: Metadata = serde_json::from_value(serde_json::json!({
            "entities": {
                "posts": {
                    "associations": {
                        "author": { "entity": "users" }
                    }
                }
            }
        }))
        .unwrap();

        let graph = metadata.association_graph("posts").unwrap();
        assert_eq!(
            graph.get("author").map(|author| author.entity.as_str()),
            Some("users")
        );
        assert!(metadata.association_graph("comments").is_none());
    }
}
