//! Metadata information regarding entities and the associations between them.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The engine-specific handle of an entity. It is emitted verbatim when the entity is joined.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct EntityName(pub String);

impl EntityName {
    pub fn as_str(&self) -> &str {
        let EntityName(name) = self;
        name
    }
}

impl std::fmt::Display for EntityName {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let EntityName(name) = self;
        write!(f, "{name}")
    }
}

impl From<&str> for EntityName {
    fn from(name: &str) -> Self {
        EntityName(name.to_string())
    }
}

/// Mapping from a root entity name to its information.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct EntitiesInfo(pub BTreeMap<String, EntityInfo>);

impl EntitiesInfo {
    pub fn empty() -> Self {
        EntitiesInfo(BTreeMap::new())
    }
}

/// Information about an entity that can be queried directly.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EntityInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub associations: AssociationGraph,
}

/// Mapping from an association name to the associated entity.
///
/// The graph owns its nested graphs, so it is a tree: an association that points back to an
/// ancestor entity gets its own copy of the descriptor rather than a back-reference.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct AssociationGraph(pub BTreeMap<String, EntityDescriptor>);

impl AssociationGraph {
    pub fn empty() -> Self {
        AssociationGraph(BTreeMap::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lookup an association by name.
    pub fn get(&self, association: &str) -> Option<&EntityDescriptor> {
        self.0.get(association)
    }

    #[must_use]
    pub fn with_association(mut self, association: &str, descriptor: EntityDescriptor) -> Self {
        self.0.insert(association.to_string(), descriptor);
        self
    }
}

/// The entity at the far end of an association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EntityDescriptor {
    pub entity: EntityName,
    /// Columns of the parent entity mapped to the columns of this entity they reference.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub column_mapping: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "AssociationGraph::is_empty")]
    pub associations: AssociationGraph,
}

impl EntityDescriptor {
    pub fn new(entity: &str) -> Self {
        EntityDescriptor {
            entity: EntityName::from(entity),
            column_mapping: BTreeMap::new(),
            associations: AssociationGraph::empty(),
        }
    }

    #[must_use]
    pub fn with_column_mapping(mut self, source_column: &str, target_column: &str) -> Self {
        self.column_mapping
            .insert(source_column.to_string(), target_column.to_string());
        self
    }

    #[must_use]
    pub fn with_association(mut self, association: &str, descriptor: EntityDescriptor) -> Self {
        self.associations = self.associations.with_association(association, descriptor);
        self
    }
}
