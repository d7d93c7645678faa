//! Helpers for processing the filter request and building the descriptor.

use query_engine_metadata::metadata;

/// How deep a field path may reach into the association graph unless configured otherwise.
pub const DEFAULT_MAX_ASSOCIATION_DEPTH: usize = 16;

/// Tunables for the translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The maximum number of associations a single field path may cross.
    pub max_association_depth: usize,
    /// Use ILIKE rather than LIKE for text search.
    pub case_insensitive_search: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_association_depth: DEFAULT_MAX_ASSOCIATION_DEPTH,
            case_insensitive_search: false,
        }
    }
}

/// Static information for a single translation.
#[derive(Debug, Clone, Copy)]
pub struct Env<'a> {
    /// The associations of the root entity.
    pub associations: &'a metadata::AssociationGraph,
    pub settings: &'a Settings,
}

impl<'a> Env<'a> {
    pub fn new(associations: &'a metadata::AssociationGraph, settings: &'a Settings) -> Env<'a> {
        Env {
            associations,
            settings,
        }
    }
}
