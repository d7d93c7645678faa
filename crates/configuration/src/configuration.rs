//! Configuration for translating and executing filter requests.

use query_engine_metadata::metadata;
use query_engine_translation::translation::helpers::Settings;

use crate::error::MakeRuntimeConfigurationError;
use crate::version1::ParsedConfiguration;

/// The 'Configuration' type collects all the information necessary to serve queries at runtime.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration', which also checks what the file format alone cannot express.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub metadata: metadata::Metadata,
    pub settings: Settings,
}

/// Validate a parsed configuration and convert it to its runtime form.
///
/// Association names become segments of dotted field paths, so they must be non-empty and
/// must not contain dots themselves.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    for (entity, info) in &parsed_config.metadata.entities.0 {
        if entity.is_empty() {
            return Err(MakeRuntimeConfigurationError::EmptyEntityName);
        }
        validate_associations(entity, "", &info.associations)?;
    }

    Ok(Configuration {
        metadata: parsed_config.metadata,
        settings: Settings {
            max_association_depth: parsed_config.settings.max_association_depth,
            case_insensitive_search: parsed_config.settings.case_insensitive_search,
        },
    })
}

fn validate_associations(
    entity: &str,
    prefix: &str,
    graph: &metadata::AssociationGraph,
) -> Result<(), MakeRuntimeConfigurationError> {
    for (name, descriptor) in &graph.0 {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        let invalid = |message: &str| MakeRuntimeConfigurationError::InvalidAssociation {
            entity: entity.to_string(),
            path: path.clone(),
            message: message.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("association names must not be empty"));
        }
        if name.contains('.') {
            return Err(invalid("association names must not contain '.'"));
        }
        if descriptor.entity.as_str().is_empty() {
            return Err(invalid("the associated entity must be named"));
        }
        validate_associations(entity, &path, &descriptor.associations)?;
    }
    Ok(())
}
