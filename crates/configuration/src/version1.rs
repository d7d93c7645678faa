//! The version 1 configuration format.

use std::path::Path;

use schemars::{schema::RootSchema, JsonSchema};
use serde::{Deserialize, Serialize};
use tokio::fs;

use query_engine_metadata::metadata;
use query_engine_translation::translation::helpers::DEFAULT_MAX_ASSOCIATION_DEPTH;

use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};

pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const CONFIGURATION_JSONSCHEMA_FILENAME: &str = "schema.json";

/// The configuration as it is stored on disk.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParsedConfiguration {
    /// Which version of the configuration format are we using
    pub version: Version,
    /// The entities that can be queried and how they are associated.
    #[serde(default)]
    pub metadata: metadata::Metadata,
    #[serde(default)]
    #[serde(skip_serializing_if = "TranslationSettings::is_default")]
    pub settings: TranslationSettings,
}

impl ParsedConfiguration {
    pub fn empty() -> Self {
        ParsedConfiguration {
            version: Version::This,
            metadata: metadata::Metadata::empty(),
            settings: TranslationSettings::default(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize, JsonSchema)]
pub enum Version {
    #[serde(rename = "1")]
    This,
}

/// Settings that tune how filter requests are translated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TranslationSettings {
    /// The maximum number of associations a single field path may cross
    #[serde(default = "max_association_depth_default")]
    pub max_association_depth: usize,
    /// Match search terms with ILIKE instead of LIKE
    #[serde(default)]
    pub case_insensitive_search: bool,
}

impl TranslationSettings {
    fn is_default(&self) -> bool {
        *self == TranslationSettings::default()
    }
}

impl Default for TranslationSettings {
    fn default() -> TranslationSettings {
        TranslationSettings {
            max_association_depth: DEFAULT_MAX_ASSOCIATION_DEPTH,
            case_insensitive_search: false,
        }
    }
}

// for serde default //
fn max_association_depth_default() -> usize {
    TranslationSettings::default().max_association_depth
}

/// Just enough of the file to check which format it is in.
#[derive(Deserialize)]
struct VersionTag {
    version: Option<serde_json::Value>,
}

/// Parse the configuration format from a directory.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    let configuration_file_contents =
        fs::read_to_string(&configuration_file)
            .await
            .map_err(|err| {
                ParseConfigurationError::IoErrorButStringified(format!(
                    "{}: {}",
                    &configuration_file.display(),
                    err
                ))
            })?;

    let located = |error: serde_json::Error| ParseConfigurationError::ParseError {
        file_path: configuration_file.clone(),
        line: error.line(),
        column: error.column(),
        message: error.to_string(),
    };

    let tag: VersionTag = serde_json::from_str(&configuration_file_contents).map_err(located)?;
    match tag.version {
        Some(serde_json::Value::String(version)) if version == "1" => {}
        None => {
            return Err(ParseConfigurationError::DidNotFindExpectedVersionTag {
                file_path: configuration_file.clone(),
            })
        }
        Some(version) => {
            return Err(ParseConfigurationError::UnsupportedVersion {
                file_path: configuration_file.clone(),
                version: version.to_string(),
            })
        }
    }

    let parsed_config: ParsedConfiguration =
        serde_json::from_str(&configuration_file_contents).map_err(located)?;

    tracing::debug!(
        "Parsed configuration with {} entities from {}",
        parsed_config.metadata.entities.0.len(),
        configuration_file.display()
    );

    Ok(parsed_config)
}

/// Write the parsed configuration into a directory on disk, along with its JSON schema.
pub async fn write_parsed_configuration(
    parsed_config: ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let configuration_file = out_dir.as_ref().to_owned().join(CONFIGURATION_FILENAME);
    fs::create_dir_all(out_dir.as_ref()).await?;

    // create the configuration file
    fs::write(
        configuration_file,
        serde_json::to_string_pretty(&parsed_config)
            .map_err(|e| WriteParsedConfigurationError::IoError(e.into()))?
            + "\n",
    )
    .await?;

    // create the jsonschema file
    let configuration_jsonschema_file_path = out_dir
        .as_ref()
        .to_owned()
        .join(CONFIGURATION_JSONSCHEMA_FILENAME);

    fs::write(
        &configuration_jsonschema_file_path,
        serde_json::to_string_pretty(&configuration_schema())
            .map_err(|e| WriteParsedConfigurationError::IoError(e.into()))?
            + "\n",
    )
    .await?;

    Ok(())
}

/// The JSON schema of the configuration file.
pub fn configuration_schema() -> RootSchema {
    schemars::schema_for!(ParsedConfiguration)
}
