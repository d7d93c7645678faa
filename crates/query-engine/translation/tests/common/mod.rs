use std::fs;
use std::path::PathBuf;

use query_engine_metadata::metadata;
use query_engine_sql::sql;
use query_engine_translation::translation;

/// The root entity every golden request is made against.
const ROOT_ENTITY: &str = "Post";

/// Translate a golden request, render it to SQL, and return the text for the snapshot.
pub fn test_translation(testname: &str, mode: sql::descriptor::Mode) -> anyhow::Result<String> {
    let goldenfiles = PathBuf::from("tests/goldenfiles");

    let metadata: metadata::Metadata =
        serde_json::from_str(&fs::read_to_string(goldenfiles.join("metadata.json"))?)?;
    let request: Option<translation::query::FilterRequest> = serde_json::from_str(
        &fs::read_to_string(goldenfiles.join(testname).join("request.json"))?,
    )?;

    let descriptor = translation::query::translate_for_entity(
        &metadata,
        ROOT_ENTITY,
        request,
        mode,
        &translation::helpers::Settings::default(),
    )?;

    let query = descriptor.query_sql(&sql::ast::TableName(ROOT_ENTITY.to_string()));
    let params: Vec<(usize, &sql::string::Param)> = query
        .params
        .iter()
        .enumerate()
        .map(|(i, p)| (i + 1, p))
        .collect();

    Ok(format!("{}\n\n{:?}", query.sql, params))
}
