//! Plan a filter request and execute it.

use tracing::{info_span, Instrument};

use query_engine_metadata::metadata::AssociationProvider;
use query_engine_sql::sql::descriptor::Mode;
use query_engine_translation::translation;
use query_engine_translation::translation::helpers::Settings;
use query_engine_translation::translation::query::FilterRequest;

use crate::engine::QueryEngine;
use crate::error::Error;

/// What a query returns, depending on its mode.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Rows(Vec<serde_json::Value>),
    Count(u64),
}

/// Translate a filter request for `entity` and run it on the engine.
pub async fn execute<E, P>(
    engine: &E,
    provider: &P,
    entity: &str,
    request: Option<FilterRequest>,
    mode: Mode,
    settings: &Settings,
) -> Result<QueryResult, Error>
where
    E: QueryEngine + ?Sized,
    P: AssociationProvider + ?Sized,
{
    let descriptor = async {
        translation::query::translate_for_entity(provider, entity, request, mode, settings)
            .map_err(|err| {
                tracing::error!("{}", err);
                Error::Translation(err)
            })
    }
    .instrument(info_span!("Plan query"))
    .await?;

    async {
        let result = match mode {
            Mode::Fetch => engine.fetch(entity, &descriptor).await.map(QueryResult::Rows),
            Mode::Count => engine.count(entity, &descriptor).await.map(QueryResult::Count),
        };
        result.map_err(|err| {
            tracing::error!("{}", err);
            Error::Engine(err)
        })
    }
    .instrument(info_span!("Execute query", entity))
    .await
}
