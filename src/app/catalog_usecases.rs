use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    app::{
        ports::{Endpoint, UpstreamPort},
        render,
    },
    domain::{
        errors::{DomainError, Result},
        models::{
            CastEntry, CrewEntry, Episode, EpisodesOutput, PeopleOutput, SearchOutput,
            SearchResult, Season, SeasonsOutput, Show, ShowDetailsOutput,
        },
        sanitize::Sanitize,
        types::{PreviewLimit, ResourceId, SearchQuery},
    },
};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ── Requests ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: SearchQuery,
    pub limit: PreviewLimit,
}

#[derive(Debug, Clone)]
pub struct PeopleRequest {
    pub id: ResourceId,
    pub cast_limit: PreviewLimit,
    pub crew_limit: PreviewLimit,
}

#[derive(Debug, Clone)]
pub struct SeasonsRequest {
    pub show_id: ResourceId,
    pub preview_limit: PreviewLimit,
}

#[derive(Debug, Clone)]
pub struct EpisodesRequest {
    pub season_id: ResourceId,
    pub include_guest_cast: bool,
    pub preview_limit: PreviewLimit,
}

/// Rendered plaintext plus the full structured value it summarizes.
#[derive(Debug, Clone)]
pub struct ToolOutput<T> {
    pub text: String,
    pub data: T,
}

impl<T> ToolOutput<T> {
    fn rendered(data: T, render: impl FnOnce(&T) -> String) -> Self {
        let text = render(&data);
        Self { text, data }
    }
}

// ── Use cases ─────────────────────────────────────────────────────────────────

pub struct CatalogUseCases {
    upstream: Arc<dyn UpstreamPort>,
    request_timeout: Duration,
}

impl CatalogUseCases {
    pub fn new(upstream: Arc<dyn UpstreamPort>) -> Self {
        Self::with_timeout(upstream, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(upstream: Arc<dyn UpstreamPort>, request_timeout: Duration) -> Self {
        Self {
            upstream,
            request_timeout,
        }
    }

    pub async fn search(&self, request: SearchRequest) -> Result<ToolOutput<SearchOutput>> {
        let endpoint = Endpoint::SearchShows {
            query: request.query.clone(),
        };
        // Entries past the limit are dropped before validation.
        let raw = match self.fetch(&endpoint).await? {
            Value::Array(mut items) => {
                items.truncate(request.limit.get());
                Value::Array(items)
            }
            other => other,
        };
        let results: Vec<SearchResult> = validate(raw)?;
        let output = SearchOutput {
            query: request.query.to_string(),
            results: results.sanitize(),
        };
        Ok(ToolOutput::rendered(output, render::search))
    }

    pub async fn show(&self, id: ResourceId) -> Result<ToolOutput<ShowDetailsOutput>> {
        let show: Show = self.load(&Endpoint::Show { id }).await?;
        Ok(ToolOutput::rendered(
            ShowDetailsOutput { show },
            render::show_details,
        ))
    }

    pub async fn people(&self, request: PeopleRequest) -> Result<ToolOutput<PeopleOutput>> {
        let id = request.id;
        let cast_endpoint = Endpoint::ShowCast { id };
        let crew_endpoint = Endpoint::ShowCrew { id };
        let (cast, crew) = tokio::join!(self.fetch(&cast_endpoint), self.fetch(&crew_endpoint));
        let (raw_cast, raw_crew) = join_both(cast, crew)?;

        let output = PeopleOutput {
            show_id: id.get(),
            cast: validate::<Vec<CastEntry>>(raw_cast)?,
            crew: validate::<Vec<CrewEntry>>(raw_crew)?,
        };
        Ok(ToolOutput::rendered(output, |o| {
            render::people(o, request.cast_limit, request.crew_limit)
        }))
    }

    pub async fn seasons(&self, request: SeasonsRequest) -> Result<ToolOutput<SeasonsOutput>> {
        let seasons: Vec<Season> = self
            .load(&Endpoint::ShowSeasons {
                show_id: request.show_id,
            })
            .await?;
        let output = SeasonsOutput {
            show_id: request.show_id.get(),
            seasons,
        };
        Ok(ToolOutput::rendered(output, |o| {
            render::seasons(o, request.preview_limit)
        }))
    }

    pub async fn episodes(&self, request: EpisodesRequest) -> Result<ToolOutput<EpisodesOutput>> {
        let mut episodes: Vec<Episode> = self
            .load(&Endpoint::SeasonEpisodes {
                season_id: request.season_id,
                embed_guest_cast: request.include_guest_cast,
            })
            .await?;
        if !request.include_guest_cast {
            for episode in &mut episodes {
                episode.embedded = None;
            }
        }
        let output = EpisodesOutput {
            season_id: request.season_id.get(),
            include_guest_cast: request.include_guest_cast,
            episodes,
        };
        Ok(ToolOutput::rendered(output, |o| {
            render::episodes(o, request.preview_limit)
        }))
    }

    /// One upstream call bounded by the per-call timeout. The timer is owned by
    /// this future and dropped with it once the call settles either way.
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value> {
        match tokio::time::timeout(self.request_timeout, self.upstream.get_json(endpoint)).await {
            Ok(result) => {
                if let Err(e) = &result {
                    tracing::warn!(path = %endpoint.path(), "upstream call failed: {}", e);
                }
                result
            }
            Err(_) => {
                tracing::warn!(
                    path = %endpoint.path(),
                    timeout_ms = self.request_timeout.as_millis() as u64,
                    "upstream call timed out"
                );
                Err(DomainError::Timeout)
            }
        }
    }

    async fn load<T>(&self, endpoint: &Endpoint) -> Result<T>
    where
        T: DeserializeOwned + Sanitize,
    {
        let raw = self.fetch(endpoint).await?;
        Ok(validate::<T>(raw)?.sanitize())
    }
}

fn validate<T: DeserializeOwned>(raw: Value) -> Result<T> {
    serde_json::from_value(raw).map_err(|e| DomainError::Decode(e.to_string()))
}

/// Combine the halves of a dual fetch. The operation waits for both halves to
/// settle, each within its own timeout, before deciding. A 404 on either side
/// wins; otherwise the first failure in (cast, crew) order is reported.
fn join_both(cast: Result<Value>, crew: Result<Value>) -> Result<(Value, Value)> {
    match (cast, crew) {
        (Ok(cast), Ok(crew)) => Ok((cast, crew)),
        (Err(e @ DomainError::NotFound(_)), _) | (_, Err(e @ DomainError::NotFound(_))) => Err(e),
        (Err(e), _) | (_, Err(e)) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_both_prefers_not_found() {
        let not_found = || DomainError::NotFound("TV show with ID 1 was not found".into());
        let upstream = || DomainError::Upstream {
            source_label: "TVMaze cast endpoint".into(),
            status: 500,
        };

        assert!(matches!(
            join_both(Err(upstream()), Err(not_found())),
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(
            join_both(Ok(json!([])), Err(not_found())),
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(
            join_both(Err(DomainError::Timeout), Ok(json!([]))),
            Err(DomainError::Timeout)
        ));
        assert!(matches!(
            join_both(Err(upstream()), Err(DomainError::Timeout)),
            Err(DomainError::Upstream { status: 500, .. })
        ));
        assert!(join_both(Ok(json!([])), Ok(json!([]))).is_ok());
    }

    #[test]
    fn test_validate_reports_decode_error() {
        let err = validate::<Vec<Show>>(json!([{ "id": "nope" }])).unwrap_err();
        assert!(matches!(err, DomainError::Decode(_)), "{:?}", err);
    }
}
