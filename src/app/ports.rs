use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{
    errors::{DomainError, Result},
    types::{ResourceId, SearchQuery},
};

// ── Ports ─────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait UpstreamPort: Send + Sync {
    /// Issue one GET against the upstream catalog and return the parsed JSON body.
    ///
    /// Implementations map a 404 to [`Endpoint::not_found`], other non-success
    /// statuses to [`DomainError::Upstream`] and unparsable bodies to
    /// [`DomainError::Decode`]. The per-call timeout is applied by the caller.
    async fn get_json(&self, endpoint: &Endpoint) -> Result<Value>;
}

// ── Transfer objects ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    SearchShows { query: SearchQuery },
    Show { id: ResourceId },
    ShowCast { id: ResourceId },
    ShowCrew { id: ResourceId },
    ShowSeasons { show_id: ResourceId },
    SeasonEpisodes { season_id: ResourceId, embed_guest_cast: bool },
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::SearchShows { .. } => "/search/shows".to_string(),
            Endpoint::Show { id } => format!("/shows/{}", id),
            Endpoint::ShowCast { id } => format!("/shows/{}/cast", id),
            Endpoint::ShowCrew { id } => format!("/shows/{}/crew", id),
            Endpoint::ShowSeasons { show_id } => format!("/shows/{}/seasons", show_id),
            Endpoint::SeasonEpisodes { season_id, .. } => format!("/seasons/{}/episodes", season_id),
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::SearchShows { query } => vec![("q", query.as_str().to_string())],
            Endpoint::SeasonEpisodes {
                embed_guest_cast: true,
                ..
            } => vec![("embed", "guestcast".to_string())],
            _ => Vec::new(),
        }
    }

    /// Label used in upstream status errors.
    pub fn source_label(&self) -> &'static str {
        match self {
            Endpoint::SearchShows { .. } | Endpoint::Show { .. } => "TVMaze",
            Endpoint::ShowCast { .. } => "TVMaze cast endpoint",
            Endpoint::ShowCrew { .. } => "TVMaze crew endpoint",
            Endpoint::ShowSeasons { .. } => "TVMaze seasons endpoint",
            Endpoint::SeasonEpisodes { .. } => "TVMaze episodes endpoint",
        }
    }

    /// Error for a 404 answer. Search has no addressed resource, so a 404
    /// there is an ordinary upstream status failure.
    pub fn not_found(&self) -> DomainError {
        match self {
            Endpoint::Show { id } | Endpoint::ShowCast { id } | Endpoint::ShowCrew { id } => {
                DomainError::NotFound(format!("TV show with ID {} was not found", id))
            }
            Endpoint::ShowSeasons { show_id } => {
                DomainError::NotFound(format!("TV show with ID {} was not found", show_id))
            }
            Endpoint::SeasonEpisodes { season_id, .. } => {
                DomainError::NotFound(format!("Season with ID {} was not found", season_id))
            }
            Endpoint::SearchShows { .. } => self.status_error(404),
        }
    }

    pub fn status_error(&self, status: u16) -> DomainError {
        DomainError::Upstream {
            source_label: self.source_label().to_string(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: i64) -> ResourceId {
        ResourceId::new("id", raw).unwrap()
    }

    #[test]
    fn test_endpoint_paths_and_queries() {
        let search = Endpoint::SearchShows {
            query: SearchQuery::new("girls").unwrap(),
        };
        assert_eq!(search.path(), "/search/shows");
        assert_eq!(search.query(), vec![("q", "girls".to_string())]);

        assert_eq!(Endpoint::Show { id: id(1) }.path(), "/shows/1");
        assert_eq!(Endpoint::ShowCast { id: id(1) }.path(), "/shows/1/cast");
        assert_eq!(Endpoint::ShowCrew { id: id(1) }.path(), "/shows/1/crew");
        assert_eq!(
            Endpoint::ShowSeasons { show_id: id(1) }.path(),
            "/shows/1/seasons"
        );

        let plain = Endpoint::SeasonEpisodes {
            season_id: id(4),
            embed_guest_cast: false,
        };
        assert_eq!(plain.path(), "/seasons/4/episodes");
        assert!(plain.query().is_empty());

        let embedded = Endpoint::SeasonEpisodes {
            season_id: id(4),
            embed_guest_cast: true,
        };
        assert_eq!(embedded.query(), vec![("embed", "guestcast".to_string())]);
    }

    #[test]
    fn test_not_found_mentions_identifier() {
        match (Endpoint::Show { id: id(1) }).not_found() {
            DomainError::NotFound(msg) => assert_eq!(msg, "TV show with ID 1 was not found"),
            e => panic!("expected NotFound, got {:?}", e),
        }
        match (Endpoint::SeasonEpisodes {
            season_id: id(77),
            embed_guest_cast: false,
        })
        .not_found()
        {
            DomainError::NotFound(msg) => assert!(msg.contains("77")),
            e => panic!("expected NotFound, got {:?}", e),
        }
    }

    #[test]
    fn test_search_404_is_upstream_status() {
        let search = Endpoint::SearchShows {
            query: SearchQuery::new("x").unwrap(),
        };
        match search.not_found() {
            DomainError::Upstream { status, .. } => assert_eq!(status, 404),
            e => panic!("expected Upstream, got {:?}", e),
        }
        assert_eq!(
            (Endpoint::ShowCrew { id: id(2) }).status_error(502).to_string(),
            "TVMaze crew endpoint responded with 502"
        );
    }
}
