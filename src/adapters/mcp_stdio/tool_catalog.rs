use serde::Serialize;
use serde_json::{json, Value};

use crate::app::catalog_usecases::{CatalogUseCases, ToolOutput};
use crate::domain::errors::DomainError;

use super::tool_args::{episodes_request, people_request, req_id, search_request, seasons_request};
use super::MAX_FRAME_BYTES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CatalogTool {
    SearchShows,
    ShowDetails,
    ShowPeople,
    ShowSeasons,
    SeasonEpisodes,
}

impl CatalogTool {
    pub(super) const ALL: [CatalogTool; 5] = [
        CatalogTool::SearchShows,
        CatalogTool::ShowDetails,
        CatalogTool::ShowPeople,
        CatalogTool::ShowSeasons,
        CatalogTool::SeasonEpisodes,
    ];

    pub(super) fn name(self) -> &'static str {
        match self {
            CatalogTool::SearchShows => "search_tv_shows",
            CatalogTool::ShowDetails => "get_tv_show",
            CatalogTool::ShowPeople => "get_tv_show_people",
            CatalogTool::ShowSeasons => "get_tv_show_seasons",
            CatalogTool::SeasonEpisodes => "get_season_episodes",
        }
    }

    pub(super) fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }
}

/// Validate arguments, run the use case and wrap the result for MCP.
///
/// Arguments are fully parsed before the use case runs, so invalid input never
/// reaches the upstream.
pub(super) async fn handle_catalog_tool(
    tool: CatalogTool,
    args: &Value,
    uc: &CatalogUseCases,
) -> Result<Value, DomainError> {
    tracing::debug!(tool = tool.name(), "tool call");
    match tool {
        CatalogTool::SearchShows => tool_success(uc.search(search_request(args)?).await?),
        CatalogTool::ShowDetails => tool_success(uc.show(req_id(args, "id")?).await?),
        CatalogTool::ShowPeople => tool_success(uc.people(people_request(args)?).await?),
        CatalogTool::ShowSeasons => tool_success(uc.seasons(seasons_request(args)?).await?),
        CatalogTool::SeasonEpisodes => tool_success(uc.episodes(episodes_request(args)?).await?),
    }
}

fn tool_success<T: Serialize>(output: ToolOutput<T>) -> Result<Value, DomainError> {
    let structured = serde_json::to_value(&output.data)?;
    let size = output.text.len() + structured.to_string().len();
    if size > MAX_FRAME_BYTES {
        return Err(DomainError::Decode(format!(
            "tool output too large: {} bytes (max {})",
            size, MAX_FRAME_BYTES
        )));
    }
    Ok(json!({
        "content": [{
            "type": "text",
            "text": output.text
        }],
        "structuredContent": structured
    }))
}
