use serde_json::{json, Value};

use super::tool_catalog::CatalogTool;
use crate::domain::types::PreviewLimit;

fn nullable(kind: &str) -> Value {
    json!({ "type": [kind, "null"] })
}

fn limit_param(description: &str) -> Value {
    json!({
        "type": "integer",
        "minimum": PreviewLimit::MIN,
        "maximum": PreviewLimit::MAX,
        "default": PreviewLimit::DEFAULT,
        "description": description
    })
}

fn id_param(description: &str) -> Value {
    json!({ "type": "integer", "exclusiveMinimum": 0, "description": description })
}

fn rating_schema() -> Value {
    json!({
        "type": ["object", "null"],
        "properties": { "average": nullable("number") },
        "required": ["average"]
    })
}

fn image_schema() -> Value {
    json!({
        "type": ["object", "null"],
        "properties": {
            "medium": nullable("string"),
            "original": nullable("string")
        }
    })
}

fn country_schema() -> Value {
    json!({
        "type": ["object", "null"],
        "properties": {
            "name": nullable("string"),
            "code": nullable("string"),
            "timezone": nullable("string")
        }
    })
}

fn channel_schema() -> Value {
    json!({
        "type": ["object", "null"],
        "properties": {
            "id": { "type": "integer" },
            "name": { "type": "string" },
            "country": country_schema()
        },
        "required": ["id", "name"]
    })
}

fn show_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "integer" },
            "name": { "type": "string" },
            "url": { "type": "string" },
            "type": nullable("string"),
            "language": nullable("string"),
            "genres": { "type": "array", "items": { "type": "string" } },
            "status": nullable("string"),
            "premiered": nullable("string"),
            "officialSite": nullable("string"),
            "rating": rating_schema(),
            "summary": nullable("string")
        },
        "required": ["id", "name", "url", "genres"]
    })
}

fn person_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "integer" },
            "name": { "type": "string" },
            "url": { "type": "string" },
            "country": country_schema(),
            "birthday": nullable("string"),
            "deathday": nullable("string"),
            "gender": nullable("string"),
            "image": image_schema()
        },
        "required": ["id", "name"],
        "additionalProperties": true
    })
}

fn cast_entry_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "person": person_schema(),
            "character": {
                "type": ["object", "null"],
                "properties": {
                    "id": { "type": "integer" },
                    "name": { "type": "string" },
                    "url": { "type": "string" },
                    "image": image_schema()
                },
                "required": ["id", "name"],
                "additionalProperties": true
            },
            "self": { "type": "boolean" },
            "voice": { "type": "boolean" }
        },
        "required": ["person"]
    })
}

fn season_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "integer" },
            "number": nullable("integer"),
            "name": nullable("string"),
            "episodeOrder": nullable("integer"),
            "premiereDate": nullable("string"),
            "endDate": nullable("string"),
            "network": channel_schema(),
            "webChannel": channel_schema(),
            "image": image_schema(),
            "summary": nullable("string")
        },
        "required": ["id", "number", "name"]
    })
}

fn episode_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "integer" },
            "name": { "type": "string" },
            "season": { "type": "integer" },
            "number": nullable("integer"),
            "airdate": nullable("string"),
            "airtime": nullable("string"),
            "airstamp": nullable("string"),
            "runtime": nullable("integer"),
            "rating": rating_schema(),
            "summary": nullable("string"),
            "image": image_schema(),
            "_embedded": {
                "type": ["object", "null"],
                "properties": {
                    "guestcast": {
                        "type": ["array", "null"],
                        "items": cast_entry_schema()
                    }
                }
            }
        },
        "required": ["id", "name", "season"]
    })
}

fn tool_schema(tool: CatalogTool) -> Value {
    match tool {
        CatalogTool::SearchShows => json!({
            "name": tool.name(),
            "title": "Search TV Shows",
            "description": "Find shows using the TVMaze search API",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "query": { "type": "string", "minLength": 1, "description": "Search query" },
                    "limit": limit_param("Maximum number of shows to return (1-20)")
                },
                "required": ["query"]
            },
            "outputSchema": {
                "type": "object",
                "properties": {
                    "query": { "type": "string" },
                    "results": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "score": { "type": "number" },
                                "show": show_schema()
                            },
                            "required": ["score", "show"]
                        }
                    }
                },
                "required": ["query", "results"]
            }
        }),
        CatalogTool::ShowDetails => json!({
            "name": tool.name(),
            "title": "Get TV Show by ID",
            "description": "Retrieve TV show metadata from TVMaze using its numeric ID",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "id": id_param("TVMaze show ID, e.g. https://api.tvmaze.com/shows/{id}")
                },
                "required": ["id"]
            },
            "outputSchema": {
                "type": "object",
                "properties": { "show": show_schema() },
                "required": ["show"]
            }
        }),
        CatalogTool::ShowPeople => json!({
            "name": tool.name(),
            "title": "Get TV Show Cast & Crew",
            "description": "Fetch cast and crew information for a given TVMaze show ID",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "id": id_param("TVMaze show ID, e.g. https://api.tvmaze.com/shows/{id}"),
                    "castLimit": limit_param("Number of cast entries to highlight in plaintext output"),
                    "crewLimit": limit_param("Number of crew entries to highlight in plaintext output")
                },
                "required": ["id"]
            },
            "outputSchema": {
                "type": "object",
                "properties": {
                    "showId": { "type": "integer" },
                    "cast": { "type": "array", "items": cast_entry_schema() },
                    "crew": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "type": { "type": "string" },
                                "person": person_schema()
                            },
                            "required": ["type", "person"]
                        }
                    }
                },
                "required": ["showId", "cast", "crew"]
            }
        }),
        CatalogTool::ShowSeasons => json!({
            "name": tool.name(),
            "title": "Get TV Show Seasons",
            "description": "List all seasons for a TVMaze show ID",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "showId": id_param("TVMaze show ID e.g. /shows/{id}"),
                    "previewLimit": limit_param("Number of seasons to highlight in plaintext output")
                },
                "required": ["showId"]
            },
            "outputSchema": {
                "type": "object",
                "properties": {
                    "showId": { "type": "integer" },
                    "seasons": { "type": "array", "items": season_schema() }
                },
                "required": ["showId", "seasons"]
            }
        }),
        CatalogTool::SeasonEpisodes => json!({
            "name": tool.name(),
            "title": "Get Season Episodes",
            "description": "List episodes for a TVMaze season ID, optionally including guest cast information",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "seasonId": id_param("TVMaze season ID e.g. /seasons/{id}"),
                    "includeGuestCast": { "type": "boolean", "default": false },
                    "previewLimit": limit_param("Number of episodes to highlight in plaintext output")
                },
                "required": ["seasonId"]
            },
            "outputSchema": {
                "type": "object",
                "properties": {
                    "seasonId": { "type": "integer" },
                    "includeGuestCast": { "type": "boolean" },
                    "episodes": { "type": "array", "items": episode_schema() }
                },
                "required": ["seasonId", "includeGuestCast", "episodes"]
            }
        }),
    }
}

pub(super) fn tools_schema() -> Value {
    let tools: Vec<Value> = CatalogTool::ALL.into_iter().map(tool_schema).collect();
    json!({ "tools": tools })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_five_tools_with_schemas() {
        let schema = tools_schema();
        let tools = schema["tools"].as_array().unwrap();
        let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
        assert_eq!(
            names,
            [
                "search_tv_shows",
                "get_tv_show",
                "get_tv_show_people",
                "get_tv_show_seasons",
                "get_season_episodes"
            ]
        );
        for tool in tools {
            assert_eq!(tool["inputSchema"]["type"], "object");
            assert_eq!(tool["outputSchema"]["type"], "object");
        }
    }

    #[test]
    fn test_limit_params_are_bounded() {
        let schema = tools_schema();
        let search = &schema["tools"][0]["inputSchema"]["properties"]["limit"];
        assert_eq!(search["minimum"], 1);
        assert_eq!(search["maximum"], 20);
        assert_eq!(search["default"], 5);
    }
}
