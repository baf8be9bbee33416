//! Plaintext summaries of normalized tool outputs.
//!
//! Preview limits only shorten the rendered bullet lists; header counts always
//! reflect the full structured lists.

use crate::domain::{
    models::{
        CastEntry, CrewEntry, Episode, EpisodesOutput, PeopleOutput, Rating, SearchOutput, Season,
        SeasonsOutput, Show, ShowDetailsOutput,
    },
    types::PreviewLimit,
};

const NO_RESULTS: &str = "No results";
const NONE_LISTED: &str = "- None listed";
const NONE_FOUND: &str = "- None found";

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn show_block(show: &Show, header: String) -> String {
    let genres = if show.genres.is_empty() {
        "n/a".to_string()
    } else {
        show.genres.join(", ")
    };

    [
        Some(header),
        Some(format!("Genres: {}", genres)),
        non_empty(show.language.as_deref()).map(|v| format!("Language: {}", v)),
        non_empty(show.status.as_deref()).map(|v| format!("Status: {}", v)),
        Rating::truthy_average(show.rating.as_ref()).map(|avg| format!("Rating: {}", avg)),
        non_empty(show.premiered.as_deref()).map(|v| format!("Premiered: {}", v)),
        non_empty(show.official_site.as_deref()).map(|v| format!("Official Site: {}", v)),
        Some(format!("URL: {}", show.url)),
        non_empty(show.summary.as_deref()).map(|v| format!("Summary: {}", v)),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join("\n")
}

/// Two-decimal score with ties rounded away from zero (0.125 -> "0.13").
fn score_label(score: f64) -> String {
    format!("{:.2}", (score * 100.0).round() / 100.0)
}

pub fn search(output: &SearchOutput) -> String {
    if output.results.is_empty() {
        return NO_RESULTS.to_string();
    }
    output
        .results
        .iter()
        .map(|result| {
            show_block(
                &result.show,
                format!("{} (score {})", result.show.name, score_label(result.score)),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn show_details(output: &ShowDetailsOutput) -> String {
    let show = &output.show;
    show_block(show, format!("{} (ID {})", show.name, show.id))
}

fn cast_line(entry: &CastEntry) -> String {
    let role = entry
        .character
        .as_ref()
        .and_then(|c| non_empty(Some(c.name.as_str())))
        .map(|name| format!(" as {}", name))
        .unwrap_or_default();
    let extras = entry
        .flags()
        .map(|flags| format!(" ({})", flags))
        .unwrap_or_default();
    format!("- {}{}{}", entry.person.name, role, extras)
}

fn crew_line(entry: &CrewEntry) -> String {
    format!("- {} — {}", entry.person.name, entry.role)
}

fn bullets<T>(items: &[T], limit: PreviewLimit, line: impl Fn(&T) -> String, empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    items
        .iter()
        .take(limit.get())
        .map(line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn people(output: &PeopleOutput, cast_limit: PreviewLimit, crew_limit: PreviewLimit) -> String {
    [
        format!("Cast ({} total):", output.cast.len()),
        bullets(&output.cast, cast_limit, cast_line, NONE_LISTED),
        String::new(),
        format!("Crew ({} total):", output.crew.len()),
        bullets(&output.crew, crew_limit, crew_line, NONE_LISTED),
    ]
    .join("\n")
}

fn season_line(season: &Season) -> String {
    let label = match season.number {
        Some(n) => format!("Season {}", n),
        None => "Season".to_string(),
    };
    let title = non_empty(season.name.as_deref())
        .map(|name| format!(" — {}", name))
        .unwrap_or_default();
    let premiere = non_empty(season.premiere_date.as_deref());
    let end = non_empty(season.end_date.as_deref());
    let dates = if premiere.is_some() || end.is_some() {
        format!(" ({} – {})", premiere.unwrap_or("?"), end.unwrap_or("?"))
    } else {
        String::new()
    };
    let episodes = season
        .episode_order
        .map(|count| format!(" • {} episodes", count))
        .unwrap_or_default();
    format!("- {}{}{}{}", label, title, dates, episodes)
}

pub fn seasons(output: &SeasonsOutput, preview: PreviewLimit) -> String {
    [
        format!(
            "Seasons for show {} ({} total):",
            output.show_id,
            output.seasons.len()
        ),
        bullets(&output.seasons, preview, season_line, NONE_FOUND),
    ]
    .join("\n")
}

fn episode_line(episode: &Episode, include_guest_cast: bool) -> String {
    let number = match episode.number {
        Some(n) => format!("E{:02}", n),
        None => "Episode".to_string(),
    };
    let name = non_empty(Some(episode.name.as_str())).unwrap_or("Untitled");
    let airdate = non_empty(episode.airdate.as_deref()).unwrap_or("?");
    let rating = episode
        .rating
        .as_ref()
        .and_then(|r| r.average)
        .map(|avg| format!(" • Rating: {}", avg))
        .unwrap_or_default();
    let guests = episode
        .guest_cast()
        .filter(|_| include_guest_cast)
        .map(|cast| format!(" • Guest Cast: {}", cast.len()))
        .unwrap_or_default();
    format!("- {}: {} ({}){}{}", number, name, airdate, rating, guests)
}

pub fn episodes(output: &EpisodesOutput, preview: PreviewLimit) -> String {
    let include_guest_cast = output.include_guest_cast;
    [
        format!(
            "Episodes for season {} ({} total):",
            output.season_id,
            output.episodes.len()
        ),
        bullets(
            &output.episodes,
            preview,
            |episode| episode_line(episode, include_guest_cast),
            NONE_FOUND,
        ),
    ]
    .join("\n")
}
