use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::sanitize::{sanitize, Sanitize};

/// Upstream fields that must hold absolute URLs.
mod url_field {
    use serde::{de::Error, Deserialize, Deserializer};

    fn check<E: Error>(raw: String) -> Result<String, E> {
        match reqwest::Url::parse(&raw) {
            Ok(_) => Ok(raw),
            Err(e) => Err(E::custom(format!("invalid url '{}': {}", raw, e))),
        }
    }

    pub(super) fn required<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        check(String::deserialize(deserializer)?)
    }

    pub(super) fn optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(check)
            .transpose()
    }

    /// May be missing, but an explicit `null` is rejected.
    pub(super) fn omittable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        required(deserializer).map(Some)
    }
}

// ── Shared sub-objects ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(deserialize_with = "Option::deserialize")]
    pub average: Option<f64>,
}

impl Rating {
    /// Average treated as present only when it is non-zero.
    pub fn truthy_average(rating: Option<&Rating>) -> Option<f64> {
        rating
            .and_then(|r| r.average)
            .filter(|avg| *avg != 0.0 && !avg.is_nan())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default, deserialize_with = "url_field::optional")]
    pub medium: Option<String>,
    #[serde(default, deserialize_with = "url_field::optional")]
    pub original: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(deserialize_with = "Option::deserialize")]
    pub name: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub code: Option<String>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub timezone: Option<String>,
}

/// Network or web channel a season aired on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: u64,
    pub name: String,
    pub country: Option<Country>,
}

// ── Show ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    pub id: u64,
    pub name: String,
    #[serde(deserialize_with = "url_field::required")]
    pub url: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub language: Option<String>,
    pub genres: Vec<String>,
    pub status: Option<String>,
    pub premiered: Option<String>,
    #[serde(default, deserialize_with = "url_field::optional")]
    pub official_site: Option<String>,
    pub rating: Option<Rating>,
    pub summary: Option<String>,
}

impl Sanitize for Show {
    fn sanitize(mut self) -> Self {
        self.summary = sanitize(self.summary.as_deref());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub score: f64,
    pub show: Show,
}

impl Sanitize for SearchResult {
    fn sanitize(mut self) -> Self {
        self.show = self.show.sanitize();
        self
    }
}

// ── People ────────────────────────────────────────────────────────────────────

/// Person record. Undeclared upstream fields are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "url_field::omittable",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
    #[serde(default)]
    pub country: Option<Country>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub deathday: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Character record. Undeclared upstream fields are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "url_field::omittable",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastEntry {
    pub person: Person,
    pub character: Option<Character>,
    #[serde(rename = "self", default)]
    pub is_self: bool,
    #[serde(default)]
    pub voice: bool,
}

impl CastEntry {
    /// Comma-joined subset of `self` / `voice`, if any flag is set.
    pub fn flags(&self) -> Option<String> {
        let flags: Vec<&str> = [(self.is_self, "self"), (self.voice, "voice")]
            .into_iter()
            .filter_map(|(set, label)| set.then_some(label))
            .collect();
        if flags.is_empty() {
            None
        } else {
            Some(flags.join(", "))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewEntry {
    #[serde(rename = "type")]
    pub role: String,
    pub person: Person,
}

// ── Seasons & episodes ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: u64,
    #[serde(deserialize_with = "Option::deserialize")]
    pub number: Option<u32>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub name: Option<String>,
    pub episode_order: Option<u32>,
    pub premiere_date: Option<String>,
    pub end_date: Option<String>,
    pub network: Option<Channel>,
    pub web_channel: Option<Channel>,
    pub image: Option<Image>,
    pub summary: Option<String>,
}

impl Sanitize for Season {
    fn sanitize(mut self) -> Self {
        self.summary = sanitize(self.summary.as_deref());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeEmbedded {
    pub guestcast: Option<Vec<CastEntry>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u64,
    pub name: String,
    pub season: u32,
    pub number: Option<u32>,
    pub airdate: Option<String>,
    pub airtime: Option<String>,
    pub airstamp: Option<String>,
    pub runtime: Option<u32>,
    pub rating: Option<Rating>,
    pub summary: Option<String>,
    pub image: Option<Image>,
    #[serde(rename = "_embedded")]
    pub embedded: Option<EpisodeEmbedded>,
}

impl Episode {
    pub fn guest_cast(&self) -> Option<&[CastEntry]> {
        self.embedded.as_ref()?.guestcast.as_deref()
    }
}

impl Sanitize for Episode {
    fn sanitize(mut self) -> Self {
        self.summary = sanitize(self.summary.as_deref());
        self
    }
}

// ── Tool outputs ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutput {
    pub query: String,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowDetailsOutput {
    pub show: Show,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeopleOutput {
    pub show_id: u64,
    pub cast: Vec<CastEntry>,
    pub crew: Vec<CrewEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonsOutput {
    pub show_id: u64,
    pub seasons: Vec<Season>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodesOutput {
    pub season_id: u64,
    pub include_guest_cast: bool,
    pub episodes: Vec<Episode>,
}

// ── tests ─────────────────────────────────────────────────────────────────────
