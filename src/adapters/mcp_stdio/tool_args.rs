use serde_json::Value;

use crate::app::catalog_usecases::{EpisodesRequest, PeopleRequest, SearchRequest, SeasonsRequest};
use crate::domain::errors::DomainError;
use crate::domain::types::{PreviewLimit, ResourceId, SearchQuery};

fn present<'a>(args: &'a Value, key: &str) -> Option<&'a Value> {
    args.get(key).filter(|v| !v.is_null())
}

/// Integral JSON number, accepting `3.0` as well as `3`.
fn integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn req_integer(args: &Value, key: &str) -> Result<i64, DomainError> {
    let value =
        present(args, key).ok_or_else(|| DomainError::InvalidInput(format!("'{}' is required", key)))?;
    integer(value)
        .ok_or_else(|| DomainError::InvalidInput(format!("'{}' must be an integer", key)))
}

pub(super) fn req_id(args: &Value, key: &str) -> Result<ResourceId, DomainError> {
    ResourceId::new(key, req_integer(args, key)?)
}

pub(super) fn limit_opt(args: &Value, key: &str) -> Result<PreviewLimit, DomainError> {
    if present(args, key).is_none() {
        return Ok(PreviewLimit::default());
    }
    PreviewLimit::new(key, req_integer(args, key)?)
}

pub(super) fn bool_opt(args: &Value, key: &str, default: bool) -> Result<bool, DomainError> {
    match present(args, key) {
        None => Ok(default),
        Some(value) => value
            .as_bool()
            .ok_or_else(|| DomainError::InvalidInput(format!("'{}' must be a boolean", key))),
    }
}

pub(super) fn req_query(args: &Value, key: &str) -> Result<SearchQuery, DomainError> {
    let raw = present(args, key)
        .ok_or_else(|| DomainError::InvalidInput(format!("'{}' is required", key)))?
        .as_str()
        .ok_or_else(|| DomainError::InvalidInput(format!("'{}' must be a string", key)))?;
    SearchQuery::new(raw)
}

pub(super) fn search_request(args: &Value) -> Result<SearchRequest, DomainError> {
    Ok(SearchRequest {
        query: req_query(args, "query")?,
        limit: limit_opt(args, "limit")?,
    })
}

pub(super) fn people_request(args: &Value) -> Result<PeopleRequest, DomainError> {
    Ok(PeopleRequest {
        id: req_id(args, "id")?,
        cast_limit: limit_opt(args, "castLimit")?,
        crew_limit: limit_opt(args, "crewLimit")?,
    })
}

pub(super) fn seasons_request(args: &Value) -> Result<SeasonsRequest, DomainError> {
    Ok(SeasonsRequest {
        show_id: req_id(args, "showId")?,
        preview_limit: limit_opt(args, "previewLimit")?,
    })
}

pub(super) fn episodes_request(args: &Value) -> Result<EpisodesRequest, DomainError> {
    Ok(EpisodesRequest {
        season_id: req_id(args, "seasonId")?,
        include_guest_cast: bool_opt(args, "includeGuestCast", false)?,
        preview_limit: limit_opt(args, "previewLimit")?,
    })
}
