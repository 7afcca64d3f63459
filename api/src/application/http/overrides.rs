use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use swasth_core::domain::generation::value_objects::GenerationOverrides;
use tracing::warn;

pub const MODEL_HEADER: &str = "x-model";
pub const PROMPT_VERSION_HEADER: &str = "x-prompt-version";

/// Model and prompt-version overrides carried in request headers.
/// Header values win over the body.
#[derive(Debug, Clone, Default)]
pub struct HeaderOverrides(pub GenerationOverrides);

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

pub fn overrides_from_headers(headers: &HeaderMap) -> GenerationOverrides {
    let prompt_version = header_str(headers, PROMPT_VERSION_HEADER).and_then(|raw| {
        match raw.parse::<u32>() {
            Ok(version) if version > 0 => Some(version),
            _ => {
                warn!(value = raw, "ignoring unparseable x-prompt-version header");
                None
            }
        }
    });

    GenerationOverrides {
        model: header_str(headers, MODEL_HEADER).map(str::to_string),
        prompt_version,
    }
}

impl<S> FromRequestParts<S> for HeaderOverrides
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(HeaderOverrides(overrides_from_headers(&parts.headers)))
    }
}
