/// Per-request overrides supplied outside the body (HTTP headers).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOverrides {
    pub model: Option<String>,
    pub prompt_version: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    pub model: Option<String>,
    pub prompt_version: Option<u32>,
    pub force: bool,
    pub overrides: GenerationOverrides,
}

/// Model and prompt version a request will actually run with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGeneration {
    pub model_override: Option<String>,
    pub model: String,
    pub prompt_version: u32,
    pub force: bool,
}
