use tracing::warn;

use crate::domain::common::entities::app_errors::CoreError;

/// Outcome of a best-effort write made after the primary result is ready.
/// A failure here is reported, never propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    Applied,
    Skipped,
    Failed(String),
}

impl SideEffect {
    pub fn from_result(name: &'static str, result: Result<(), CoreError>) -> Self {
        match result {
            Ok(()) => SideEffect::Applied,
            Err(e) => {
                warn!(side_effect = name, error = %e, "best-effort write failed");
                SideEffect::Failed(e.to_string())
            }
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SideEffect::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideEffectReport {
    pub name: &'static str,
    pub outcome: SideEffect,
}

/// A primary result together with the side effects attempted for it.
#[derive(Debug, Clone)]
pub struct WithSideEffects<T> {
    pub value: T,
    pub side_effects: Vec<SideEffectReport>,
}

impl<T> WithSideEffects<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            side_effects: Vec::new(),
        }
    }

    pub fn record(&mut self, name: &'static str, outcome: SideEffect) {
        self.side_effects.push(SideEffectReport { name, outcome });
    }

    pub fn outcome(&self, name: &str) -> Option<&SideEffect> {
        self.side_effects
            .iter()
            .find(|report| report.name == name)
            .map(|report| &report.outcome)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> WithSideEffects<U> {
        WithSideEffects {
            value: f(self.value),
            side_effects: self.side_effects,
        }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
