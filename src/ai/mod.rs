//! Optional AI enrichment.
//!
//! Every call returns an [`Enrichment`]. A missing credential, a network
//! failure or an unusable reply all collapse into [`Enrichment::Unavailable`],
//! and callers carry on without the extra text.

pub mod gemini;
pub mod prompts;

use serde::Deserialize;

use crate::config::AiConfig;
use crate::model::{Task, deserialize_score, deserialize_text};

pub use gemini::GeminiAdvisor;

/// Outcome of an enrichment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment<T> {
    Available(T),
    Unavailable,
}

impl<T> Enrichment<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Available(v) => Some(v),
            Self::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Enrichment<U> {
        match self {
            Self::Available(v) => Enrichment::Available(f(v)),
            Self::Unavailable => Enrichment::Unavailable,
        }
    }
}

impl<T: Default> Enrichment<T> {
    pub fn unwrap_or_default(self) -> T {
        self.into_option().unwrap_or_default()
    }
}

impl<T> From<Option<T>> for Enrichment<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Available(v),
            None => Self::Unavailable,
        }
    }
}

/// Advice and scores for a new task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Analysis {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub advice: String,
    #[serde(default, deserialize_with = "deserialize_score")]
    pub importance: u8,
    #[serde(default, deserialize_with = "deserialize_score")]
    pub urgency: u8,
}

pub trait Advisor {
    /// Suggest advice and rate importance/urgency for a task about to be added.
    fn analyze(
        &self,
        description: &str,
        project: Option<&str>,
        tag: Option<&str>,
    ) -> Enrichment<Analysis>;

    /// A short motivational line for the task picked by `next`.
    fn encourage(&self, task: &Task) -> Enrichment<String>;

    /// An overview of a task list.
    fn summarize(&self, tasks: &[Task]) -> Enrichment<String>;
}

/// Advisor that never produces anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAdvisor;

impl Advisor for NoopAdvisor {
    fn analyze(&self, _: &str, _: Option<&str>, _: Option<&str>) -> Enrichment<Analysis> {
        Enrichment::Unavailable
    }

    fn encourage(&self, _: &Task) -> Enrichment<String> {
        Enrichment::Unavailable
    }

    fn summarize(&self, _: &[Task]) -> Enrichment<String> {
        Enrichment::Unavailable
    }
}

/// Pick the advisor for this run.
pub fn advisor_from_config(config: &AiConfig) -> Box<dyn Advisor> {
    if config.enabled {
        Box::new(GeminiAdvisor::new(config.clone()))
    } else {
        Box::new(NoopAdvisor)
    }
}
