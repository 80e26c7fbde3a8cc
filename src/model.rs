use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Highest value accepted for importance and urgency.
pub const MAX_SCORE: u8 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: u64,
    pub description: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub advice: String,
    #[serde(default, deserialize_with = "deserialize_score")]
    pub importance: u8,
    #[serde(default, deserialize_with = "deserialize_score")]
    pub urgency: u8,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Input for creating a task. Scores and advice come from enrichment, or default to unrated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub description: String,
    pub project: Option<String>,
    pub tag: Option<String>,
    pub advice: String,
    pub importance: u8,
    pub urgency: u8,
}

impl Task {
    /// Ranking weight: urgency counts double importance. Unrated fields contribute 0.
    pub fn score(&self) -> u32 {
        u32::from(self.urgency) * 2 + u32::from(self.importance)
    }

    pub fn is_pending(&self) -> bool {
        !self.done
    }

    pub fn matches(&self, project: Option<&str>, tag: Option<&str>) -> bool {
        project.is_none_or(|p| self.project.as_deref() == Some(p))
            && tag.is_none_or(|t| self.tag.as_deref() == Some(t))
    }
}

impl NewTask {
    /// Trim text fields, drop empty labels and clamp scores into range.
    pub fn normalize(&mut self) {
        let trimmed = self.description.trim();
        if trimmed.len() != self.description.len() {
            self.description = trimmed.to_string();
        }
        self.project = normalize_label(self.project.take());
        self.tag = normalize_label(self.tag.take());
        self.advice = self.advice.trim().to_string();
        self.importance = self.importance.min(MAX_SCORE);
        self.urgency = self.urgency.min(MAX_SCORE);
    }
}

/// Scores arrive as integers, floats or quoted numbers. Anything else rates 0;
/// values are rounded and clamped to `0..=MAX_SCORE`.
pub fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let raw = match &value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(raw
        .filter(|v| v.is_finite())
        .map(|v| v.round().clamp(0.0, f64::from(MAX_SCORE)) as u8)
        .unwrap_or(0))
}

/// Free text where null or a non-string value reads as empty.
pub fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        _ => String::new(),
    })
}

fn normalize_label(label: Option<String>) -> Option<String> {
    label
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
}
