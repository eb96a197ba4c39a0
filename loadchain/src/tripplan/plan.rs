//! Structured trip plans parsed from generated free text.

use serde::Serialize;

/// At most this many entries are kept per extracted list.
const MAX_LIST_ENTRIES: usize = 5;

/// A driver-facing trip plan for one ranked chain.
///
/// The generation service returns prose; this type keeps the full text and
/// pulls out the lines a UI most often wants to surface separately.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    /// 1-based rank of the chain this plan describes.
    pub chain_rank: usize,

    /// Opening paragraph of the generated plan.
    pub summary: String,

    /// The full generated plan text.
    pub detailed_plan: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration_hours: Option<f64>,

    pub recommendations: Vec<String>,
    pub potential_issues: Vec<String>,
    pub fuel_stops: Vec<String>,
    pub rest_stops: Vec<String>,
}

impl TripPlan {
    /// Extract a structured plan from generated text.
    ///
    /// The extraction is a keyword scan, deliberately forgiving: generated
    /// prose varies too much for anything stricter to be worth it.
    pub fn from_text(chain_rank: usize, text: &str) -> Self {
        let mut recommendations = Vec::new();
        let mut potential_issues = Vec::new();
        let mut fuel_stops = Vec::new();
        let mut rest_stops = Vec::new();
        let mut estimated_duration_hours = None;

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let lower = trimmed.to_lowercase();

            if lower.contains("fuel") || lower.contains("gas") {
                fuel_stops.push(trimmed.to_string());
            }
            if lower.contains("rest") || lower.contains("sleep") || lower.contains("hotel") {
                rest_stops.push(trimmed.to_string());
            }
            if lower.contains("issue") || lower.contains("challenge") || lower.contains("warning")
            {
                potential_issues.push(trimmed.to_string());
            }
            if lower.contains("recommend") || lower.contains("tip") || lower.contains("suggest") {
                recommendations.push(trimmed.to_string());
            }
            if estimated_duration_hours.is_none()
                && lower.contains("hour")
                && (lower.contains("total") || lower.contains("estimate"))
            {
                estimated_duration_hours = extract_hours(&lower);
            }
        }

        recommendations.truncate(MAX_LIST_ENTRIES);
        potential_issues.truncate(MAX_LIST_ENTRIES);
        fuel_stops.truncate(MAX_LIST_ENTRIES);
        rest_stops.truncate(MAX_LIST_ENTRIES);

        Self {
            chain_rank,
            summary: summary_of(text),
            detailed_plan: text.to_string(),
            estimated_duration_hours,
            recommendations,
            potential_issues,
            fuel_stops,
            rest_stops,
        }
    }
}

/// First paragraph of the text, or its first 200 characters when the text
/// has no paragraph break.
fn summary_of(text: &str) -> String {
    match text.split_once("\n\n") {
        Some((first, _)) => first.to_string(),
        None => text.chars().take(200).collect(),
    }
}

/// Pull the number out of phrases like "total driving time: 26 hours".
fn extract_hours(lower: &str) -> Option<f64> {
    let tokens: Vec<&str> = lower.split_whitespace().collect();
    for (i, token) in tokens.iter().enumerate() {
        if !token.starts_with("hour") || i == 0 {
            continue;
        }
        let value = tokens[i - 1].trim_matches(|c: char| !c.is_ascii_digit() && c != '.');
        if let Ok(hours) = value.parse::<f64>() {
            return Some(hours);
        }
    }
    None
}
