//! PageSpeed Insights API client.
//!
//! One call per device strategy, mobile first, a fixed pause between them.
//! Any transport error or non-200 answer is caught and recorded as an error
//! string in that strategy's result slot; the other strategy is unaffected.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::config::{
    DEFAULT_USER_AGENT, PAGESPEED_CATEGORIES, PAGESPEED_ENDPOINT, PAGESPEED_TIMEOUT_SECS,
    STRATEGY_DELAY,
};

/// Device strategy the Lighthouse pass emulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Mobile,
    Desktop,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Mobile => "mobile",
            Strategy::Desktop => "desktop",
        }
    }
}

/// Per-strategy results; one slot per device strategy.
#[derive(Debug, Serialize)]
pub struct PagespeedReport {
    pub mobile: StrategyOutcome,
    pub desktop: StrategyOutcome,
}

/// Either extracted scores or the error that prevented them.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StrategyOutcome {
    Scores(StrategyScores),
    Error { error: String },
}

/// Lighthouse category scores (0-100) plus the named audit values.
#[derive(Debug, Serialize)]
pub struct StrategyScores {
    pub performance_score: f64,
    pub accessibility_score: f64,
    pub best_practices_score: f64,
    pub seo_score: f64,
    pub core_web_vitals: CoreWebVitals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_data: Option<FieldData>,
}

/// Human-readable audit values for the core web vitals set.
#[derive(Debug, Serialize)]
pub struct CoreWebVitals {
    pub first_contentful_paint: Option<String>,
    pub largest_contentful_paint: Option<String>,
    pub cumulative_layout_shift: Option<String>,
    pub total_blocking_time: Option<String>,
    pub speed_index: Option<String>,
    pub time_to_interactive: Option<String>,
}

/// Real-user (field) percentiles from `loadingExperience`, when Google has
/// enough traffic data for the origin.
#[derive(Debug, Serialize)]
pub struct FieldData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_contentful_paint_p75_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub largest_contentful_paint_p75_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cumulative_layout_shift_p75: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_input_delay_p75_ms: Option<i64>,
}

/// Queries both strategies, isolating failures per slot.
pub async fn check(url: &str, api_key: Option<&str>) -> Result<PagespeedReport> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(PAGESPEED_TIMEOUT_SECS))
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .context("Failed to build PageSpeed client")?;

    let mobile = run_strategy(&client, url, api_key, Strategy::Mobile).await;
    tokio::time::sleep(STRATEGY_DELAY).await;
    let desktop = run_strategy(&client, url, api_key, Strategy::Desktop).await;

    Ok(PagespeedReport { mobile, desktop })
}

async fn run_strategy(
    client: &reqwest::Client,
    url: &str,
    api_key: Option<&str>,
    strategy: Strategy,
) -> StrategyOutcome {
    match query_strategy(client, url, api_key, strategy).await {
        Ok(scores) => StrategyOutcome::Scores(scores),
        Err(e) => {
            log::warn!("PageSpeed {} check failed: {e:#}", strategy.as_str());
            StrategyOutcome::Error {
                error: format!("{e:#}"),
            }
        }
    }
}

async fn query_strategy(
    client: &reqwest::Client,
    url: &str,
    api_key: Option<&str>,
    strategy: Strategy,
) -> Result<StrategyScores> {
    log::info!("Analyzing {} performance via PageSpeed", strategy.as_str());

    let mut query: Vec<(&str, &str)> = vec![("url", url), ("strategy", strategy.as_str())];
    for category in PAGESPEED_CATEGORIES {
        query.push(("category", *category));
    }
    if let Some(key) = api_key {
        query.push(("key", key));
    }

    let response = client
        .get(PAGESPEED_ENDPOINT)
        .query(&query)
        .send()
        .await
        .context("PageSpeed request failed")?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("PageSpeed API returned status {status}");
    }

    let data: Value = response
        .json()
        .await
        .context("PageSpeed response was not valid JSON")?;

    Ok(extract_scores(&data))
}

/// Pulls category scores, audit display values, and field percentiles out
/// of one API response document.
pub(crate) fn extract_scores(data: &Value) -> StrategyScores {
    let lighthouse = &data["lighthouseResult"];
    let categories = &lighthouse["categories"];
    let audits = &lighthouse["audits"];

    let field_data = data["loadingExperience"]["metrics"]
        .as_object()
        .map(|metrics| FieldData {
            first_contentful_paint_p75_ms: percentile(metrics.get("FIRST_CONTENTFUL_PAINT_MS")),
            largest_contentful_paint_p75_ms: percentile(metrics.get("LARGEST_CONTENTFUL_PAINT_MS")),
            cumulative_layout_shift_p75: percentile(metrics.get("CUMULATIVE_LAYOUT_SHIFT_SCORE"))
                .map(|p| p as f64 / 100.0),
            first_input_delay_p75_ms: percentile(metrics.get("FIRST_INPUT_DELAY_MS")),
        });

    StrategyScores {
        performance_score: category_score(categories, "performance"),
        accessibility_score: category_score(categories, "accessibility"),
        best_practices_score: category_score(categories, "best-practices"),
        seo_score: category_score(categories, "seo"),
        core_web_vitals: CoreWebVitals {
            first_contentful_paint: audit_display(audits, "first-contentful-paint"),
            largest_contentful_paint: audit_display(audits, "largest-contentful-paint"),
            cumulative_layout_shift: audit_display(audits, "cumulative-layout-shift"),
            total_blocking_time: audit_display(audits, "total-blocking-time"),
            speed_index: audit_display(audits, "speed-index"),
            time_to_interactive: audit_display(audits, "interactive"),
        },
        field_data,
    }
}

fn category_score(categories: &Value, category: &str) -> f64 {
    categories[category]["score"].as_f64().unwrap_or(0.0) * 100.0
}

fn audit_display(audits: &Value, audit_name: &str) -> Option<String> {
    audits[audit_name]["displayValue"]
        .as_str()
        .map(str::to_string)
}

fn percentile(metric: Option<&Value>) -> Option<i64> {
    metric?.get("percentile")?.as_i64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_response() -> Value {
        json!({
            "lighthouseResult": {
                "categories": {
                    "performance": {"score": 0.42, "title": "Performance"},
                    "accessibility": {"score": 0.9},
                    "best-practices": {"score": 1.0},
                    "seo": {"score": 0.77}
                },
                "audits": {
                    "first-contentful-paint": {"displayValue": "1.8 s", "score": 0.75},
                    "largest-contentful-paint": {"displayValue": "4.2 s", "score": 0.3},
                    "cumulative-layout-shift": {"displayValue": "0.12", "score": 0.6},
                    "total-blocking-time": {"displayValue": "310 ms", "score": 0.5},
                    "speed-index": {"displayValue": "3.9 s", "score": 0.55},
                    "interactive": {"displayValue": "5.1 s", "score": 0.4}
                }
            },
            "loadingExperience": {
                "metrics": {
                    "FIRST_CONTENTFUL_PAINT_MS": {"percentile": 1900},
                    "LARGEST_CONTENTFUL_PAINT_MS": {"percentile": 3100},
                    "CUMULATIVE_LAYOUT_SHIFT_SCORE": {"percentile": 14}
                }
            }
        })
    }

    #[test]
    fn test_extract_scores_categories_scaled_to_100() {
        let scores = extract_scores(&sample_response());
        assert!((scores.performance_score - 42.0).abs() < 1e-9);
        assert!((scores.accessibility_score - 90.0).abs() < 1e-9);
        assert!((scores.best_practices_score - 100.0).abs() < 1e-9);
        assert!((scores.seo_score - 77.0).abs() < 1e-9);
    }

    #[test]
    fn test_extract_scores_core_web_vitals() {
        let scores = extract_scores(&sample_response());
        let cwv = &scores.core_web_vitals;
        assert_eq!(cwv.first_contentful_paint.as_deref(), Some("1.8 s"));
        assert_eq!(cwv.largest_contentful_paint.as_deref(), Some("4.2 s"));
        assert_eq!(cwv.cumulative_layout_shift.as_deref(), Some("0.12"));
        assert_eq!(cwv.total_blocking_time.as_deref(), Some("310 ms"));
        assert_eq!(cwv.speed_index.as_deref(), Some("3.9 s"));
        assert_eq!(cwv.time_to_interactive.as_deref(), Some("5.1 s"));
    }

    #[test]
    fn test_extract_scores_field_data_percentiles() {
        let scores = extract_scores(&sample_response());
        let field = scores.field_data.expect("field data present");
        assert_eq!(field.first_contentful_paint_p75_ms, Some(1900));
        assert_eq!(field.largest_contentful_paint_p75_ms, Some(3100));
        assert_eq!(field.cumulative_layout_shift_p75, Some(0.14));
        assert_eq!(field.first_input_delay_p75_ms, None);
    }

    #[test]
    fn test_extract_scores_degrades_on_missing_sections() {
        let scores = extract_scores(&json!({}));
        assert_eq!(scores.performance_score, 0.0);
        assert_eq!(scores.core_web_vitals.first_contentful_paint, None);
        assert!(scores.field_data.is_none());
    }

    #[test]
    fn test_one_failed_strategy_leaves_the_other_slot_intact() {
        // Mirrors a mobile transport failure alongside a successful desktop call
        let report = PagespeedReport {
            mobile: StrategyOutcome::Error {
                error: "PageSpeed API returned status 429".to_string(),
            },
            desktop: StrategyOutcome::Scores(extract_scores(&sample_response())),
        };

        let rendered = serde_json::to_value(&report).unwrap();
        assert_eq!(
            rendered["mobile"]["error"].as_str(),
            Some("PageSpeed API returned status 429")
        );
        assert!(rendered["mobile"].get("performance_score").is_none());
        assert_eq!(rendered["desktop"]["performance_score"].as_f64(), Some(42.0));
    }
}
