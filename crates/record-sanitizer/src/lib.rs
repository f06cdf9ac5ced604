// The json! fixtures in the test module nest deeply enough to blow the
// default macro recursion limit.
#![recursion_limit = "256"]

//! Schema-driven sanitation of model-generated valuation payloads.
//!
//! The upstream generative source is asked for strict JSON on fixed scales,
//! but in practice returns numbers as strings, percentages as fractions,
//! and occasionally negative per-share values. [`RecordSanitizer`] walks the
//! static field table, normalizes every declared numeric path, floors
//! intrinsic values at zero, deduplicates sources, and re-derives the
//! investment verdict from the normalized ratios.

pub mod classify;
pub mod field_spec;

pub use classify::{classify, DecisionRule};
pub use field_spec::{FIELD_KINDS, OPTIONAL_BLOCKS};

use chrono::Utc;
use scalar_normalizer::{clean_number, clean_percentage, NumericKind, ScaleThresholds};
use serde_json::{Map, Value};
use std::collections::HashSet;
use valuation_core::{SanitizeError, StockAnalysis};

/// Number of scenarios the upstream contract promises (Worst/Base/Best).
const EXPECTED_SCENARIOS: usize = 3;

/// Stateless sanitizer; plain config data only, so one instance can be
/// shared across concurrent searches.
#[derive(Debug, Clone, Default)]
pub struct RecordSanitizer {
    thresholds: ScaleThresholds,
    rule: DecisionRule,
}

impl RecordSanitizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the fractional-encoding cutoffs and verdict thresholds.
    pub fn with_config(thresholds: ScaleThresholds, rule: DecisionRule) -> Self {
        Self { thresholds, rule }
    }

    /// Parse a JSON document and sanitize it.
    pub fn sanitize_json(&self, text: &str) -> Result<StockAnalysis, SanitizeError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| SanitizeError::MalformedPayload(e.to_string()))?;
        self.sanitize_value(value)
    }

    /// Sanitize an already-parsed payload into a canonical record.
    ///
    /// Scalar-level problems never fail: malformed numbers degrade to 0 and
    /// percentages are rescaled onto 0-100. Structural problems (root not an
    /// object, `scenarios` absent or not an array) are surfaced as errors
    /// because rendering has no sensible default for them.
    pub fn sanitize_value(&self, mut value: Value) -> Result<StockAnalysis, SanitizeError> {
        let root = value.as_object_mut().ok_or_else(|| {
            SanitizeError::MalformedPayload("payload root is not a JSON object".to_string())
        })?;

        match root.get("scenarios") {
            Some(Value::Array(scenarios)) => {
                if scenarios.len() != EXPECTED_SCENARIOS {
                    tracing::warn!(
                        count = scenarios.len(),
                        "scenario list is not the expected Worst/Base/Best triple"
                    );
                }
            }
            Some(_) => {
                return Err(SanitizeError::MissingScenarios(
                    "scenarios is not an array".to_string(),
                ))
            }
            None => {
                return Err(SanitizeError::MissingScenarios(
                    "scenarios field is absent".to_string(),
                ))
            }
        }

        // Blocks that are absent (or not objects) stay omitted in the output.
        for block in OPTIONAL_BLOCKS {
            if let Some(v) = root.get(*block) {
                if !v.is_object() {
                    root.remove(*block);
                }
            }
        }

        for (path, kind) in FIELD_KINDS {
            let segments: Vec<&str> = path.split('.').collect();
            let block_root = segments[0].trim_end_matches("[]");
            if OPTIONAL_BLOCKS.contains(&block_root) && value.get(block_root).is_none() {
                continue;
            }
            self.normalize_path(&mut value, &segments, path, *kind);
        }

        self.floor_intrinsic_values(&mut value);
        dedup_sources(&mut value);

        let mut record: StockAnalysis = serde_json::from_value(value)
            .map_err(|e| SanitizeError::InvalidRecord(e.to_string()))?;
        record.sanitized_at = Utc::now();
        self.apply_verdict(&mut record);
        Ok(record)
    }

    /// Normalize one declared path in place, descending through objects and
    /// fanning out over `[]` array segments. Missing intermediate objects
    /// and arrays are created (empty), so a present scenario always ends up
    /// with a full assumptions block; non-object array elements are skipped.
    fn normalize_path(&self, node: &mut Value, segments: &[&str], full_path: &str, kind: NumericKind) {
        let Some((segment, rest)) = segments.split_first() else {
            return;
        };
        let Some(obj) = node.as_object_mut() else {
            return;
        };

        if let Some(name) = segment.strip_suffix("[]") {
            let slot = obj
                .entry(name.to_string())
                .or_insert_with(|| Value::Array(Vec::new()));
            if !slot.is_array() {
                *slot = Value::Array(Vec::new());
            }
            if let Value::Array(items) = slot {
                for item in items.iter_mut() {
                    self.normalize_path(item, rest, full_path, kind);
                }
            }
        } else if rest.is_empty() {
            let raw = obj.get(*segment).cloned().unwrap_or(Value::Null);
            let base = clean_number(&raw);
            let cleaned = clean_percentage(&raw, kind, &self.thresholds);
            if cleaned != base {
                tracing::debug!(
                    field = full_path,
                    raw = %raw,
                    value = cleaned,
                    "rescaled fractional percentage"
                );
            }
            obj.insert(segment.to_string(), Value::from(cleaned));
        } else {
            let slot = obj
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            self.normalize_path(slot, rest, full_path, kind);
        }
    }

    /// Limited-liability floor: a per-share intrinsic value cannot be
    /// negative, so anything below zero (net debt exceeding enterprise
    /// value upstream) is replaced with 0.00.
    fn floor_intrinsic_values(&self, value: &mut Value) {
        let Some(Value::Array(scenarios)) = value.get_mut("scenarios") else {
            return;
        };
        for scenario in scenarios.iter_mut() {
            let Some(obj) = scenario.as_object_mut() else {
                continue;
            };
            let iv = obj
                .get("intrinsicValue")
                .and_then(Value::as_f64)
                .unwrap_or(0.0);
            if iv < 0.0 {
                tracing::warn!(intrinsic_value = iv, "floored negative intrinsic value to 0.00");
                obj.insert("intrinsicValue".to_string(), Value::from(0.0));
            }
        }
    }

    /// Re-derive the verdict from normalized ratios whenever the inputs are
    /// present: margin of safety from the thesis, ROIC and leverage from the
    /// deep dive, WACC from the Base-case assumptions. Without those blocks
    /// the upstream color stands (leniently parsed, unknown reads ORANGE).
    fn apply_verdict(&self, record: &mut StockAnalysis) {
        let deep_inputs = record
            .deep_dive_metrics
            .as_ref()
            .map(|d| (d.roic, d.net_debt_to_ebitda));
        let base_wacc = record.base_scenario().map(|s| s.assumptions.wacc);

        if let (Some((roic, leverage)), Some(wacc)) = (deep_inputs, base_wacc) {
            if let Some(thesis) = record.investment_thesis.as_mut() {
                let derived = classify(thesis.margin_of_safety, roic, wacc, leverage, &self.rule);
                if derived != thesis.decision_color {
                    tracing::debug!(
                        upstream = thesis.decision_color.to_label(),
                        derived = derived.to_label(),
                        "overriding upstream decision color"
                    );
                }
                thesis.decision_color = derived;
            }
        }
    }
}

/// Drop sources with an empty title or URI and deduplicate by URI, keeping
/// first occurrence and supplied order. Extra keys are discarded.
fn dedup_sources(value: &mut Value) {
    let Some(root) = value.as_object_mut() else {
        return;
    };
    let raw = root
        .get("sources")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let mut seen = HashSet::new();
    let kept: Vec<Value> = raw
        .into_iter()
        .filter_map(|entry| {
            let title = entry.get("title").and_then(Value::as_str).unwrap_or("");
            let uri = entry.get("uri").and_then(Value::as_str).unwrap_or("");
            if title.is_empty() || uri.is_empty() || !seen.insert(uri.to_string()) {
                return None;
            }
            Some(serde_json::json!({ "title": title, "uri": uri }))
        })
        .collect();
    root.insert("sources".to_string(), Value::Array(kept));
}
