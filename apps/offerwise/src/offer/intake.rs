//! Offer intake: coerces raw form fields into a fully populated `Offer`.
//!
//! Intake never fails. Missing or blank text falls back to the default literal,
//! and numeric text that does not parse falls back to the caller's default.

use serde::Deserialize;

use crate::offer::models::{Offer, DEFAULT_CITY, DEFAULT_LEVEL, DEFAULT_ROLE};

/// Raw offer form as posted by the browser. Every field is optional text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfferForm {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub bonus: Option<String>,
    #[serde(default)]
    pub jb: Option<String>,
}

pub fn normalize(form: &OfferForm) -> Offer {
    Offer {
        role: text_or(form.role.as_deref(), DEFAULT_ROLE),
        level: text_or(form.level.as_deref(), DEFAULT_LEVEL),
        city: text_or(form.city.as_deref(), DEFAULT_CITY),
        base: parse_amount(form.base.as_deref(), 0.0),
        bonus: parse_amount(form.bonus.as_deref(), 0.0),
        jb: parse_amount(form.jb.as_deref(), 0.0),
    }
}

/// Parses a compensation amount. Empty, unparseable and non-finite input all
/// yield `default`.
pub fn parse_amount(raw: Option<&str>, default: f64) -> f64 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

fn text_or(raw: Option<&str>, default: &str) -> String {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => default.to_string(),
    }
}
