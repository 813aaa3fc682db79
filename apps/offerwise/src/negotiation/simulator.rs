//! Negotiation simulator — projects an ask against the offer and scores its risk.
//!
//! Risk points:
//! - base ask above the cap (15% when already at/above P50, else 25%) → +2
//! - projected base more than 5% above P75 → +1
//! - asking for a level bump while below P50 → +2
//! - pulling more than two levers at once → +2
//!
//! 0–1 points is Low, 2–3 Medium, anything higher High. Band checks are
//! skipped when no band (or a zero P50) is cached for the session.

use serde::{Deserialize, Serialize};

use crate::offer::models::OfferContext;

const CAP_AT_OR_ABOVE_MEDIAN: f64 = 0.15;
const CAP_BELOW_MEDIAN: f64 = 0.25;
const P75_TOLERANCE: f64 = 1.05;
const MAX_LEVERS: u32 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelAsk {
    #[default]
    Same,
    Up,
}

/// Query string for the simulator. Values are coerced, never rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimulationQuery {
    #[serde(default)]
    pub base_pct: Option<String>,
    #[serde(default)]
    pub bonus_pct: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimulationAsk {
    pub base_pct: i32,
    pub bonus_pct: i32,
    pub level: LevelAsk,
}

impl From<&SimulationQuery> for SimulationAsk {
    fn from(query: &SimulationQuery) -> Self {
        Self {
            base_pct: parse_pct(query.base_pct.as_deref()),
            bonus_pct: parse_pct(query.bonus_pct.as_deref()),
            level: match query.level.as_deref().map(str::trim) {
                Some("up") => LevelAsk::Up,
                _ => LevelAsk::Same,
            },
        }
    }
}

/// Whole percent; fractional input is truncated, anything unparseable is 0.
fn parse_pct(raw: Option<&str>) -> i32 {
    raw.map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i32)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_points(points: u32) -> Self {
        match points {
            0..=1 => RiskLevel::Low,
            2..=3 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutcome {
    pub ask: SimulationAsk,
    pub new_base: f64,
    pub new_bonus: f64,
    pub ctc: f64,
    pub delta: f64,
    pub risk_points: u32,
    pub risk: RiskLevel,
    pub notes: Vec<String>,
}

pub fn simulate(ctx: &OfferContext, ask: &SimulationAsk) -> SimulationOutcome {
    let offer = &ctx.offer;
    let base_ratio = f64::from(ask.base_pct) / 100.0;
    let new_base = offer.base * (1.0 + base_ratio);
    let new_bonus = offer.bonus * (1.0 + f64::from(ask.bonus_pct) / 100.0);
    let level_up = ask.level == LevelAsk::Up;

    let mut risk_points = 0;
    let mut notes = Vec::new();

    if let Some(band) = ctx.band.filter(|b| b.p50 != 0.0) {
        let cap = if offer.base >= band.p50 {
            CAP_AT_OR_ABOVE_MEDIAN
        } else {
            CAP_BELOW_MEDIAN
        };
        if base_ratio > cap {
            risk_points += 2;
            notes.push(format!("Base ask > {:.0}% cap", cap * 100.0));
        }
        if new_base > band.p75 * P75_TOLERANCE {
            risk_points += 1;
            notes.push("Above P75".to_string());
        }
        if level_up && offer.base < band.p50 {
            risk_points += 2;
            notes.push("Level up while below median".to_string());
        }
    }

    let levers = [
        ask.base_pct != 0,
        ask.bonus_pct != 0,
        level_up,
        offer.jb > 0.0,
    ]
    .iter()
    .filter(|&&pulled| pulled)
    .count() as u32;
    if levers > MAX_LEVERS {
        risk_points += 2;
        notes.push(format!("Too many levers (>{MAX_LEVERS})"));
    }

    let ctc = new_base + new_bonus + offer.jb;
    SimulationOutcome {
        ask: *ask,
        new_base,
        new_bonus,
        ctc,
        delta: ctc - offer.total_comp(),
        risk_points,
        risk: RiskLevel::from_points(risk_points),
        notes,
    }
}

/// Formats an amount in lakhs, e.g. `₹ 8.50 L`.
pub fn format_lakhs(amount: f64) -> String {
    if amount.is_nan() {
        return "–".to_string();
    }
    format!("₹ {amount:.2} L")
}

/// Like `format_lakhs`, with a leading `+` for non-negative changes.
pub fn format_delta(delta: f64) -> String {
    let sign = if delta >= 0.0 { "+" } else { "" };
    format!("{sign}{}", format_lakhs(delta))
}
