use serde::{Deserialize, Serialize};

pub const DEFAULT_ROLE: &str = "Analyst";
pub const DEFAULT_LEVEL: &str = "L4";
pub const DEFAULT_CITY: &str = "BLR";

/// The offer a user is negotiating. Amounts are in lakhs per annum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub role: String,
    pub level: String,
    pub city: String,
    pub base: f64,
    pub bonus: f64,
    /// Joining bonus.
    pub jb: f64,
}

impl Default for Offer {
    fn default() -> Self {
        Self {
            role: DEFAULT_ROLE.to_string(),
            level: DEFAULT_LEVEL.to_string(),
            city: DEFAULT_CITY.to_string(),
            base: 0.0,
            bonus: 0.0,
            jb: 0.0,
        }
    }
}

impl Offer {
    pub fn total_comp(&self) -> f64 {
        self.base + self.bonus + self.jb
    }
}

/// Percentile compensation benchmarks for a role/city pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkBand {
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
}

impl BenchmarkBand {
    /// Builds a band with every percentile rounded to 2 decimals.
    pub fn rounded(p25: f64, p50: f64, p75: f64) -> Self {
        Self {
            p25: round2(p25),
            p50: round2(p50),
            p75: round2(p75),
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.p25 <= self.p50 && self.p50 <= self.p75
    }
}

/// What the pages see: the stored offer with its cached band merged in.
/// The band is absent when none has been computed for this session yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferContext {
    #[serde(flatten)]
    pub offer: Offer,
    #[serde(flatten)]
    pub band: Option<BenchmarkBand>,
}

/// Rounds to 2 decimals from the exact binary value, ties to even, so 2.675
/// (stored just below) becomes 2.67 and 8.125 becomes 8.12.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
