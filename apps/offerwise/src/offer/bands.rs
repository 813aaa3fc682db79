//! Benchmark band table and resolver.
//!
//! The table is built once at startup (seeded, or loaded from `BANDS_PATH`) and
//! shared read-only through `AppState`. Lookups are exact and case-sensitive;
//! pairs with no seeded data get a band synthesized from the offer's base.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::offer::models::BenchmarkBand;

/// Fallback band used when there is neither seeded data nor a base to scale.
const FALLBACK_P25: f64 = 7.0;
const FALLBACK_P50: f64 = 8.5;
const FALLBACK_P25_RATIO: f64 = 0.9;
const FALLBACK_P75_RATIO: f64 = 1.2;

/// Seeded demo bands: (role, city, [p25, p50, p75]).
const SEED: &[(&str, &str, [f64; 3])] = &[
    ("Analyst", "BLR", [7.0, 8.5, 10.0]),
    ("AE", "BLR", [8.0, 10.0, 12.0]),
    ("Area Sales Exec", "BLR", [6.0, 7.0, 8.0]),
    ("Analyst", "DEL", [7.5, 9.0, 10.5]),
    ("AE", "DEL", [8.5, 10.5, 12.5]),
    ("Area Sales Exec", "DEL", [6.5, 7.5, 8.5]),
    ("Analyst", "MUM", [7.2, 8.8, 10.3]),
    ("AE", "MUM", [8.2, 10.2, 12.2]),
    ("Area Sales Exec", "MUM", [6.2, 7.2, 8.2]),
];

/// One row of a band table file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandRow {
    pub role: String,
    pub city: String,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
}

/// Where a resolved band came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandSource {
    Table,
    Fallback,
}

#[derive(Debug, Clone, Default)]
pub struct BandTable {
    // role -> city -> band
    bands: HashMap<String, HashMap<String, BenchmarkBand>>,
}

impl BandTable {
    pub fn seeded() -> Self {
        let mut table = Self::default();
        for (role, city, [p25, p50, p75]) in SEED {
            table.insert(role, city, BenchmarkBand::rounded(*p25, *p50, *p75));
        }
        table
    }

    /// Builds a table from rows, rejecting any band that is not `p25 <= p50 <= p75`.
    pub fn from_rows(rows: Vec<BandRow>) -> Result<Self> {
        let mut table = Self::default();
        for row in rows {
            let band = BenchmarkBand::rounded(row.p25, row.p50, row.p75);
            if !band.is_ordered() || !band.p25.is_finite() || !band.p75.is_finite() {
                bail!(
                    "band for ({}, {}) is not ordered p25 <= p50 <= p75: {:?}",
                    row.role,
                    row.city,
                    band
                );
            }
            table.insert(&row.role, &row.city, band);
        }
        Ok(table)
    }

    /// Loads a JSON array of `BandRow`s.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read band table at {}", path.display()))?;
        let rows: Vec<BandRow> = serde_json::from_str(&raw)
            .with_context(|| format!("Band table at {} is not valid JSON", path.display()))?;
        Self::from_rows(rows)
    }

    fn insert(&mut self, role: &str, city: &str, band: BenchmarkBand) {
        self.bands
            .entry(role.to_string())
            .or_default()
            .insert(city.to_string(), band);
    }

    pub fn lookup(&self, role: &str, city: &str) -> Option<BenchmarkBand> {
        self.bands.get(role)?.get(city).copied()
    }

    pub fn len(&self) -> usize {
        self.bands.values().map(HashMap::len).sum()
    }

    /// Resolves the band for a role/city pair, falling back to a band scaled
    /// from `base` when the pair has no seeded data.
    pub fn resolve(&self, role: &str, city: &str, base: f64) -> BenchmarkBand {
        let (band, source) = self.resolve_with_source(role, city, base);
        debug!(role, city, base, ?source, "resolved benchmark band");
        band
    }

    pub fn resolve_with_source(
        &self,
        role: &str,
        city: &str,
        base: f64,
    ) -> (BenchmarkBand, BandSource) {
        match self.lookup(role, city) {
            Some(band) => (band, BandSource::Table),
            None => (fallback_band(base), BandSource::Fallback),
        }
    }
}

/// p25 = 0.9 × base, p50 = base, p75 = 1.2 × base; a zero base uses the fixed
/// (7.0, 8.5, 10.2) band.
pub fn fallback_band(base: f64) -> BenchmarkBand {
    let has_base = base != 0.0;
    let p50 = if has_base { base } else { FALLBACK_P50 };
    let p25 = if has_base {
        base * FALLBACK_P25_RATIO
    } else {
        FALLBACK_P25
    };
    BenchmarkBand::rounded(p25, p50, p50 * FALLBACK_P75_RATIO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::models::round2;
    use std::io::Write;

    #[test]
    fn test_seeded_pairs_ignore_base() {
        let table = BandTable::seeded();
        assert_eq!(table.len(), 9);
        for (role, city, [p25, p50, p75]) in SEED {
            for base in [0.0, 5.0, 100.0] {
                let band = table.resolve(role, city, base);
                assert_eq!(band, BenchmarkBand::rounded(*p25, *p50, *p75));
            }
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let table = BandTable::seeded();
        assert!(table.lookup("Analyst", "BLR").is_some());
        assert!(table.lookup("analyst", "BLR").is_none());
        assert!(table.lookup("Analyst", "blr").is_none());
        let (_, source) = table.resolve_with_source("analyst", "BLR", 0.0);
        assert_eq!(source, BandSource::Fallback);
    }

    #[test]
    fn test_fallback_zero_base_is_fixed_band() {
        let table = BandTable::seeded();
        let band = table.resolve("Consultant", "SFO", 0.0);
        assert_eq!(band, BenchmarkBand { p25: 7.0, p50: 8.5, p75: 10.2 });
    }

    #[test]
    fn test_fallback_scales_from_base() {
        let table = BandTable::seeded();
        let band = table.resolve("Consultant", "SFO", 100.0);
        assert_eq!(band, BenchmarkBand { p25: 90.0, p50: 100.0, p75: 120.0 });

        for base in [0.37, 4.2, 12.345, 33.0, 999.99] {
            let band = table.resolve("Designer", "PUN", base);
            assert_eq!(band.p25, round2(0.9 * base));
            assert_eq!(band.p50, round2(base));
            assert_eq!(band.p75, round2(1.2 * base));
            assert!(band.is_ordered(), "{band:?} not ordered for base {base}");
        }
    }

    #[test]
    fn test_fallback_rounds_like_exact_decimal() {
        let table = BandTable::seeded();
        let band = table.resolve("Consultant", "SFO", 8.125);
        assert_eq!(band.p50, 8.12);
        assert_eq!(band.p75, 9.75);

        let band = table.resolve("Consultant", "SFO", 2.675);
        assert_eq!(band.p50, 2.67);

        let band = table.resolve("Consultant", "SFO", 0.015);
        assert_eq!(band.p50, 0.01);
    }

    #[test]
    fn test_seeded_bands_are_ordered() {
        let table = BandTable::seeded();
        for (role, city, _) in SEED {
            assert!(table.lookup(role, city).unwrap().is_ordered());
        }
    }

    #[test]
    fn test_from_rows_rejects_unordered_band() {
        let rows = vec![BandRow {
            role: "AE".to_string(),
            city: "HYD".to_string(),
            p25: 10.0,
            p50: 9.0,
            p75: 12.0,
        }];
        let err = BandTable::from_rows(rows).unwrap_err();
        assert!(err.to_string().contains("not ordered"));
    }

    #[test]
    fn test_from_json_file_replaces_seed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"role": "SDE", "city": "HYD", "p25": 12.0, "p50": 15.5, "p75": 19.0}}]"#
        )
        .unwrap();

        let table = BandTable::from_json_file(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.resolve("SDE", "HYD", 0.0),
            BenchmarkBand { p25: 12.0, p50: 15.5, p75: 19.0 }
        );
        // Seeded pairs are gone once a file is loaded.
        let (_, source) = table.resolve_with_source("Analyst", "BLR", 8.0);
        assert_eq!(source, BandSource::Fallback);
    }

    #[test]
    fn test_from_json_file_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = BandTable::from_json_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }
}
