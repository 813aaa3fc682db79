//! Offer context operations over a narrow session capability.

use tracing::info;

use crate::offer::bands::BandTable;
use crate::offer::intake::{normalize, OfferForm};
use crate::offer::models::{BenchmarkBand, Offer, OfferContext};

/// Read/write access to the per-user offer state. Implemented by the HTTP
/// session; anything that can hold an offer and a band will do.
pub trait OfferStore {
    fn offer(&self) -> Option<&Offer>;
    fn save_offer(&mut self, offer: Offer);
    fn benchmarks(&self) -> Option<&BenchmarkBand>;
    fn save_benchmarks(&mut self, band: BenchmarkBand);
}

/// Normalizes the form, stores the offer and a freshly resolved band.
/// Any previously cached band is replaced.
pub fn submit_offer<S: OfferStore + ?Sized>(
    store: &mut S,
    form: &OfferForm,
    bands: &BandTable,
) -> OfferContext {
    let offer = normalize(form);
    let band = bands.resolve(&offer.role, &offer.city, offer.base);
    info!(
        role = %offer.role,
        city = %offer.city,
        total_comp = offer.total_comp(),
        "offer submitted"
    );
    store.save_offer(offer.clone());
    store.save_benchmarks(band);
    OfferContext {
        offer,
        band: Some(band),
    }
}

/// The stored offer (or defaults) with its band, resolving and caching the
/// band when none is stored yet.
pub fn load_or_resolve<S: OfferStore + ?Sized>(
    store: &mut S,
    bands: &BandTable,
) -> OfferContext {
    let offer = store.offer().cloned().unwrap_or_default();
    let band = match store.benchmarks() {
        Some(band) => *band,
        None => {
            let band = bands.resolve(&offer.role, &offer.city, offer.base);
            store.save_benchmarks(band);
            band
        }
    };
    OfferContext {
        offer,
        band: Some(band),
    }
}

/// The stored offer (or defaults) with whatever band is cached. Never writes.
pub fn current<S: OfferStore + ?Sized>(store: &S) -> OfferContext {
    OfferContext {
        offer: store.offer().cloned().unwrap_or_default(),
        band: store.benchmarks().copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct TestStore {
        offer: Option<Offer>,
        band: Option<BenchmarkBand>,
        writes: usize,
    }

    impl OfferStore for TestStore {
        fn offer(&self) -> Option<&Offer> {
            self.offer.as_ref()
        }
        fn save_offer(&mut self, offer: Offer) {
            self.writes += 1;
            self.offer = Some(offer);
        }
        fn benchmarks(&self) -> Option<&BenchmarkBand> {
            self.band.as_ref()
        }
        fn save_benchmarks(&mut self, band: BenchmarkBand) {
            self.writes += 1;
            self.band = Some(band);
        }
    }

    fn analyst_form() -> OfferForm {
        OfferForm {
            role: Some("Analyst".to_string()),
            city: Some("BLR".to_string()),
            base: Some("8".to_string()),
            bonus: Some("1".to_string()),
            jb: Some("0".to_string()),
            ..OfferForm::default()
        }
    }

    #[test]
    fn test_submit_stores_offer_and_seeded_band() {
        let mut store = TestStore::default();
        let ctx = submit_offer(&mut store, &analyst_form(), &BandTable::seeded());

        let band = BenchmarkBand { p25: 7.0, p50: 8.5, p75: 10.0 };
        assert_eq!(ctx.band, Some(band));
        assert_eq!(store.band, Some(band));
        let offer = store.offer.unwrap();
        assert_eq!(offer.level, "L4");
        assert_eq!((offer.base, offer.bonus, offer.jb), (8.0, 1.0, 0.0));
    }

    #[test]
    fn test_submit_is_idempotent() {
        let bands = BandTable::seeded();
        let mut store = TestStore::default();
        let first = submit_offer(&mut store, &analyst_form(), &bands);
        let stored = store.offer.clone();
        let second = submit_offer(&mut store, &analyst_form(), &bands);
        assert_eq!(first, second);
        assert_eq!(store.offer, stored);
    }

    #[test]
    fn test_submit_replaces_stale_band() {
        let bands = BandTable::seeded();
        let mut store = TestStore::default();
        submit_offer(&mut store, &analyst_form(), &bands);

        let form = OfferForm {
            role: Some("Consultant".to_string()),
            city: Some("SFO".to_string()),
            base: Some("100".to_string()),
            ..OfferForm::default()
        };
        submit_offer(&mut store, &form, &bands);
        assert_eq!(store.band, Some(BenchmarkBand { p25: 90.0, p50: 100.0, p75: 120.0 }));
    }

    #[test]
    fn test_load_or_resolve_caches_missing_band() {
        let mut store = TestStore::default();
        let ctx = load_or_resolve(&mut store, &BandTable::seeded());
        assert_eq!(ctx.offer, Offer::default());
        assert_eq!(ctx.band, Some(BenchmarkBand { p25: 7.0, p50: 8.5, p75: 10.0 }));
        assert_eq!(store.writes, 1);
        assert!(store.offer.is_none());

        load_or_resolve(&mut store, &BandTable::seeded());
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_load_or_resolve_keeps_pinned_band() {
        let pinned = BenchmarkBand { p25: 1.0, p50: 2.0, p75: 3.0 };
        let mut store = TestStore {
            offer: Some(Offer::default()),
            band: Some(pinned),
            writes: 0,
        };
        let ctx = load_or_resolve(&mut store, &BandTable::seeded());
        assert_eq!(ctx.band, Some(pinned));
        assert_eq!(store.writes, 0);
    }

    #[test]
    fn test_current_never_writes() {
        let store = TestStore::default();
        let ctx = current(&store);
        assert_eq!(ctx.offer, Offer::default());
        assert!(ctx.band.is_none());
    }
}
