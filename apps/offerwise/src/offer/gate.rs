//! Offer-state gate for pages that need compensation data.

use crate::offer::models::OfferContext;

/// Where gated pages send a session that has no offer yet.
pub const OFFER_INTAKE_PATH: &str = "/offer/new";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Render,
    RedirectToIntake,
}

/// A session whose base, bonus and joining bonus sum to exactly zero has no
/// offer, whatever role, city or level it carries.
pub fn check(ctx: &OfferContext) -> Gate {
    if ctx.offer.total_comp() == 0.0 {
        Gate::RedirectToIntake
    } else {
        Gate::Render
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::models::Offer;

    fn ctx(base: f64, bonus: f64, jb: f64) -> OfferContext {
        OfferContext {
            offer: Offer {
                role: "AE".to_string(),
                base,
                bonus,
                jb,
                ..Offer::default()
            },
            band: None,
        }
    }

    #[test]
    fn test_empty_offer_redirects() {
        assert_eq!(check(&ctx(0.0, 0.0, 0.0)), Gate::RedirectToIntake);
    }

    #[test]
    fn test_any_component_opens_gate() {
        assert_eq!(check(&ctx(8.0, 0.0, 0.0)), Gate::Render);
        assert_eq!(check(&ctx(0.0, 1.0, 0.0)), Gate::Render);
        assert_eq!(check(&ctx(0.0, 0.0, 0.5)), Gate::Render);
        assert_eq!(check(&ctx(0.01, 0.0, 0.0)), Gate::Render);
    }
}
