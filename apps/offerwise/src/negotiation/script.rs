use serde::Serialize;

use crate::offer::models::OfferContext;

/// Default counter: ask for 10% over the offered base.
const TARGET_BASE_RATIO: f64 = 1.10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NegotiationScript {
    pub target_base: f64,
    pub subject: String,
    pub body: String,
}

impl NegotiationScript {
    /// Subject line and body as a single pasteable email.
    pub fn email(&self) -> String {
        format!("Subject: {}\n\n{}", self.subject, self.body)
    }
}

pub fn compose(ctx: &OfferContext) -> NegotiationScript {
    let offer = &ctx.offer;
    let target_base = offer.base * TARGET_BASE_RATIO;

    let subject = format!("Offer Discussion - Role: {}, {}", offer.role, offer.city);
    let body = [
        "Hi Recruiter,".to_string(),
        format!(
            "Thank you for the opportunity and the detailed offer. Based on the role scope and {} \
             market data for {} roles, a base of ₹{:.1}L would reflect the responsibilities well.",
            offer.city, offer.role, target_base
        ),
        "I'm flexible on structure (bonus/joining) to align with team timelines. \
         If we can align on base, I can sign off quickly."
            .to_string(),
        String::new(),
        "Regards,".to_string(),
        "Candidate".to_string(),
    ]
    .join("\n");

    NegotiationScript {
        target_base,
        subject,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::models::Offer;

    fn ctx(role: &str, city: &str, base: f64) -> OfferContext {
        OfferContext {
            offer: Offer {
                role: role.to_string(),
                city: city.to_string(),
                base,
                ..Offer::default()
            },
            band: None,
        }
    }

    #[test]
    fn test_script_asks_ten_percent_over_base() {
        let script = compose(&ctx("AE", "DEL", 10.0));
        assert!((script.target_base - 11.0).abs() < 1e-9);
        assert!(script.body.contains("a base of ₹11.0L"));
        assert!(script.body.contains("DEL market data for AE roles"));
    }

    #[test]
    fn test_subject_names_role_and_city() {
        let script = compose(&ctx("Area Sales Exec", "MUM", 7.0));
        assert_eq!(script.subject, "Offer Discussion - Role: Area Sales Exec, MUM");
        assert!(script.email().starts_with("Subject: Offer Discussion"));
        assert!(script.email().ends_with("Regards,\nCandidate"));
    }
}
