//! HTML page rendering.
//!
//! Templates are compiled in and filled with `{{key}}` placeholders. Values
//! passed to `page` are HTML-escaped; only `Raw` fragments are inserted as-is.

use axum::response::Html;

use crate::negotiation::script::NegotiationScript;
use crate::negotiation::simulator::{format_delta, format_lakhs, LevelAsk, SimulationOutcome};
use crate::offer::models::OfferContext;

const LAYOUT: &str = include_str!("../../templates/layout.html");
const HOME: &str = include_str!("../../templates/home.html");
const OFFER_FORM: &str = include_str!("../../templates/offer_form.html");
const BENCHMARKS: &str = include_str!("../../templates/benchmarks.html");
const SIMULATOR: &str = include_str!("../../templates/simulator.html");
const SCRIPT_STUDIO: &str = include_str!("../../templates/script_studio.html");
const REVIEW: &str = include_str!("../../templates/review.html");
const LEARNING_HUB: &str = include_str!("../../templates/learning_hub.html");

pub const STYLESHEET: &str = include_str!("../../static/offerwise.css");

/// A template value.
pub enum Value {
    Text(String),
    /// Trusted markup built by this module.
    Raw(String),
}

impl Value {
    fn rendered(&self) -> String {
        match self {
            Value::Text(text) => escape_html(text),
            Value::Raw(html) => html.clone(),
        }
    }
}

fn text(value: impl Into<String>) -> Value {
    Value::Text(value.into())
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Replaces `{{key}}` placeholders. Unknown keys are left in place.
pub fn fill(template: &str, vars: &[(&str, Value)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = after[..end].trim();
        match vars.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(&value.rendered()),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

fn page(title: &str, body: &str, vars: &[(&str, Value)]) -> Html<String> {
    let content = fill(body, vars);
    Html(fill(
        LAYOUT,
        &[("title", text(title)), ("content", Value::Raw(content))],
    ))
}

fn offer_vars(ctx: &OfferContext) -> Vec<(&'static str, Value)> {
    let offer = &ctx.offer;
    let mut vars = vec![
        ("role", text(&offer.role)),
        ("level", text(&offer.level)),
        ("city", text(&offer.city)),
        ("base", text(format_lakhs(offer.base))),
        ("bonus", text(format_lakhs(offer.bonus))),
        ("jb", text(format_lakhs(offer.jb))),
        ("total", text(format_lakhs(offer.total_comp()))),
    ];
    let (p25, p50, p75) = match ctx.band {
        Some(band) => (
            format_lakhs(band.p25),
            format_lakhs(band.p50),
            format_lakhs(band.p75),
        ),
        None => ("–".to_string(), "–".to_string(), "–".to_string()),
    };
    vars.extend([("p25", text(p25)), ("p50", text(p50)), ("p75", text(p75))]);
    vars
}

pub fn home() -> Html<String> {
    page("OfferWise", HOME, &[])
}

pub fn offer_form() -> Html<String> {
    page("New offer", OFFER_FORM, &[])
}

pub fn benchmarks(ctx: &OfferContext) -> Html<String> {
    page("Benchmarks", BENCHMARKS, &offer_vars(ctx))
}

pub fn simulator(ctx: &OfferContext, outcome: &SimulationOutcome) -> Html<String> {
    let ask = &outcome.ask;
    let (level_same, level_up) = match ask.level {
        LevelAsk::Same => ("selected", ""),
        LevelAsk::Up => ("", "selected"),
    };
    let notes = if outcome.notes.is_empty() {
        String::new()
    } else {
        let items: Vec<String> = outcome
            .notes
            .iter()
            .map(|note| format!("<li>{}</li>", escape_html(note)))
            .collect();
        format!("<ul class=\"notes\">{}</ul>", items.join(""))
    };

    let mut vars = offer_vars(ctx);
    vars.extend([
        ("base_pct", text(ask.base_pct.to_string())),
        ("bonus_pct", text(ask.bonus_pct.to_string())),
        ("level_same", text(level_same)),
        ("level_up", text(level_up)),
        ("ctc", text(format_lakhs(outcome.ctc))),
        ("delta", text(format_delta(outcome.delta))),
        ("risk", text(outcome.risk.as_str())),
        ("risk_class", text(outcome.risk.as_str().to_lowercase())),
        ("notes", Value::Raw(notes)),
    ]);
    page("Simulator", SIMULATOR, &vars)
}

pub fn script_studio(ctx: &OfferContext, script: &NegotiationScript) -> Html<String> {
    let mut vars = offer_vars(ctx);
    vars.push(("email", text(script.email())));
    page("Script studio", SCRIPT_STUDIO, &vars)
}

pub fn review() -> Html<String> {
    page("Review", REVIEW, &[])
}

pub fn learning_hub() -> Html<String> {
    page("Learning hub", LEARNING_HUB, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::negotiation::script::compose;
    use crate::negotiation::simulator::{simulate, SimulationAsk};
    use crate::offer::models::{BenchmarkBand, Offer};

    fn ctx() -> OfferContext {
        OfferContext {
            offer: Offer {
                role: "<b>Analyst</b>".to_string(),
                base: 8.0,
                bonus: 1.0,
                ..Offer::default()
            },
            band: Some(BenchmarkBand { p25: 7.0, p50: 8.5, p75: 10.0 }),
        }
    }

    #[test]
    fn test_fill_replaces_and_escapes() {
        let out = fill(
            "<p>{{ name }} / {{raw}} / {{missing}}</p>",
            &[("name", text("a & b")), ("raw", Value::Raw("<i>x</i>".to_string()))],
        );
        assert_eq!(out, "<p>a &amp; b / <i>x</i> / {{missing}}</p>");
    }

    #[test]
    fn test_fill_unterminated_placeholder() {
        assert_eq!(fill("a {{b", &[("b", text("x"))]), "a {{b");
    }

    #[test]
    fn test_every_page_fills_all_placeholders() {
        let ctx = ctx();
        let outcome = simulate(&ctx, &SimulationAsk::default());
        let pages = [
            home(),
            offer_form(),
            benchmarks(&ctx),
            simulator(&ctx, &outcome),
            script_studio(&ctx, &compose(&ctx)),
            review(),
            learning_hub(),
        ];
        for Html(body) in pages {
            assert!(!body.contains("{{"), "unfilled placeholder in:\n{body}");
            assert!(body.contains("<html"));
        }
    }

    #[test]
    fn test_benchmarks_page_escapes_offer_text() {
        let Html(body) = benchmarks(&ctx());
        assert!(body.contains("&lt;b&gt;Analyst&lt;/b&gt;"));
        assert!(!body.contains("<b>Analyst</b>"));
        assert!(body.contains("₹ 8.50 L"));
    }
}
