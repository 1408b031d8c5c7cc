//! Policy page route handlers.
//!
//! The policy copy (authenticity, shipping, terms, privacy, care) is fixed
//! editorial content, not admin-editable, so it ships compiled in rather
//! than going through the content facade.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::Path,
    response::IntoResponse,
};
use tracing::instrument;

use crate::error::{AppError, Result};

/// A fixed policy page.
pub struct PolicyPage {
    pub slug: &'static str,
    pub title: &'static str,
    /// Pre-rendered HTML body.
    pub body_html: &'static str,
}

/// The policy pages linked from the footer.
pub const POLICY_PAGES: &[PolicyPage] = &[
    PolicyPage {
        slug: "authenticity",
        title: "AUTHENTICITY GUARANTEE",
        body_html: "\
<p>PixelPunk operates on a 100% Authenticity Guarantee. Every item entering our archive \
undergoes a rigorous three-stage verification process:</p>\
<ul>\
<li><strong>Structural Audit:</strong> Verification of stitch count, seam construction, and \
hardware hallmarks.</li>\
<li><strong>Historical Cross-Reference:</strong> Matching of labels and wash tags against known \
manufacturing era databases.</li>\
<li><strong>Provenance Logging:</strong> Documentation of where the item was sourced and its \
estimated journey through the years.</li>\
</ul>\
<p>Items found to be non-original or of inferior manufacturing grade are immediately rejected. \
Your purchase is a certified historical artifact.</p>",
    },
    PolicyPage {
        slug: "shipping",
        title: "SHIPPING PROTOCOL",
        body_html: "\
<p>We treat every archive shipment with the respect a historical item deserves.</p>\
<ul>\
<li><strong>Express Handling:</strong> All items are processed within 48 hours.</li>\
<li><strong>Secure Packaging:</strong> Items are wrapped in pH-neutral acid-free tissue to \
prevent any chemical aging during transit.</li>\
<li><strong>Global Tracking:</strong> Comprehensive tracking provided for all international \
destinations via our priority courier network.</li>\
</ul>\
<p>Delivery typically takes 3-7 business days depending on your location relative to our \
nearest archive hub.</p>",
    },
    PolicyPage {
        slug: "terms",
        title: "TERMS OF SERVICE",
        body_html: "\
<h4>1. Exclusive Ownership</h4>\
<p>Archive items are unique. By completing a checkout, you acknowledge that you are securing a \
one-of-a-kind piece. Stock is not guaranteed until checkout completion.</p>\
<h4>2. Vintage Condition</h4>\
<p>You are purchasing \"Pre-Owned\" or \"Archive\" goods. Natural aging, patina, and minor \
imperfections are part of the item's history. We describe condition accurately, but perfection \
is never promised. History is messy.</p>\
<h4>3. Returns</h4>\
<p>Given the unique nature of these items, returns are accepted within 14 days in original, \
unworn condition with our security tags intact.</p>",
    },
    PolicyPage {
        slug: "privacy",
        title: "PRIVACY",
        body_html: "\
<p>Your privacy is as protected as our archives. We do not sell your data.</p>\
<p>We collect only the information necessary to fulfill your request and secure your shipping. \
This includes email, name, and delivery coordinates. All transactions are encrypted with \
256-bit bank-grade security protocols.</p>\
<p>Your history with us stays with us.</p>",
    },
    PolicyPage {
        slug: "care",
        title: "GARMENT CARE",
        body_html: "\
<p>Vintage fabrics require a \"Low-Impact\" philosophy. We recommend:</p>\
<ul>\
<li><strong>Hand Wash Only:</strong> Avoid heavy mechanical agitation.</li>\
<li><strong>Steam Over Iron:</strong> High heat from an iron can flatten historical textures. \
Use gentle steam.</li>\
<li><strong>Breathable Storage:</strong> Never store archive items in plastic bags for long \
periods. Use cotton garment bags.</li>\
</ul>",
    },
];

/// Policy page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/show.html")]
pub struct PolicyTemplate {
    pub title: &'static str,
    pub body_html: &'static str,
}

/// Display a policy page.
#[instrument]
pub async fn show(Path(slug): Path<String>) -> Result<impl IntoResponse> {
    let page = POLICY_PAGES
        .iter()
        .find(|p| p.slug == slug)
        .ok_or(AppError::NotFound(slug))?;

    Ok(PolicyTemplate {
        title: page.title,
        body_html: page.body_html,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_are_unique() {
        let mut slugs: Vec<_> = POLICY_PAGES.iter().map(|p| p.slug).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), POLICY_PAGES.len());
    }

    #[test]
    fn test_known_slugs_present() {
        for slug in ["authenticity", "shipping", "terms", "privacy", "care"] {
            assert!(POLICY_PAGES.iter().any(|p| p.slug == slug), "{slug}");
        }
    }
}
