//! HTML fragments injected into the page.
//!
//! Uses [maud](https://maud.lambda.xyz/) so every interpolated value (device
//! names, issue labels, error messages) is escaped.

use crate::contact::NotificationKind;
use crate::types::PriceRange;
use maud::{Markup, html};

/// Rules added to `<head>` by the scroll animations: the revealed state and
/// the keyframes used when a notification slides away.
pub const ANIMATION_CSS: &str = r#"
.animate-in {
  opacity: 1 !important;
  transform: translateY(0) !important;
}
@keyframes slideUp {
  from { opacity: 1; transform: translateY(0); }
  to { opacity: 0; transform: translateY(-10px); }
}
"#;

/// A priced estimate with a link down to the contact form.
pub fn estimate(range: PriceRange, device: &str, issue: &str) -> Markup {
    html! {
        div.estimate-main {
            div.estimate-price { (range.to_string()) }
            div.estimate-device { (device) " - " (issue) }
        }
        div.estimate-note {
            "Final pricing confirmed after inspection. Most "
            (issue.to_lowercase())
            " repairs take 15-30 minutes."
            br;
            a.link-arrow href="#contact" style="margin-top: 12px; display: inline-block;" {
                "Book this repair →"
            }
        }
    }
}

/// Shown when the device/issue pair has no published price.
pub fn custom_quote(tel: &str, display_phone: &str) -> Markup {
    html! {
        div.estimate-main {
            div style="font-size: 1.25rem; font-weight: 600; margin-bottom: 8px;" {
                "Custom Quote Needed"
            }
            div.estimate-note {
                "This device/repair combination requires a custom quote. Contact us for fast pricing!"
                br;
                a.btn.btn-primary href={ "tel:" (tel) } style="margin-top: 16px;" {
                    "Call " (display_phone)
                }
            }
        }
    }
}

/// Inline validation message for the estimate form.
pub fn estimate_error(message: &str) -> Markup {
    html! {
        div style="color: #ef4444; text-align: center;" {
            svg width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor"
                stroke-width="2" style="margin-bottom: 8px;" {
                circle cx="12" cy="12" r="10" {}
                line x1="12" y1="8" x2="12" y2="12" {}
                line x1="12" y1="16" x2="12.01" y2="16" {}
            }
            br;
            (message)
        }
    }
}

/// Inline style for a form notification of the given kind.
pub fn notification_style(kind: NotificationKind) -> String {
    let palette = match kind {
        NotificationKind::Error => {
            "background: rgba(239, 68, 68, 0.1); color: #ef4444; border: 1px solid rgba(239, 68, 68, 0.3);"
        }
        NotificationKind::Success => {
            "background: rgba(34, 197, 94, 0.1); color: #22c55e; border: 1px solid rgba(34, 197, 94, 0.3);"
        }
        NotificationKind::Info => {
            "background: rgba(45, 212, 191, 0.1); color: #2dd4bf; border: 1px solid rgba(45, 212, 191, 0.3);"
        }
    };
    format!(
        "padding: 16px 20px; border-radius: 8px; margin-bottom: 16px; font-weight: 500; \
         animation: slideDown 0.3s ease-out; {palette}"
    )
}
