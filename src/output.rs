//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Estimate
//!
//! ```text
//! Screen Replacement · iPhone
//!     Range: $119–$249
//!     Average: $184
//! ```
//!
//! An unpublished combination prints the custom-quote line instead:
//!
//! ```text
//! Battery Replacement · UnknownBrand
//!     Custom quote: call (918) 376-0093
//! ```
//!
//! ## Prices
//!
//! ```text
//! Screen Replacement
//!     iPhone            $119–$249   avg $184
//!     Samsung           $129–$279   avg $204
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::config::{PricingTable, SiteConfig};
use crate::types::{EstimateResult, PriceRange, RepairType};
use crate::utils;
use serde::Serialize;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

// ============================================================================
// Estimate
// ============================================================================

/// `--json` shape of an estimate.
#[derive(Debug, Serialize, PartialEq)]
pub struct EstimateReport {
    pub device: String,
    pub issue: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<PriceRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<u32>,
    pub custom_quote: bool,
}

impl EstimateReport {
    pub fn new(device: &str, issue: &str, result: &EstimateResult) -> Self {
        let range = match result {
            EstimateResult::Priced(range) => Some(*range),
            EstimateResult::CustomQuote => None,
        };
        Self {
            device: device.to_string(),
            issue: issue.to_string(),
            range,
            average: range.map(|r| r.average()),
            custom_quote: range.is_none(),
        }
    }
}

pub fn format_estimate(
    device: &str,
    issue: &str,
    result: &EstimateResult,
    display_phone: &str,
) -> Vec<String> {
    let mut lines = vec![format!("{issue} · {device}")];
    match result {
        EstimateResult::Priced(range) => {
            lines.push(format!("{}Range: {range}", indent(1)));
            lines.push(format!("{}Average: ${}", indent(1), range.average()));
        }
        EstimateResult::CustomQuote => {
            lines.push(format!("{}Custom quote: call {display_phone}", indent(1)));
        }
    }
    lines
}

pub fn print_estimate(device: &str, issue: &str, result: &EstimateResult, display_phone: &str) {
    for line in format_estimate(device, issue, result, display_phone) {
        println!("{}", line);
    }
}

// ============================================================================
// Prices
// ============================================================================

/// The whole table grouped by repair, in repair order.
pub fn format_price_table(table: &PricingTable) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Option<RepairType> = None;
    for (issue, device, range) in table.entries() {
        if current != Some(issue) {
            if current.is_some() {
                lines.push(String::new());
            }
            lines.push(issue.label().to_string());
            current = Some(issue);
        }
        lines.push(format!(
            "{}{:<18}{:<12}avg ${}",
            indent(1),
            device.label(),
            range.to_string(),
            range.average()
        ));
    }
    if lines.is_empty() {
        lines.push("No published prices".to_string());
    }
    lines
}

pub fn print_price_table(table: &PricingTable) {
    for line in format_price_table(table) {
        println!("{}", line);
    }
}

// ============================================================================
// Phone
// ============================================================================

pub fn format_phone_check(input: &str) -> Vec<String> {
    let digits = utils::phone_digits(input);
    let valid = digits.len() == 10;
    let mut lines = vec![
        format!("Input: {input}"),
        format!("{}Digits: {digits} ({} digits)", indent(1), digits.len()),
    ];
    if valid {
        lines.push(format!("{}Valid: yes", indent(1)));
        lines.push(format!("{}Display: {}", indent(1), utils::format_phone(&digits)));
    } else {
        lines.push(format!("{}Valid: no", indent(1)));
    }
    lines
}

pub fn print_phone_check(input: &str) {
    for line in format_phone_check(input) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Summary of a validated config. `source` is the file it was read from, or
/// `None` when the stock defaults were used.
pub fn format_config_summary(config: &SiteConfig, source: Option<&Path>) -> Vec<String> {
    let mut lines = vec!["Config".to_string()];
    match source {
        Some(path) => lines.push(format!("{}Source: {}", indent(1), path.display())),
        None => lines.push(format!("{}Source: stock defaults", indent(1))),
    }

    let business = &config.business;
    lines.push(String::new());
    lines.push("Business".to_string());
    lines.push(format!("{}{}", indent(1), business.name));
    lines.push(format!("{}Email: {}", indent(1), business.email));
    lines.push(format!("{}Phone: {}", indent(1), business.display_phone()));

    lines.push(String::new());
    lines.push("Pricing".to_string());
    let repairs = config
        .pricing
        .entries()
        .map(|(issue, _, _)| issue)
        .collect::<std::collections::BTreeSet<_>>()
        .len();
    lines.push(format!(
        "{}{} prices across {} repairs",
        indent(1),
        config.pricing.len(),
        repairs
    ));

    lines.push(String::new());
    lines.push("Page".to_string());
    lines.push(format!(
        "{}Notifications: {} ms (+{} ms fade)",
        indent(1),
        config.timing.notification_ms,
        config.timing.notification_fade_ms
    ));
    lines.push(format!(
        "{}Animated: {}",
        indent(1),
        config.animations.selector_list()
    ));
    if config.service_worker.enabled {
        lines.push(format!(
            "{}Service worker: {}",
            indent(1),
            config.service_worker.path
        ));
    } else {
        lines.push(format!("{}Service worker: disabled", indent(1)));
    }
    lines
}

pub fn print_config_summary(config: &SiteConfig, source: Option<&Path>) {
    for line in format_config_summary(config, source) {
        println!("{}", line);
    }
}
