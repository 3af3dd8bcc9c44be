//! Site configuration module.
//!
//! Everything the page scripts treat as constant data lives here: the shop's
//! contact details, the pricing table, and the handful of timings and
//! thresholds the components use. The browser build runs on the stock
//! defaults; the CLI layers an optional `site.toml` on top of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [business]
//! name = "Phone Repairs Tulsa"
//! email = "phonerepairstulsa@gmail.com"
//! phone = "+19183760093"
//!
//! [timing]
//! scroll_debounce_ms = 16      # Coalesce scroll events (~60fps)
//! notification_ms = 5000       # How long form notifications stay up
//! notification_fade_ms = 300   # Slide-up animation before removal
//!
//! [scroll]
//! header_threshold = 50.0      # Header gets `scrolled` past this many px
//! anchor_offset = 80.0         # Fixed-header allowance for anchor jumps
//!
//! [animations]
//! selectors = [".service-card", ".pricing-card", ".review-card", ".trust-card"]
//! threshold = 0.1
//!
//! [service_worker]
//! enabled = true
//! path = "/sw.js"
//!
//! [pricing."Screen Replacement"]
//! iPhone = [119, 249]
//! # ... one table per repair type, one [low, high] pair per device family
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [pricing."Battery Replacement"]
//! iPhone = [65, 135]
//! ```
//!
//! Unknown keys are rejected to catch typos early. That includes repair type
//! and device family names in the pricing tables.

use crate::types::{DeviceFamily, EstimateRequest, EstimateResult, PriceRange, RepairType};
use crate::utils;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Contact details used for the mail link and the custom-quote card.
    pub business: BusinessConfig,
    /// Debounce and notification timings.
    pub timing: TimingConfig,
    /// Scroll-position thresholds.
    pub scroll: ScrollConfig,
    /// Scroll-triggered reveal animation settings.
    pub animations: AnimationsConfig,
    /// Optional service worker registration.
    pub service_worker: ServiceWorkerConfig,
    /// Price ranges keyed by repair type, then device family.
    pub pricing: PricingTable,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let email = self.business.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ConfigError::Validation(
                "business.email must be an email address".into(),
            ));
        }
        if utils::phone_digits(&self.business.phone).is_empty() {
            return Err(ConfigError::Validation(
                "business.phone must contain digits".into(),
            ));
        }
        if self.timing.notification_ms == 0 {
            return Err(ConfigError::Validation(
                "timing.notification_ms must be non-zero".into(),
            ));
        }
        if !(self.animations.threshold > 0.0 && self.animations.threshold <= 1.0) {
            return Err(ConfigError::Validation(
                "animations.threshold must be in (0, 1]".into(),
            ));
        }
        for (key, value) in [
            ("scroll.header_threshold", self.scroll.header_threshold),
            ("scroll.anchor_offset", self.scroll.anchor_offset),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a non-negative number"
                )));
            }
        }
        if self.service_worker.enabled && !self.service_worker.path.starts_with('/') {
            return Err(ConfigError::Validation(
                "service_worker.path must start with '/'".into(),
            ));
        }
        for (issue, device, range) in self.pricing.entries() {
            if range.low > range.high {
                return Err(ConfigError::Validation(format!(
                    "pricing.\"{issue}\".\"{device}\": low ({}) exceeds high ({})",
                    range.low, range.high
                )));
            }
        }
        Ok(())
    }
}

/// Shop contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BusinessConfig {
    pub name: String,
    /// Recipient of the contact form's mail link.
    pub email: String,
    /// Dialable number for `tel:` links, e.g. `+19183760093`.
    pub phone: String,
}

impl BusinessConfig {
    /// Human form of [`BusinessConfig::phone`]: `+19183760093` → `(918) 376-0093`.
    ///
    /// A leading US country code is dropped before formatting; numbers that
    /// don't reduce to ten digits are shown as configured.
    pub fn display_phone(&self) -> String {
        let digits = utils::phone_digits(&self.phone);
        let national = match digits.strip_prefix('1') {
            Some(rest) if digits.len() == 11 => rest,
            _ => digits.as_str(),
        };
        if national.len() == 10 {
            utils::format_phone(national)
        } else {
            self.phone.clone()
        }
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            name: "Phone Repairs Tulsa".to_string(),
            email: "phonerepairstulsa@gmail.com".to_string(),
            phone: "+19183760093".to_string(),
        }
    }
}

/// Timer settings, all in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Wait before a burst of scroll events is handled once.
    pub scroll_debounce_ms: u32,
    /// How long a form notification stays fully visible.
    pub notification_ms: u32,
    /// Length of the slide-up animation before the notification is removed.
    pub notification_fade_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            scroll_debounce_ms: 16,
            notification_ms: 5000,
            notification_fade_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    /// Vertical scroll (px) past which the header is styled as `scrolled`.
    pub header_threshold: f64,
    /// Distance (px) kept between an anchor target and the top of the viewport.
    pub anchor_offset: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header_threshold: 50.0,
            anchor_offset: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationsConfig {
    /// Elements revealed when they scroll into view.
    pub selectors: Vec<String>,
    /// Visible fraction that counts as "in view".
    pub threshold: f64,
}

impl AnimationsConfig {
    /// Selectors joined into one selector list for `querySelectorAll`.
    pub fn selector_list(&self) -> String {
        self.selectors.join(", ")
    }
}

impl Default for AnimationsConfig {
    fn default() -> Self {
        Self {
            selectors: [".service-card", ".pricing-card", ".review-card", ".trust-card"]
                .map(String::from)
                .to_vec(),
            threshold: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceWorkerConfig {
    pub enabled: bool,
    /// Script URL handed to `navigator.serviceWorker.register`.
    pub path: String,
}

impl Default for ServiceWorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/sw.js".to_string(),
        }
    }
}

/// Price ranges keyed by repair type, then device family.
///
/// A missing pair is not an error: it resolves to
/// [`EstimateResult::CustomQuote`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PricingTable(BTreeMap<RepairType, BTreeMap<DeviceFamily, PriceRange>>);

impl PricingTable {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, issue: RepairType, device: DeviceFamily) -> Option<PriceRange> {
        self.0.get(&issue)?.get(&device).copied()
    }

    pub fn insert(&mut self, issue: RepairType, device: DeviceFamily, range: PriceRange) {
        self.0.entry(issue).or_default().insert(device, range);
    }

    /// Look up `table[issue][device]`.
    pub fn resolve(&self, request: &EstimateRequest) -> EstimateResult {
        match self.get(request.issue, request.device) {
            Some(range) => EstimateResult::Priced(range),
            None => EstimateResult::CustomQuote,
        }
    }

    /// All priced combinations, in repair type then device family order.
    pub fn entries(&self) -> impl Iterator<Item = (RepairType, DeviceFamily, PriceRange)> + '_ {
        self.0.iter().flat_map(|(issue, devices)| {
            devices
                .iter()
                .map(move |(device, range)| (*issue, *device, *range))
        })
    }

    pub fn len(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        use DeviceFamily::*;
        use RepairType::*;

        let rows: [(RepairType, [(u32, u32); 4]); 5] = [
            (ScreenReplacement, [(119, 249), (129, 279), (129, 269), (99, 229)]),
            (BatteryReplacement, [(59, 129), (69, 139), (69, 149), (49, 129)]),
            (ChargingPortRepair, [(69, 159), (79, 169), (79, 169), (59, 149)]),
            (WaterDamageDiagnostic, [(39, 89), (39, 89), (39, 89), (39, 89)]),
            (CameraMicSpeaker, [(69, 199), (79, 219), (79, 219), (59, 189)]),
        ];
        let devices = [IPhone, Samsung, GooglePixel, OtherAndroid];

        let mut table = Self::empty();
        for (issue, prices) in rows {
            for (device, (low, high)) in devices.into_iter().zip(prices) {
                table.insert(issue, device, PriceRange::new(low, high));
            }
        }
        table
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the file at `path`.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. A missing file yields the stock defaults.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Phone Repairs Site Configuration
# ================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Each section only needs the keys it wants to override.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Business contact details
# ---------------------------------------------------------------------------
[business]
name = "Phone Repairs Tulsa"
# Contact form submissions open a mail draft addressed here.
email = "phonerepairstulsa@gmail.com"
# Dialable number for the "Call" button on custom quotes.
phone = "+19183760093"

# ---------------------------------------------------------------------------
# Timings (milliseconds)
# ---------------------------------------------------------------------------
[timing]
# Scroll events are coalesced and handled once per quiet period (~60fps).
scroll_debounce_ms = 16
# How long a contact form notification stays on screen.
notification_ms = 5000
# Slide-up animation length before the notification is removed.
notification_fade_ms = 300

# ---------------------------------------------------------------------------
# Scrolling
# ---------------------------------------------------------------------------
[scroll]
# Header gets the `scrolled` class past this many pixels.
header_threshold = 50.0
# Space kept above anchor targets for the fixed header.
anchor_offset = 80.0

# ---------------------------------------------------------------------------
# Reveal animations
# ---------------------------------------------------------------------------
[animations]
# Elements that fade in when scrolled into view.
selectors = [".service-card", ".pricing-card", ".review-card", ".trust-card"]
# Fraction of the element that must be visible (0 < threshold <= 1).
threshold = 0.1

# ---------------------------------------------------------------------------
# Service worker (best-effort; failures are ignored)
# ---------------------------------------------------------------------------
[service_worker]
enabled = true
path = "/sw.js"

# ---------------------------------------------------------------------------
# Pricing: [low, high] in whole dollars, per repair type and device family.
# Device families: "iPhone", "Samsung", "Google Pixel", "Other Android".
# ---------------------------------------------------------------------------
[pricing."Screen Replacement"]
iPhone = [119, 249]
Samsung = [129, 279]
"Google Pixel" = [129, 269]
"Other Android" = [99, 229]

[pricing."Battery Replacement"]
iPhone = [59, 129]
Samsung = [69, 139]
"Google Pixel" = [69, 149]
"Other Android" = [49, 129]

[pricing."Charging Port Repair"]
iPhone = [69, 159]
Samsung = [79, 169]
"Google Pixel" = [79, 169]
"Other Android" = [59, 149]

[pricing."Water Damage Diagnostic"]
iPhone = [39, 89]
Samsung = [39, 89]
"Google Pixel" = [39, 89]
"Other Android" = [39, 89]

[pricing."Camera / Mic / Speaker"]
iPhone = [69, 199]
Samsung = [79, 219]
"Google Pixel" = [79, 219]
"Other Android" = [59, 189]
"##
}
