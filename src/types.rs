//! Domain types shared by the estimate resolver, the contact form, and the CLI.
//!
//! Repair categories and device families are closed sets. Both parse from and
//! print as the exact labels used in the page's `<select>` options and in the
//! pricing section of `site.toml`, so a value round-trips unchanged through the
//! DOM, the config file, and the command line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A select value that names no known repair type or device family.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseSelectionError {
    pub kind: &'static str,
    pub value: String,
}

/// The five repair categories offered on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RepairType {
    #[serde(rename = "Screen Replacement")]
    ScreenReplacement,
    #[serde(rename = "Battery Replacement")]
    BatteryReplacement,
    #[serde(rename = "Charging Port Repair")]
    ChargingPortRepair,
    #[serde(rename = "Water Damage Diagnostic")]
    WaterDamageDiagnostic,
    #[serde(rename = "Camera / Mic / Speaker")]
    CameraMicSpeaker,
}

impl RepairType {
    pub const ALL: [RepairType; 5] = [
        RepairType::ScreenReplacement,
        RepairType::BatteryReplacement,
        RepairType::ChargingPortRepair,
        RepairType::WaterDamageDiagnostic,
        RepairType::CameraMicSpeaker,
    ];

    /// Label shown to customers (and used as the select option value).
    pub fn label(self) -> &'static str {
        match self {
            RepairType::ScreenReplacement => "Screen Replacement",
            RepairType::BatteryReplacement => "Battery Replacement",
            RepairType::ChargingPortRepair => "Charging Port Repair",
            RepairType::WaterDamageDiagnostic => "Water Damage Diagnostic",
            RepairType::CameraMicSpeaker => "Camera / Mic / Speaker",
        }
    }
}

impl fmt::Display for RepairType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RepairType {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RepairType::ALL
            .into_iter()
            .find(|r| r.label() == s)
            .ok_or_else(|| ParseSelectionError {
                kind: "repair type",
                value: s.to_string(),
            })
    }
}

/// The four device brand buckets prices are quoted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DeviceFamily {
    #[serde(rename = "iPhone")]
    IPhone,
    Samsung,
    #[serde(rename = "Google Pixel")]
    GooglePixel,
    #[serde(rename = "Other Android")]
    OtherAndroid,
}

impl DeviceFamily {
    pub const ALL: [DeviceFamily; 4] = [
        DeviceFamily::IPhone,
        DeviceFamily::Samsung,
        DeviceFamily::GooglePixel,
        DeviceFamily::OtherAndroid,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DeviceFamily::IPhone => "iPhone",
            DeviceFamily::Samsung => "Samsung",
            DeviceFamily::GooglePixel => "Google Pixel",
            DeviceFamily::OtherAndroid => "Other Android",
        }
    }
}

impl fmt::Display for DeviceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DeviceFamily {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeviceFamily::ALL
            .into_iter()
            .find(|d| d.label() == s)
            .ok_or_else(|| ParseSelectionError {
                kind: "device family",
                value: s.to_string(),
            })
    }
}

/// A price range in whole dollars, written as `[low, high]` in TOML.
///
/// `low <= high` is checked by [`crate::config::SiteConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct PriceRange {
    pub low: u32,
    pub high: u32,
}

impl PriceRange {
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    /// Midpoint rounded half up, matching `Math.round((low + high) / 2)`.
    pub fn average(&self) -> u32 {
        let sum = u64::from(self.low) + u64::from(self.high);
        ((sum + 1) / 2) as u32
    }
}

impl From<[u32; 2]> for PriceRange {
    fn from([low, high]: [u32; 2]) -> Self {
        Self { low, high }
    }
}

impl From<PriceRange> for [u32; 2] {
    fn from(range: PriceRange) -> Self {
        [range.low, range.high]
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}–${}", self.low, self.high)
    }
}

/// One estimate lookup, created per user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimateRequest {
    pub device: DeviceFamily,
    pub issue: RepairType,
}

/// Outcome of resolving an [`EstimateRequest`] against the pricing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateResult {
    /// A fixed range is published for this combination.
    Priced(PriceRange),
    /// No fixed price; the customer should call for a quote.
    CustomQuote,
}
