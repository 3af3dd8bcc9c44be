//! # Phone Repairs
//!
//! The interactive layer of a phone repair shop's single-page marketing site:
//! a mobile menu, an instant price estimator, a contact form that hands off to
//! the visitor's mail client, and a handful of cosmetic touches (FAQ toggles,
//! reveal animations, smooth anchor scrolling, lazy images, the footer year).
//!
//! # Architecture
//!
//! Every component is a plain struct generic over [`dom::Dom`], the page host.
//! Components own their element handles and state and expose handler methods;
//! the host decides which events reach them.
//!
//! ```text
//!   browser events ──▶ web::start ──▶ App<WebDom> ──▶ components ──▶ Dom calls
//!   tests          ──────────────────▶ App<MemoryDom> ─┘
//! ```
//!
//! The decision logic (price lookup, contact validation, phone masking) is
//! pure and lives beside the component that uses it, so the CLI shares it
//! without a page at all.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | Composition root: binds every component once at startup |
//! | [`navigation`] | Mobile menu state and header scroll styling |
//! | [`estimate`] | Pricing lookup and the estimate form |
//! | [`contact`] | Contact validation, `mailto:` link, notifications |
//! | [`faq`], [`animations`], [`smooth_scroll`], [`year`], [`performance`] | Cosmetic modules |
//! | [`config`] | `site.toml` loading, merging over stock defaults, validation |
//! | [`types`] | Repair types, device families, price ranges |
//! | [`markup`] | Maud fragments injected into the page |
//! | [`utils`] | Phone formatting, URI encoding, debounce, smooth scroll |
//! | [`dom`] | The host trait and its in-memory implementation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Trait Between Logic And Browser
//!
//! Nothing outside `web` touches `web-sys`. The [`dom::Dom`] trait is the
//! only surface components see, and [`dom::memory::MemoryDom`] implements it
//! with a virtual clock, so debounces and notification timeouts are tested
//! deterministically on the host.
//!
//! ## Unknown Means Custom Quote
//!
//! A device/repair pair with no published price is not an error. It resolves
//! to a custom-quote card with the shop's phone number. Only an empty
//! selection is a validation error.
//!
//! ## Mail Client Hand-Off
//!
//! The contact form never sends anything. It builds a `mailto:` link with the
//! request pre-filled and opens it; the visitor sends the draft.

pub mod animations;
pub mod app;
pub mod config;
pub mod contact;
pub mod dom;
pub mod estimate;
pub mod faq;
pub mod markup;
pub mod navigation;
pub mod output;
pub mod performance;
pub mod smooth_scroll;
pub mod types;
pub mod utils;
pub mod year;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

#[cfg(test)]
pub(crate) mod test_helpers;
