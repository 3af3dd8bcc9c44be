//! Price estimate lookup.
//!
//! [`resolve_selection`] is the decision logic: two raw select values in, a
//! priced range, a custom-quote sentinel, or a validation error out. It is a
//! pure function of the table and the inputs, so the page re-runs it on every
//! change. [`EstimateCalculator`] binds it to the estimate form.

use crate::config::{BusinessConfig, PricingTable};
use crate::dom::Dom;
use crate::markup;
use crate::types::{DeviceFamily, EstimateRequest, EstimateResult, RepairType};
use thiserror::Error;

pub const FORM_ID: &str = "estimateForm";
pub const RESULT_ID: &str = "estimateResult";
pub const DEVICE_ID: &str = "device";
pub const ISSUE_ID: &str = "issue";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateError {
    #[error("Please select both device and issue type")]
    MissingSelection,
}

/// Resolve raw select values against the pricing table.
///
/// An empty value on either side is a validation error. A value that names
/// no known device family or repair type is not: it simply has no published
/// price and resolves to [`EstimateResult::CustomQuote`].
pub fn resolve_selection(
    table: &PricingTable,
    device: &str,
    issue: &str,
) -> Result<EstimateResult, EstimateError> {
    let (device, issue) = (device.trim(), issue.trim());
    if device.is_empty() || issue.is_empty() {
        return Err(EstimateError::MissingSelection);
    }
    let request = match (device.parse::<DeviceFamily>(), issue.parse::<RepairType>()) {
        (Ok(device), Ok(issue)) => EstimateRequest { device, issue },
        _ => return Ok(EstimateResult::CustomQuote),
    };
    Ok(table.resolve(&request))
}

/// The estimate form: two selects and a result panel.
pub struct EstimateCalculator<D: Dom> {
    form: D::Node,
    result: D::Node,
    device: D::Node,
    issue: D::Node,
    table: PricingTable,
    tel: String,
    display_phone: String,
}

impl<D: Dom> EstimateCalculator<D> {
    /// Bind to the page. `None` if any of the four elements is missing.
    pub fn init(dom: &D, table: &PricingTable, business: &BusinessConfig) -> Option<Self> {
        Some(Self {
            form: dom.element_by_id(FORM_ID)?,
            result: dom.element_by_id(RESULT_ID)?,
            device: dom.element_by_id(DEVICE_ID)?,
            issue: dom.element_by_id(ISSUE_ID)?,
            table: table.clone(),
            tel: business.phone.clone(),
            display_phone: business.display_phone(),
        })
    }

    pub fn form(&self) -> &D::Node {
        &self.form
    }

    /// The two selects, for binding `change` listeners.
    pub fn selects(&self) -> [&D::Node; 2] {
        [&self.device, &self.issue]
    }

    /// A select changed: recalculate once both have a value.
    pub fn on_change(&self, dom: &D) -> Option<Result<EstimateResult, EstimateError>> {
        if dom.value(&self.device).is_empty() || dom.value(&self.issue).is_empty() {
            return None;
        }
        Some(self.calculate(dom))
    }

    /// The form was submitted (the binding prevents the real submit).
    pub fn on_submit(&self, dom: &D) -> Result<EstimateResult, EstimateError> {
        self.calculate(dom)
    }

    /// Resolve the current selection and render it into the result panel.
    pub fn calculate(&self, dom: &D) -> Result<EstimateResult, EstimateError> {
        let device = dom.value(&self.device);
        let issue = dom.value(&self.issue);
        let outcome = resolve_selection(&self.table, &device, &issue);

        let html = match &outcome {
            Ok(EstimateResult::Priced(range)) => {
                markup::estimate(*range, device.trim(), issue.trim())
            }
            Ok(EstimateResult::CustomQuote) => markup::custom_quote(&self.tel, &self.display_phone),
            Err(err) => markup::estimate_error(&err.to_string()),
        };
        dom.add_class(&self.result, "has-value");
        dom.set_inner_html(&self.result, &html.into_string());
        if matches!(outcome, Ok(EstimateResult::Priced(_))) {
            dom.scroll_into_view(&self.result);
        }

        tracing::debug!(%device, %issue, ?outcome, "estimate calculated");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryDom;
    use crate::test_helpers::*;
    use crate::types::PriceRange;

    #[test]
    fn screen_replacement_iphone() {
        let table = PricingTable::default();
        let result = resolve_selection(&table, "iPhone", "Screen Replacement").unwrap();
        let EstimateResult::Priced(range) = result else {
            panic!("expected a price, got {result:?}");
        };
        assert_eq!(range, PriceRange::new(119, 249));
        assert_eq!(range.average(), 184);
    }

    #[test]
    fn water_damage_samsung() {
        let table = PricingTable::default();
        let result = resolve_selection(&table, "Samsung", "Water Damage Diagnostic").unwrap();
        assert_eq!(result, EstimateResult::Priced(PriceRange::new(39, 89)));
    }

    #[test]
    fn unknown_brand_is_custom_quote() {
        let table = PricingTable::default();
        let result = resolve_selection(&table, "UnknownBrand", "Battery Replacement");
        assert_eq!(result, Ok(EstimateResult::CustomQuote));
    }

    #[test]
    fn unpriced_pair_is_custom_quote() {
        let result = resolve_selection(&PricingTable::empty(), "iPhone", "Screen Replacement");
        assert_eq!(result, Ok(EstimateResult::CustomQuote));
    }

    #[test]
    fn empty_selection_is_error() {
        let table = PricingTable::default();
        assert_eq!(
            resolve_selection(&table, "", ""),
            Err(EstimateError::MissingSelection)
        );
        assert_eq!(
            resolve_selection(&table, "iPhone", "  "),
            Err(EstimateError::MissingSelection)
        );
        assert_eq!(
            resolve_selection(&table, "", "Screen Replacement"),
            Err(EstimateError::MissingSelection)
        );
    }

    #[test]
    fn resolution_is_idempotent() {
        let table = PricingTable::default();
        let first = resolve_selection(&table, "Google Pixel", "Charging Port Repair");
        let second = resolve_selection(&table, "Google Pixel", "Charging Port Repair");
        assert_eq!(first, second);
    }

    // =========================================================================
    // Component tests
    // =========================================================================

    fn calculator(dom: &MemoryDom) -> EstimateCalculator<MemoryDom> {
        EstimateCalculator::init(dom, &PricingTable::default(), &BusinessConfig::default())
            .expect("estimate form present")
    }

    #[test]
    fn init_requires_all_elements() {
        let dom = MemoryDom::new();
        let form = dom.element(&dom.body(), "form#estimateForm");
        dom.element(&form, "select#device");
        dom.element(&form, "select#issue");
        // no #estimateResult
        assert!(
            EstimateCalculator::init(&dom, &PricingTable::default(), &BusinessConfig::default())
                .is_none()
        );
    }

    #[test]
    fn submit_renders_price_and_scrolls() {
        let (dom, page) = landing_page();
        let calc = calculator(&dom);
        dom.set_value(&page.device, "iPhone");
        dom.set_value(&page.issue, "Screen Replacement");

        let outcome = calc.on_submit(&dom);
        assert_eq!(
            outcome,
            Ok(EstimateResult::Priced(PriceRange::new(119, 249)))
        );
        assert!(dom.has_class(&page.estimate_result, "has-value"));
        let html = dom.inner_html(&page.estimate_result);
        assert!(html.contains("$119–$249"));
        assert!(html.contains("iPhone - Screen Replacement"));
        assert_eq!(dom.scrolled_into_view(), vec![page.estimate_result]);
    }

    #[test]
    fn submit_without_selection_shows_error() {
        let (dom, page) = landing_page();
        let calc = calculator(&dom);

        let outcome = calc.on_submit(&dom);
        assert_eq!(outcome, Err(EstimateError::MissingSelection));
        let html = dom.inner_html(&page.estimate_result);
        assert!(html.contains("Please select both device and issue type"));
        assert!(dom.scrolled_into_view().is_empty());
    }

    #[test]
    fn custom_quote_card_uses_business_phone() {
        let (dom, page) = landing_page();
        let calc = calculator(&dom);
        dom.set_value(&page.device, "Nokia");
        dom.set_value(&page.issue, "Battery Replacement");

        assert_eq!(calc.on_submit(&dom), Ok(EstimateResult::CustomQuote));
        let html = dom.inner_html(&page.estimate_result);
        assert!(html.contains("Custom Quote Needed"));
        assert!(html.contains("tel:+19183760093"));
        assert!(html.contains("(918) 376-0093"));
    }

    #[test]
    fn change_waits_for_both_selects() {
        let (dom, page) = landing_page();
        let calc = calculator(&dom);

        dom.set_value(&page.device, "Samsung");
        assert_eq!(calc.on_change(&dom), None);
        assert_eq!(dom.inner_html(&page.estimate_result), "");

        dom.set_value(&page.issue, "Battery Replacement");
        assert_eq!(
            calc.on_change(&dom),
            Some(Ok(EstimateResult::Priced(PriceRange::new(69, 139))))
        );
    }
}
