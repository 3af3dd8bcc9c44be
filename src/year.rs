//! Footer copyright year.

use crate::dom::Dom;

pub const YEAR_ID: &str = "year";

/// Write the current year into `#year`. Returns the year written, or `None`
/// when the page has no year element.
pub fn stamp_year<D: Dom>(dom: &D) -> Option<i32> {
    let el = dom.element_by_id(YEAR_ID)?;
    let year = dom.current_year();
    dom.set_text(&el, &year.to_string());
    Some(year)
}
