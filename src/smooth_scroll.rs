//! In-page anchor links.
//!
//! Clicking `<a href="#section">` scrolls smoothly to the section, leaving
//! room for the fixed header, and records the fragment in history without
//! the native jump.

use crate::dom::Dom;
use crate::utils;

pub const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;

pub struct SmoothScroll<D: Dom> {
    anchors: Vec<D::Node>,
    offset: f64,
}

impl<D: Dom> SmoothScroll<D> {
    pub fn init(dom: &D, offset: f64) -> Self {
        Self {
            anchors: dom.query_selector_all(ANCHOR_SELECTOR),
            offset,
        }
    }

    pub fn anchors(&self) -> &[D::Node] {
        &self.anchors
    }

    /// Handle a click on an anchor. Returns `true` when the default action
    /// should be prevented. A bare `#` is left to the browser.
    pub fn on_click(&self, dom: &D, anchor: &D::Node) -> bool {
        let Some(href) = dom.attribute(anchor, "href") else {
            return false;
        };
        if href == "#" {
            return false;
        }
        utils::smooth_scroll(dom, &href, self.offset);
        dom.push_history(&href);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn collects_in_page_anchors_only() {
        let (dom, page) = landing_page();
        let scroll = SmoothScroll::init(&dom, 80.0);
        assert_eq!(scroll.anchors(), page.anchors.as_slice());
    }

    #[test]
    fn click_scrolls_with_offset_and_pushes_history() {
        let (dom, page) = landing_page();
        let scroll = SmoothScroll::init(&dom, 80.0);

        assert!(scroll.on_click(&dom, &page.anchors[0]));
        assert_eq!(dom.scroll_positions(), vec![400.0 - 80.0]);
        assert_eq!(dom.history(), vec!["#services".to_string()]);
    }

    #[test]
    fn bare_hash_is_left_alone() {
        let (dom, page) = landing_page();
        let scroll = SmoothScroll::init(&dom, 80.0);

        assert!(!scroll.on_click(&dom, &page.top_link));
        assert!(dom.scroll_positions().is_empty());
        assert!(dom.history().is_empty());
    }

    #[test]
    fn missing_target_still_updates_history() {
        let (dom, page) = landing_page();
        let scroll = SmoothScroll::init(&dom, 80.0);
        dom.set_attribute(&page.anchors[0], "href", "#nowhere");

        assert!(scroll.on_click(&dom, &page.anchors[0]));
        assert!(dom.scroll_positions().is_empty());
        assert_eq!(dom.history(), vec!["#nowhere".to_string()]);
    }
}
