//! Mobile navigation menu and header scroll styling.
//!
//! The menu is a two-state toggle. `open` is the source of truth and the page
//! mirrors it three ways: the menu's `open` class, the toggle's
//! `aria-expanded`, and the body scroll lock.

use crate::config::ScrollConfig;
use crate::dom::Dom;

pub const TOGGLE_ID: &str = "menuToggle";
pub const MENU_ID: &str = "menu";
pub const HEADER_SELECTOR: &str = ".header";

pub struct Navigation<D: Dom> {
    toggle: D::Node,
    menu: D::Node,
    header: Option<D::Node>,
    header_threshold: f64,
    open: bool,
}

impl<D: Dom> Navigation<D> {
    /// Bind to `#menuToggle` and `#menu`. The header is optional; without it
    /// scroll styling is skipped.
    pub fn init(dom: &D, scroll: &ScrollConfig) -> Option<Self> {
        let toggle = dom.element_by_id(TOGGLE_ID)?;
        let menu = dom.element_by_id(MENU_ID)?;
        let nav = Self {
            toggle,
            menu,
            header: dom.query_selector(HEADER_SELECTOR),
            header_threshold: scroll.header_threshold,
            open: false,
        };
        nav.sync(dom);
        Some(nav)
    }

    pub fn toggle_button(&self) -> &D::Node {
        &self.toggle
    }

    /// Links inside the menu; each one closes it when clicked.
    pub fn links(&self, dom: &D) -> Vec<D::Node> {
        dom.query_within(&self.menu, "a")
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self, dom: &D) {
        self.open = !self.open;
        self.sync(dom);
    }

    pub fn close(&mut self, dom: &D) {
        self.open = false;
        self.sync(dom);
    }

    /// A click anywhere on the page. Clicks outside both the menu and its
    /// toggle close the menu.
    pub fn on_document_click(&mut self, dom: &D, target: &D::Node) {
        if !dom.contains(&self.menu, target) && !dom.contains(&self.toggle, target) {
            self.close(dom);
        }
    }

    pub fn on_keydown(&mut self, dom: &D, key: &str) {
        if key == "Escape" && self.open {
            self.close(dom);
        }
    }

    /// The `.header` element styled on scroll, if the page has one.
    pub fn header(&self) -> Option<&D::Node> {
        self.header.as_ref()
    }

    pub fn header_threshold(&self) -> f64 {
        self.header_threshold
    }

    fn sync(&self, dom: &D) {
        if self.open {
            dom.add_class(&self.menu, "open");
        } else {
            dom.remove_class(&self.menu, "open");
        }
        dom.set_attribute(
            &self.toggle,
            "aria-expanded",
            if self.open { "true" } else { "false" },
        );
        dom.set_body_scroll_locked(self.open);
    }
}

/// Toggle `scrolled` on `header` depending on the current scroll position.
pub fn style_header<D: Dom>(dom: &D, header: &D::Node, threshold: f64) {
    if dom.scroll_y() > threshold {
        dom.add_class(header, "scrolled");
    } else {
        dom.remove_class(header, "scrolled");
    }
}
