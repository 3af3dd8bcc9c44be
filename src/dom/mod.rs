//! The page host as seen by the components.
//!
//! Every component talks to the page through [`Dom`] and never touches a
//! browser API directly. In the wasm build the host is `web::WebDom`, a thin
//! wrapper over `web-sys`; in tests and on the CLI side it is
//! [`memory::MemoryDom`], an in-memory document with a virtual clock.
//!
//! The trait takes `&self` everywhere because the DOM is a shared,
//! interior-mutable structure: handlers hold node handles, not borrows.
//! Operations on a node that doesn't support them (setting `open` on a `div`,
//! reading the value of a `span`) are silently ignored, as in the browser.

pub mod memory;

/// A deferred task. It receives the host when it fires.
pub type Task<D> = Box<dyn FnOnce(&D)>;

pub trait Dom: Sized + 'static {
    /// Handle to an element. Cheap to clone; equality is identity.
    type Node: Clone + PartialEq + 'static;

    // -- lookup ---------------------------------------------------------------

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    fn query_selector(&self, selector: &str) -> Option<Self::Node>;
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Node>;
    /// `parent.querySelectorAll(selector)`: descendants only.
    fn query_within(&self, parent: &Self::Node, selector: &str) -> Vec<Self::Node>;
    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    // -- content and attributes ------------------------------------------------

    /// Current value of a form control; empty for anything else.
    fn value(&self, node: &Self::Node) -> String;
    fn set_value(&self, node: &Self::Node, value: &str);
    fn set_text(&self, node: &Self::Node, text: &str);
    fn set_inner_html(&self, node: &Self::Node, html: &str);
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    /// Inline style property; an empty value removes it.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    /// `<details open>` state.
    fn is_open(&self, node: &Self::Node) -> bool;
    fn set_open(&self, node: &Self::Node, open: bool);

    // -- structure ---------------------------------------------------------------

    /// A new detached element; `None` if the host refuses the tag.
    fn create_element(&self, tag: &str) -> Option<Self::Node>;
    /// Insert `child` as the first child of `parent`.
    fn prepend(&self, parent: &Self::Node, child: &Self::Node);
    /// Detach `node` from the document. No-op if already detached.
    fn remove(&self, node: &Self::Node);
    fn append_to_head(&self, node: &Self::Node);
    /// Restore every control in a form to its initial (empty) value.
    fn reset_form(&self, form: &Self::Node);

    // -- window ----------------------------------------------------------------

    /// `overflow: hidden` on `<body>` while `true`.
    fn set_body_scroll_locked(&self, locked: bool);
    fn scroll_y(&self) -> f64;
    /// Distance from the top of the page to the top of `node`.
    fn page_offset_top(&self, node: &Self::Node) -> f64;
    fn smooth_scroll_to(&self, top: f64);
    /// Smoothly scroll the nearest edge of `node` into view.
    fn scroll_into_view(&self, node: &Self::Node);
    fn push_history(&self, url: &str);
    /// Navigate to `url`. For `mailto:` links this opens the mail client.
    fn open_url(&self, url: &str);
    /// Run `task` once after `delay_ms`.
    fn set_timeout(&self, delay_ms: u32, task: Task<Self>);

    // -- environment -------------------------------------------------------------

    fn current_year(&self) -> i32;
    /// Local date and time, formatted for humans.
    fn local_timestamp(&self) -> String;
    /// Whether `<img loading="lazy">` is understood natively.
    fn supports_lazy_loading(&self) -> bool;
    /// Best-effort service worker registration; failures are swallowed.
    fn register_service_worker(&self, path: &str);
}
