//! [`Dom`] over `web-sys`.
//!
//! DOM failures (a rejected attribute, a missing `history`) are swallowed so
//! one broken call never takes the rest of the page down.

use crate::dom::{Dom, Task};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlDetailsElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions, Window,
};

#[derive(Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    /// `None` outside a browser window (e.g. in a worker).
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn has_property(target: &JsValue, name: &str) -> bool {
        js_sys::Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
    }
}

fn collect(list: web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl Dom for WebDom {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_selector(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        self.document
            .query_selector_all(selector)
            .map(collect)
            .unwrap_or_default()
    }

    fn query_within(&self, parent: &Element, selector: &str) -> Vec<Element> {
        parent
            .query_selector_all(selector)
            .map(collect)
            .unwrap_or_default()
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &web_sys::Node = node;
        ancestor.contains(Some(node))
    }

    fn value(&self, node: &Element) -> String {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, node: &Element, value: &str) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_inner_html(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let Some(el) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = el.style();
        if value.is_empty() {
            let _ = style.remove_property(property);
        } else {
            let _ = style.set_property(property, value);
        }
    }

    fn is_open(&self, node: &Element) -> bool {
        node.dyn_ref::<HtmlDetailsElement>()
            .is_some_and(HtmlDetailsElement::open)
    }

    fn set_open(&self, node: &Element, open: bool) {
        if let Some(details) = node.dyn_ref::<HtmlDetailsElement>() {
            details.set_open(open);
        }
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        self.document.create_element(tag).ok()
    }

    fn prepend(&self, parent: &Element, child: &Element) {
        let _ = parent.prepend_with_node_1(child);
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn append_to_head(&self, node: &Element) {
        if let Some(head) = self.document.head() {
            let _ = head.append_child(node);
        }
    }

    fn reset_form(&self, form: &Element) {
        if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn set_body_scroll_locked(&self, locked: bool) {
        let Some(body) = self.document.body() else {
            return;
        };
        let style = body.style();
        if locked {
            let _ = style.set_property("overflow", "hidden");
        } else {
            let _ = style.remove_property("overflow");
        }
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn page_offset_top(&self, node: &Element) -> f64 {
        node.get_bounding_client_rect().top() + self.scroll_y()
    }

    fn smooth_scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn scroll_into_view(&self, node: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Nearest);
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn push_history(&self, url: &str) {
        if let Ok(history) = self.window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(url));
        }
    }

    fn open_url(&self, url: &str) {
        let _ = self.window.location().set_href(url);
    }

    fn set_timeout(&self, delay_ms: u32, task: Task<Self>) {
        let dom = self.clone();
        let callback = Closure::once_into_js(move || task(&dom));
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        let _ = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                delay,
            );
    }

    fn current_year(&self) -> i32 {
        js_sys::Date::new_0().get_full_year() as i32
    }

    fn local_timestamp(&self) -> String {
        js_sys::Date::new_0()
            .to_locale_string("en-US", &JsValue::UNDEFINED)
            .into()
    }

    fn supports_lazy_loading(&self) -> bool {
        let Ok(image) = js_sys::Reflect::get(&self.window, &JsValue::from_str("HTMLImageElement"))
        else {
            return false;
        };
        js_sys::Reflect::get(&image, &JsValue::from_str("prototype"))
            .is_ok_and(|prototype| Self::has_property(&prototype, "loading"))
    }

    fn register_service_worker(&self, path: &str) {
        let navigator = self.window.navigator();
        if !Self::has_property(&navigator, "serviceWorker") {
            tracing::debug!("service workers unsupported");
            return;
        }
        let promise = navigator.service_worker().register(path);
        let on_error = Closure::<dyn FnMut(JsValue)>::new(|err: JsValue| {
            tracing::debug!(?err, "service worker registration failed");
        });
        let _ = promise.catch(&on_error);
        on_error.forget();
    }
}
