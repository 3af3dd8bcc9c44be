//! In-memory page host.
//!
//! `MemoryDom` is a small element tree plus the bits of window state the
//! components touch (scroll position, history, body scroll lock) and a
//! virtual clock for [`Dom::set_timeout`]. Tests build a page with
//! [`MemoryDom::element`], drive component handlers, and inspect the result.
//!
//! ```
//! use phone_repairs::dom::{Dom, memory::MemoryDom};
//!
//! let dom = MemoryDom::new();
//! let menu = dom.element(&dom.body(), "nav#menu.menu");
//! assert_eq!(dom.element_by_id("menu"), Some(menu));
//! assert_eq!(dom.query_selector_all(".menu").len(), 1);
//! ```
//!
//! Selectors support compound selectors (`tag`, `#id`, `.class`, `[attr]`,
//! `[attr="v"]`, `[attr^="v"]`) and comma-separated lists. Combinators are
//! not supported.

use super::{Dom, Task};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// Handle to an element in a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

const ROOT: NodeId = NodeId(0);
const HEAD: NodeId = NodeId(1);
const BODY: NodeId = NodeId(2);

#[derive(Debug, Default)]
struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    value: String,
    text: String,
    inner_html: String,
    open: bool,
    offset_top: f64,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug)]
struct Document {
    nodes: Vec<Element>,
    scroll_y: f64,
    body_scroll_locked: bool,
    history: Vec<String>,
    opened_urls: Vec<String>,
    scroll_positions: Vec<f64>,
    scrolled_into_view: Vec<NodeId>,
    service_workers: Vec<String>,
    year: i32,
    timestamp: String,
    lazy_loading: bool,
}

struct Timer {
    due: u64,
    seq: u64,
    task: Task<MemoryDom>,
}

pub struct MemoryDom {
    doc: RefCell<Document>,
    timers: RefCell<Vec<Timer>>,
    now: Cell<u64>,
    next_seq: Cell<u64>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// An empty document: `<html><head></head><body></body></html>`.
    pub fn new() -> Self {
        let mut nodes = Vec::new();
        for (tag, parent) in [("html", None), ("head", Some(ROOT)), ("body", Some(ROOT))] {
            nodes.push(Element {
                tag: tag.to_string(),
                parent,
                ..Element::default()
            });
        }
        nodes[ROOT.0].children = vec![HEAD, BODY];

        Self {
            doc: RefCell::new(Document {
                nodes,
                scroll_y: 0.0,
                body_scroll_locked: false,
                history: Vec::new(),
                opened_urls: Vec::new(),
                scroll_positions: Vec::new(),
                scrolled_into_view: Vec::new(),
                service_workers: Vec::new(),
                year: 2025,
                timestamp: "1/1/2025, 12:00:00 PM".to_string(),
                lazy_loading: true,
            }),
            timers: RefCell::new(Vec::new()),
            now: Cell::new(0),
            next_seq: Cell::new(0),
        }
    }

    pub fn head(&self) -> NodeId {
        HEAD
    }

    pub fn body(&self) -> NodeId {
        BODY
    }

    /// Append a new element under `parent`, described as `tag#id.class.class`.
    ///
    /// Both the id and the classes are optional: `"select#device"`,
    /// `"details.faq-item"`, `"a"`.
    pub fn element(&self, parent: &NodeId, spec: &str) -> NodeId {
        let compound = Compound::parse(spec);
        let node = self.new_node(compound.tag.as_deref().unwrap_or("div"));
        {
            let mut doc = self.doc.borrow_mut();
            let el = &mut doc.nodes[node.0];
            if let Some(id) = compound.id {
                el.attributes.insert("id".to_string(), id);
            }
            el.classes = compound.classes;
        }
        self.append(parent, &node);
        node
    }

    pub fn append(&self, parent: &NodeId, child: &NodeId) {
        let mut doc = self.doc.borrow_mut();
        detach(&mut doc, *child);
        doc.nodes[child.0].parent = Some(*parent);
        doc.nodes[parent.0].children.push(*child);
    }

    fn new_node(&self, tag: &str) -> NodeId {
        let mut doc = self.doc.borrow_mut();
        doc.nodes.push(Element {
            tag: tag.to_ascii_lowercase(),
            ..Element::default()
        });
        NodeId(doc.nodes.len() - 1)
    }

    // -- inspection -------------------------------------------------------------

    pub fn tag(&self, node: &NodeId) -> String {
        self.doc.borrow().nodes[node.0].tag.clone()
    }

    pub fn text(&self, node: &NodeId) -> String {
        self.doc.borrow().nodes[node.0].text.clone()
    }

    pub fn inner_html(&self, node: &NodeId) -> String {
        self.doc.borrow().nodes[node.0].inner_html.clone()
    }

    pub fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.doc.borrow().nodes[node.0].styles.get(property).cloned()
    }

    pub fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.doc.borrow().nodes[node.0].children.clone()
    }

    /// Whether `node` is reachable from the document root.
    pub fn is_attached(&self, node: &NodeId) -> bool {
        self.contains(&ROOT, node)
    }

    pub fn body_scroll_locked(&self) -> bool {
        self.doc.borrow().body_scroll_locked
    }

    pub fn history(&self) -> Vec<String> {
        self.doc.borrow().history.clone()
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.doc.borrow().opened_urls.clone()
    }

    /// Targets passed to [`Dom::smooth_scroll_to`], oldest first.
    pub fn scroll_positions(&self) -> Vec<f64> {
        self.doc.borrow().scroll_positions.clone()
    }

    pub fn scrolled_into_view(&self) -> Vec<NodeId> {
        self.doc.borrow().scrolled_into_view.clone()
    }

    pub fn registered_service_workers(&self) -> Vec<String> {
        self.doc.borrow().service_workers.clone()
    }

    // -- environment setup -------------------------------------------------------

    pub fn set_scroll_y(&self, y: f64) {
        self.doc.borrow_mut().scroll_y = y;
    }

    pub fn set_offset_top(&self, node: &NodeId, top: f64) {
        self.doc.borrow_mut().nodes[node.0].offset_top = top;
    }

    pub fn set_year(&self, year: i32) {
        self.doc.borrow_mut().year = year;
    }

    pub fn set_timestamp(&self, timestamp: &str) {
        self.doc.borrow_mut().timestamp = timestamp.to_string();
    }

    pub fn set_lazy_loading_supported(&self, supported: bool) {
        self.doc.borrow_mut().lazy_loading = supported;
    }

    // -- virtual clock -----------------------------------------------------------

    /// Milliseconds elapsed on the virtual clock.
    pub fn now(&self) -> u64 {
        self.now.get()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Move the clock forward by `ms`, running every timer that comes due in
    /// deadline order. Timers scheduled by a running task are honored if they
    /// fall inside the window.
    pub fn advance(&self, ms: u64) {
        let target = self.now.get() + ms;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let due = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i);
                due.map(|i| timers.remove(i))
            };
            let Some(timer) = next else { break };
            self.now.set(timer.due);
            (timer.task)(self);
        }
        self.now.set(target);
    }

    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let doc = self.doc.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = doc.nodes[root.0].children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(doc.nodes[node.0].children.iter().rev().copied());
        }
        out
    }

    fn select(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let list: Vec<Compound> = selector.split(',').map(Compound::parse).collect();
        let candidates = self.descendants(root);
        let doc = self.doc.borrow();
        candidates
            .into_iter()
            .filter(|n| list.iter().any(|c| c.matches(&doc.nodes[n.0])))
            .collect()
    }
}

fn detach(doc: &mut Document, node: NodeId) {
    if let Some(parent) = doc.nodes[node.0].parent.take() {
        doc.nodes[parent.0].children.retain(|c| *c != node);
    }
}

fn clear_children(doc: &mut Document, node: NodeId) {
    for child in std::mem::take(&mut doc.nodes[node.0].children) {
        doc.nodes[child.0].parent = None;
    }
}

fn is_form_control(tag: &str) -> bool {
    matches!(tag, "input" | "select" | "textarea")
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let doc = self.doc.borrow();
        let found = (0..doc.nodes.len())
            .map(NodeId)
            .find(|n| doc.nodes[n.0].attributes.get("id").map(String::as_str) == Some(id));
        drop(doc);
        found.filter(|n| self.is_attached(n))
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.select(ROOT, selector).into_iter().next()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        self.select(ROOT, selector)
    }

    fn query_within(&self, parent: &NodeId, selector: &str) -> Vec<NodeId> {
        self.select(*parent, selector)
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let doc = self.doc.borrow();
        let mut current = Some(*node);
        while let Some(n) = current {
            if n == *ancestor {
                return true;
            }
            current = doc.nodes[n.0].parent;
        }
        false
    }

    fn value(&self, node: &NodeId) -> String {
        let doc = self.doc.borrow();
        let el = &doc.nodes[node.0];
        if is_form_control(&el.tag) {
            el.value.clone()
        } else {
            String::new()
        }
    }

    fn set_value(&self, node: &NodeId, value: &str) {
        let mut doc = self.doc.borrow_mut();
        let el = &mut doc.nodes[node.0];
        if is_form_control(&el.tag) {
            el.value = value.to_string();
        }
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        let mut doc = self.doc.borrow_mut();
        clear_children(&mut doc, *node);
        let el = &mut doc.nodes[node.0];
        el.text = text.to_string();
        el.inner_html.clear();
    }

    fn set_inner_html(&self, node: &NodeId, html: &str) {
        let mut doc = self.doc.borrow_mut();
        clear_children(&mut doc, *node);
        let el = &mut doc.nodes[node.0];
        el.inner_html = html.to_string();
        el.text.clear();
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.doc.borrow().nodes[node.0].attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.doc.borrow_mut().nodes[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.doc.borrow().nodes[node.0]
            .classes
            .iter()
            .any(|c| c == class)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        let mut doc = self.doc.borrow_mut();
        let classes = &mut doc.nodes[node.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.doc.borrow_mut().nodes[node.0]
            .classes
            .retain(|c| c != class);
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        let mut doc = self.doc.borrow_mut();
        let styles = &mut doc.nodes[node.0].styles;
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_string(), value.to_string());
        }
    }

    fn is_open(&self, node: &NodeId) -> bool {
        let doc = self.doc.borrow();
        let el = &doc.nodes[node.0];
        el.tag == "details" && el.open
    }

    fn set_open(&self, node: &NodeId, open: bool) {
        let mut doc = self.doc.borrow_mut();
        let el = &mut doc.nodes[node.0];
        if el.tag == "details" {
            el.open = open;
        }
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        Some(self.new_node(tag))
    }

    fn prepend(&self, parent: &NodeId, child: &NodeId) {
        let mut doc = self.doc.borrow_mut();
        detach(&mut doc, *child);
        doc.nodes[child.0].parent = Some(*parent);
        doc.nodes[parent.0].children.insert(0, *child);
    }

    fn remove(&self, node: &NodeId) {
        detach(&mut self.doc.borrow_mut(), *node);
    }

    fn append_to_head(&self, node: &NodeId) {
        self.append(&HEAD, node);
    }

    fn reset_form(&self, form: &NodeId) {
        let controls = self.descendants(*form);
        let mut doc = self.doc.borrow_mut();
        for node in controls {
            let el = &mut doc.nodes[node.0];
            if is_form_control(&el.tag) {
                el.value = el.attributes.get("value").cloned().unwrap_or_default();
            }
        }
    }

    fn set_body_scroll_locked(&self, locked: bool) {
        self.doc.borrow_mut().body_scroll_locked = locked;
    }

    fn scroll_y(&self) -> f64 {
        self.doc.borrow().scroll_y
    }

    fn page_offset_top(&self, node: &NodeId) -> f64 {
        self.doc.borrow().nodes[node.0].offset_top
    }

    fn smooth_scroll_to(&self, top: f64) {
        let mut doc = self.doc.borrow_mut();
        doc.scroll_positions.push(top);
        doc.scroll_y = top;
    }

    fn scroll_into_view(&self, node: &NodeId) {
        self.doc.borrow_mut().scrolled_into_view.push(*node);
    }

    fn push_history(&self, url: &str) {
        self.doc.borrow_mut().history.push(url.to_string());
    }

    fn open_url(&self, url: &str) {
        self.doc.borrow_mut().opened_urls.push(url.to_string());
    }

    fn set_timeout(&self, delay_ms: u32, task: Task<Self>) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer {
            due: self.now.get() + u64::from(delay_ms),
            seq,
            task,
        });
    }

    fn current_year(&self) -> i32 {
        self.doc.borrow().year
    }

    fn local_timestamp(&self) -> String {
        self.doc.borrow().timestamp.clone()
    }

    fn supports_lazy_loading(&self) -> bool {
        self.doc.borrow().lazy_loading
    }

    fn register_service_worker(&self, path: &str) {
        self.doc.borrow_mut().service_workers.push(path.to_string());
    }
}

// ============================================================================
// Selector matching
// ============================================================================

#[derive(Debug, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, AttrOp)>,
}

#[derive(Debug)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

const DELIMITERS: [char; 3] = ['.', '#', '['];

impl Compound {
    fn parse(selector: &str) -> Self {
        let mut compound = Compound::default();
        let mut rest = selector.trim();

        let end = rest.find(DELIMITERS).unwrap_or(rest.len());
        if end > 0 {
            compound.tag = Some(rest[..end].to_ascii_lowercase());
        }
        rest = &rest[end..];

        while let Some(first) = rest.chars().next() {
            match first {
                '[' => {
                    let close = rest.find(']').unwrap_or(rest.len());
                    compound.attrs.push(parse_attr(&rest[1..close]));
                    rest = rest.get(close + 1..).unwrap_or("");
                }
                '.' | '#' => {
                    let body = &rest[1..];
                    let end = body.find(DELIMITERS).unwrap_or(body.len());
                    let name = body[..end].to_string();
                    if first == '.' {
                        compound.classes.push(name);
                    } else {
                        compound.id = Some(name);
                    }
                    rest = &body[end..];
                }
                _ => break,
            }
        }
        compound
    }

    fn matches(&self, el: &Element) -> bool {
        if self.tag.as_ref().is_some_and(|t| *t != el.tag) {
            return false;
        }
        if let Some(id) = &self.id {
            if el.attributes.get("id") != Some(id) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| el.classes.contains(c)) {
            return false;
        }
        self.attrs.iter().all(|(name, op)| {
            let value = el.attributes.get(name);
            match op {
                AttrOp::Exists => value.is_some(),
                AttrOp::Equals(expected) => value == Some(expected),
                AttrOp::Prefix(prefix) => value.is_some_and(|v| v.starts_with(prefix.as_str())),
            }
        })
    }
}

fn parse_attr(inner: &str) -> (String, AttrOp) {
    let unquote = |v: &str| v.trim().trim_matches(|c| c == '"' || c == '\'').to_string();
    if let Some((name, value)) = inner.split_once("^=") {
        (name.trim().to_string(), AttrOp::Prefix(unquote(value)))
    } else if let Some((name, value)) = inner.split_once('=') {
        (name.trim().to_string(), AttrOp::Equals(unquote(value)))
    } else {
        (inner.trim().to_string(), AttrOp::Exists)
    }
}
