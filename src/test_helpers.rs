//! Shared test utilities: a landing page fixture built on [`MemoryDom`].
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (dom, page) = landing_page();
//! dom.set_value(&page.device, "iPhone");
//! ```

use crate::dom::Dom;
use crate::dom::memory::{MemoryDom, NodeId};

/// Handles to the interesting elements of [`landing_page`].
pub struct Page {
    pub header: NodeId,
    pub menu_toggle: NodeId,
    pub menu: NodeId,
    pub menu_links: Vec<NodeId>,
    /// A paragraph outside the menu, for outside-click tests.
    pub outside: NodeId,
    pub cards: Vec<NodeId>,
    pub device: NodeId,
    pub issue: NodeId,
    pub estimate_result: NodeId,
    pub faq_items: Vec<NodeId>,
    pub contact_form: NodeId,
    pub name: NodeId,
    pub phone: NodeId,
    pub device_field: NodeId,
    pub issue_field: NodeId,
    pub lazy_images: Vec<NodeId>,
    pub year: NodeId,
    /// `<a href="#">` in the footer.
    pub top_link: NodeId,
    /// Every `a[href^="#"]`, in document order.
    pub anchors: Vec<NodeId>,
}

fn link(dom: &MemoryDom, parent: &NodeId, href: &str) -> NodeId {
    let a = dom.element(parent, "a");
    dom.set_attribute(&a, "href", href);
    a
}

/// Build the full marketing page the scripts expect.
///
/// Layout (offsets in px): `#services` at 400, `#contact` at 1800.
pub fn landing_page() -> (MemoryDom, Page) {
    let dom = MemoryDom::new();
    let body = dom.body();

    // Header and menu
    let header = dom.element(&body, "header.header");
    let menu_toggle = dom.element(&header, "button#menuToggle");
    let menu = dom.element(&header, "nav#menu");
    let menu_links = vec![
        link(&dom, &menu, "#services"),
        link(&dom, &menu, "#contact"),
    ];
    let outside = dom.element(&body, "p.hero-copy");

    // Services and estimate
    let services = dom.element(&body, "section#services");
    dom.set_offset_top(&services, 400.0);
    let cards = vec![
        dom.element(&services, "div.service-card"),
        dom.element(&services, "div.service-card"),
        dom.element(&services, "div.pricing-card"),
    ];
    let estimate_form = dom.element(&services, "form#estimateForm");
    let device = dom.element(&estimate_form, "select#device");
    let issue = dom.element(&estimate_form, "select#issue");
    let estimate_result = dom.element(&services, "div#estimateResult");

    // FAQ
    let faq = dom.element(&body, "section#faq");
    let faq_items: Vec<NodeId> = (0..2)
        .map(|_| {
            let item = dom.element(&faq, "details.faq-item");
            dom.element(&item, "summary");
            dom.element(&item, "p");
            item
        })
        .collect();

    // Contact
    let contact = dom.element(&body, "section#contact");
    dom.set_offset_top(&contact, 1800.0);
    let contact_form = dom.element(&contact, "form#contactForm");
    let name = dom.element(&contact_form, "input#name");
    let phone = dom.element(&contact_form, "input#phone");
    dom.element(&contact_form, "input#email");
    let device_field = dom.element(&contact_form, "input#deviceField");
    let issue_field = dom.element(&contact_form, "input#issueField");
    dom.element(&contact_form, "textarea#message");

    // Images and footer
    let lazy_with_src = dom.element(&body, "img");
    dom.set_attribute(&lazy_with_src, "loading", "lazy");
    dom.set_attribute(&lazy_with_src, "data-src", "/img/storefront.avif");
    let lazy_without_src = dom.element(&body, "img");
    dom.set_attribute(&lazy_without_src, "loading", "lazy");

    let footer = dom.element(&body, "footer");
    let year = dom.element(&footer, "span#year");
    let top_link = link(&dom, &footer, "#");
    link(&dom, &footer, "https://maps.example.com/tulsa");

    let anchors = vec![menu_links[0], menu_links[1], top_link];

    let page = Page {
        header,
        menu_toggle,
        menu,
        menu_links,
        outside,
        cards,
        device,
        issue,
        estimate_result,
        faq_items,
        contact_form,
        name,
        phone,
        device_field,
        issue_field,
        lazy_images: vec![lazy_with_src, lazy_without_src],
        year,
        top_link,
        anchors,
    };
    (dom, page)
}
