//! FAQ accordion over `<details class="faq-item">` elements.
//!
//! Items toggle independently; opening one leaves the others as they are.

use crate::dom::Dom;

pub const ITEM_SELECTOR: &str = ".faq-item";

pub struct Faq<D: Dom> {
    /// `(details, summary)` pairs.
    items: Vec<(D::Node, D::Node)>,
}

impl<D: Dom> Faq<D> {
    /// Collect every FAQ item with a `<summary>`. Items without one are
    /// skipped. `None` if there is nothing to bind.
    pub fn init(dom: &D) -> Option<Self> {
        let items: Vec<_> = dom
            .query_selector_all(ITEM_SELECTOR)
            .into_iter()
            .filter_map(|item| {
                let summary = dom.query_within(&item, "summary").into_iter().next()?;
                Some((item, summary))
            })
            .collect();
        (!items.is_empty()).then_some(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn summaries(&self) -> impl Iterator<Item = &D::Node> {
        self.items.iter().map(|(_, summary)| summary)
    }

    /// The summary of item `index` was clicked (the binding prevents the
    /// native toggle). Returns the new open state.
    pub fn toggle(&self, dom: &D, index: usize) -> Option<bool> {
        let (item, _) = self.items.get(index)?;
        let open = !dom.is_open(item);
        dom.set_open(item, open);
        Some(open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryDom;
    use crate::test_helpers::*;

    #[test]
    fn toggles_items_independently() {
        let (dom, page) = landing_page();
        let faq = Faq::init(&dom).unwrap();
        assert_eq!(faq.len(), 2);

        assert_eq!(faq.toggle(&dom, 0), Some(true));
        assert_eq!(faq.toggle(&dom, 1), Some(true));
        assert!(dom.is_open(&page.faq_items[0]));
        assert!(dom.is_open(&page.faq_items[1]));

        assert_eq!(faq.toggle(&dom, 0), Some(false));
        assert!(!dom.is_open(&page.faq_items[0]));
        assert!(dom.is_open(&page.faq_items[1]));
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let (dom, _page) = landing_page();
        let faq = Faq::init(&dom).unwrap();
        assert_eq!(faq.toggle(&dom, 9), None);
    }

    #[test]
    fn items_without_summary_are_skipped() {
        let dom = MemoryDom::new();
        dom.element(&dom.body(), "details.faq-item");
        let with_summary = dom.element(&dom.body(), "details.faq-item");
        let summary = dom.element(&with_summary, "summary");

        let faq = Faq::init(&dom).unwrap();
        assert_eq!(faq.len(), 1);
        assert_eq!(faq.summaries().collect::<Vec<_>>(), vec![&summary]);
    }

    #[test]
    fn no_items_is_none() {
        let dom = MemoryDom::new();
        assert!(Faq::init(&dom).is_none());
    }
}
