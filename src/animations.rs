//! Scroll-triggered reveal animations.
//!
//! Cards start hidden and slightly lowered; the first time one enters the
//! viewport it gets `animate-in` and is no longer watched. The host provides
//! the intersection events (an `IntersectionObserver` in the browser).

use crate::config::AnimationsConfig;
use crate::dom::Dom;
use crate::markup;

pub const REVEALED_CLASS: &str = "animate-in";

pub struct ScrollAnimations<D: Dom> {
    targets: Vec<D::Node>,
    threshold: f64,
}

impl<D: Dom> ScrollAnimations<D> {
    /// Hide every configured target and inject the reveal stylesheet.
    ///
    /// The stylesheet is added even when no targets exist: the notification
    /// slide-out keyframes live in it too.
    pub fn init(dom: &D, config: &AnimationsConfig) -> Self {
        let targets = if config.selectors.is_empty() {
            Vec::new()
        } else {
            dom.query_selector_all(&config.selector_list())
        };
        for el in &targets {
            dom.set_style(el, "opacity", "0");
            dom.set_style(el, "transform", "translateY(20px)");
            dom.set_style(el, "transition", "opacity 0.6s ease, transform 0.6s ease");
        }

        if let Some(style) = dom.create_element("style") {
            dom.set_text(&style, markup::ANIMATION_CSS);
            dom.append_to_head(&style);
        }

        Self {
            targets,
            threshold: config.threshold,
        }
    }

    /// Elements to observe.
    pub fn targets(&self) -> &[D::Node] {
        &self.targets
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// An observed element crossed the threshold. Returns `true` once the
    /// element is revealed and should be unobserved.
    pub fn on_intersection(&self, dom: &D, target: &D::Node, is_intersecting: bool) -> bool {
        if !is_intersecting {
            return false;
        }
        dom.add_class(target, REVEALED_CLASS);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryDom;
    use crate::test_helpers::*;

    #[test]
    fn init_hides_targets_and_injects_css() {
        let (dom, page) = landing_page();
        let animations = ScrollAnimations::init(&dom, &AnimationsConfig::default());

        assert_eq!(animations.targets(), page.cards.as_slice());
        for card in &page.cards {
            assert_eq!(dom.style(card, "opacity").as_deref(), Some("0"));
            assert_eq!(
                dom.style(card, "transform").as_deref(),
                Some("translateY(20px)")
            );
        }

        let styles = dom.query_within(&dom.head(), "style");
        assert_eq!(styles.len(), 1);
        assert!(dom.text(&styles[0]).contains(".animate-in"));
    }

    #[test]
    fn reveal_on_first_intersection() {
        let (dom, page) = landing_page();
        let animations = ScrollAnimations::init(&dom, &AnimationsConfig::default());
        let card = &page.cards[0];

        assert!(!animations.on_intersection(&dom, card, false));
        assert!(!dom.has_class(card, REVEALED_CLASS));

        assert!(animations.on_intersection(&dom, card, true));
        assert!(dom.has_class(card, REVEALED_CLASS));
    }

    #[test]
    fn empty_selector_list_targets_nothing() {
        let dom = MemoryDom::new();
        dom.element(&dom.body(), "div.service-card");
        let config = AnimationsConfig {
            selectors: vec![],
            threshold: 0.5,
        };
        let animations = ScrollAnimations::init(&dom, &config);
        assert!(animations.targets().is_empty());
        assert_eq!(animations.threshold(), 0.5);
    }
}
