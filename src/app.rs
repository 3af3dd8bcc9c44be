//! Composition root.
//!
//! [`App::init`] binds every component to the page once. Components whose
//! elements are missing stay `None`; the rest of the page keeps working. The
//! host (the wasm binding, or a test) routes events to the public fields.

use crate::animations::ScrollAnimations;
use crate::config::SiteConfig;
use crate::contact::ContactForm;
use crate::dom::Dom;
use crate::estimate::EstimateCalculator;
use crate::faq::Faq;
use crate::navigation::{self, Navigation};
use crate::performance;
use crate::smooth_scroll::SmoothScroll;
use crate::utils::Debounce;
use crate::year;

pub struct App<D: Dom> {
    pub navigation: Option<Navigation<D>>,
    pub estimate: Option<EstimateCalculator<D>>,
    pub contact: Option<ContactForm<D>>,
    pub faq: Option<Faq<D>>,
    pub animations: ScrollAnimations<D>,
    pub smooth_scroll: SmoothScroll<D>,
    /// Year written to the footer, if the page has one.
    pub year: Option<i32>,
    /// Lazy images whose `src` was filled in at startup.
    pub promoted_images: usize,
    scroll_debounce: Debounce,
    config: SiteConfig,
}

impl<D: Dom> App<D> {
    pub fn init(dom: &D, config: SiteConfig) -> Self {
        let navigation = Navigation::init(dom, &config.scroll);
        if navigation.is_none() {
            tracing::debug!("navigation elements not found, menu disabled");
        }
        let estimate = EstimateCalculator::init(dom, &config.pricing, &config.business);
        if estimate.is_none() {
            tracing::debug!("estimate form not found, calculator disabled");
        }
        let contact = ContactForm::init(dom, &config.business, &config.timing);
        if contact.is_none() {
            tracing::debug!("contact form not found, submission disabled");
        }
        let faq = Faq::init(dom);
        if faq.is_none() {
            tracing::debug!("no faq items found");
        }

        let animations = ScrollAnimations::init(dom, &config.animations);
        let year = year::stamp_year(dom);
        let smooth_scroll = SmoothScroll::init(dom, config.scroll.anchor_offset);
        let promoted_images = performance::promote_lazy_images(dom);

        tracing::info!(
            animated = animations.targets().len(),
            anchors = smooth_scroll.anchors().len(),
            promoted_images,
            "app initialized"
        );

        Self {
            navigation,
            estimate,
            contact,
            faq,
            animations,
            smooth_scroll,
            year,
            promoted_images,
            scroll_debounce: Debounce::new(config.timing.scroll_debounce_ms),
            config,
        }
    }

    pub fn scroll_debounce(&self) -> &Debounce {
        &self.scroll_debounce
    }

    /// Window scroll. Header styling runs once the burst has settled.
    pub fn on_scroll(&self, dom: &D) {
        let Some(nav) = &self.navigation else { return };
        let Some(header) = nav.header().cloned() else {
            return;
        };
        let threshold = nav.header_threshold();
        self.scroll_debounce.call(dom, move |dom: &D| {
            navigation::style_header(dom, &header, threshold);
        });
    }

    /// Window `load`. Returns whether a service worker registration was
    /// attempted.
    pub fn on_load(&self, dom: &D) -> bool {
        let registered = performance::register_service_worker(dom, &self.config.service_worker);
        if registered {
            tracing::debug!(path = %self.config.service_worker.path, "service worker registration requested");
        }
        registered
    }
}
