//! Lazy image promotion and service worker registration.

use crate::config::ServiceWorkerConfig;
use crate::dom::Dom;

pub const LAZY_IMAGE_SELECTOR: &str = r#"img[loading="lazy"]"#;

/// Copy `data-src` into `src` for lazy images when the browser handles
/// `loading="lazy"` itself. Returns how many images were updated.
pub fn promote_lazy_images<D: Dom>(dom: &D) -> usize {
    if !dom.supports_lazy_loading() {
        return 0;
    }
    let mut promoted = 0;
    for img in dom.query_selector_all(LAZY_IMAGE_SELECTOR) {
        if let Some(src) = dom.attribute(&img, "data-src") {
            dom.set_attribute(&img, "src", &src);
            promoted += 1;
        }
    }
    promoted
}

/// Register the service worker after the page has loaded. Failure is the
/// host's to swallow.
pub fn register_service_worker<D: Dom>(dom: &D, config: &ServiceWorkerConfig) -> bool {
    if !config.enabled {
        return false;
    }
    dom.register_service_worker(&config.path);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn promotes_data_src() {
        let (dom, page) = landing_page();
        assert_eq!(promote_lazy_images(&dom), 1);
        assert_eq!(
            dom.attribute(&page.lazy_images[0], "src").as_deref(),
            Some("/img/storefront.avif")
        );
        // no data-src: untouched
        assert_eq!(dom.attribute(&page.lazy_images[1], "src"), None);
    }

    #[test]
    fn skipped_without_native_support() {
        let (dom, page) = landing_page();
        dom.set_lazy_loading_supported(false);
        assert_eq!(promote_lazy_images(&dom), 0);
        assert_eq!(dom.attribute(&page.lazy_images[0], "src"), None);
    }

    #[test]
    fn service_worker_respects_enabled_flag() {
        let (dom, _page) = landing_page();
        let mut config = ServiceWorkerConfig::default();
        assert!(register_service_worker(&dom, &config));
        assert_eq!(dom.registered_service_workers(), vec!["/sw.js".to_string()]);

        config.enabled = false;
        assert!(!register_service_worker(&dom, &config));
        assert_eq!(dom.registered_service_workers().len(), 1);
    }
}
