//! Browser entry point.
//!
//! Builds an [`App`] over [`WebDom`] once the document is ready and routes
//! DOM events to it. Listeners live for the lifetime of the page, so their
//! closures are leaked with `forget`.

mod host;

pub use host::WebDom;

use crate::app::App;
use crate::config::SiteConfig;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent,
};

type Shared = Rc<RefCell<App<WebDom>>>;

#[wasm_bindgen(start)]
pub fn start() {
    wasm_logger::init(wasm_logger::Config::default());

    let Some(dom) = WebDom::new() else {
        tracing::error!("no window or document, scripts disabled");
        return;
    };

    if dom.document().ready_state() == "loading" {
        let ready = dom.clone();
        listen(dom.document(), "DOMContentLoaded", move |_| boot(ready.clone()));
    } else {
        boot(dom);
    }
}

fn boot(dom: WebDom) {
    let app: Shared = Rc::new(RefCell::new(App::init(&dom, SiteConfig::default())));

    bind_navigation(&dom, &app);
    bind_estimate(&dom, &app);
    bind_contact(&dom, &app);
    bind_faq(&dom, &app);
    bind_animations(&dom, &app);
    bind_smooth_scroll(&dom, &app);

    let (on_load_dom, on_load_app) = (dom.clone(), Rc::clone(&app));
    listen(dom.window(), "load", move |_| {
        on_load_app.borrow().on_load(&on_load_dom);
    });
}

fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_err()
    {
        tracing::debug!(event, "failed to add listener");
    }
    closure.forget();
}

fn event_target(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn bind_navigation(dom: &WebDom, app: &Shared) {
    let (toggle, links) = {
        let app = app.borrow();
        let Some(nav) = &app.navigation else { return };
        (nav.toggle_button().clone(), nav.links(dom))
    };

    let (d, a) = (dom.clone(), Rc::clone(app));
    listen(&toggle, "click", move |_| {
        if let Some(nav) = a.borrow_mut().navigation.as_mut() {
            nav.toggle(&d);
        }
    });

    for link in links {
        let (d, a) = (dom.clone(), Rc::clone(app));
        listen(&link, "click", move |_| {
            if let Some(nav) = a.borrow_mut().navigation.as_mut() {
                nav.close(&d);
            }
        });
    }

    let (d, a) = (dom.clone(), Rc::clone(app));
    listen(dom.document(), "click", move |event| {
        let Some(target) = event_target(&event) else {
            return;
        };
        if let Some(nav) = a.borrow_mut().navigation.as_mut() {
            nav.on_document_click(&d, &target);
        }
    });

    let (d, a) = (dom.clone(), Rc::clone(app));
    listen(dom.document(), "keydown", move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if let Some(nav) = a.borrow_mut().navigation.as_mut() {
            nav.on_keydown(&d, &event.key());
        }
    });

    let (d, a) = (dom.clone(), Rc::clone(app));
    listen(dom.window(), "scroll", move |_| a.borrow().on_scroll(&d));
}

fn bind_estimate(dom: &WebDom, app: &Shared) {
    let (form, selects) = {
        let app = app.borrow();
        let Some(estimate) = &app.estimate else { return };
        let [device, issue] = estimate.selects();
        (estimate.form().clone(), [device.clone(), issue.clone()])
    };

    let (d, a) = (dom.clone(), Rc::clone(app));
    listen(&form, "submit", move |event| {
        event.prevent_default();
        if let Some(estimate) = &a.borrow().estimate {
            let _ = estimate.on_submit(&d);
        }
    });

    for select in selects {
        let (d, a) = (dom.clone(), Rc::clone(app));
        listen(&select, "change", move |_| {
            if let Some(estimate) = &a.borrow().estimate {
                let _ = estimate.on_change(&d);
            }
        });
    }
}

fn bind_contact(dom: &WebDom, app: &Shared) {
    let (form, phone) = {
        let app = app.borrow();
        let Some(contact) = &app.contact else { return };
        (contact.form().clone(), contact.phone_input().cloned())
    };

    let (d, a) = (dom.clone(), Rc::clone(app));
    listen(&form, "submit", move |event| {
        event.prevent_default();
        if let Some(contact) = &a.borrow().contact {
            let _ = contact.submit(&d);
        }
    });

    if let Some(phone) = phone {
        let (d, a) = (dom.clone(), Rc::clone(app));
        listen(&phone, "input", move |_| {
            if let Some(contact) = &a.borrow().contact {
                contact.on_phone_input(&d);
            }
        });
    }
}

fn bind_faq(dom: &WebDom, app: &Shared) {
    let summaries: Vec<Element> = {
        let app = app.borrow();
        let Some(faq) = &app.faq else { return };
        faq.summaries().cloned().collect()
    };

    for (index, summary) in summaries.into_iter().enumerate() {
        let (d, a) = (dom.clone(), Rc::clone(app));
        listen(&summary, "click", move |event| {
            event.prevent_default();
            if let Some(faq) = &a.borrow().faq {
                faq.toggle(&d, index);
            }
        });
    }
}

fn bind_animations(dom: &WebDom, app: &Shared) {
    let (targets, threshold) = {
        let app = app.borrow();
        (
            app.animations.targets().to_vec(),
            app.animations.threshold(),
        )
    };
    if targets.is_empty() {
        return;
    }

    let (d, a) = (dom.clone(), Rc::clone(app));
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            let app = a.borrow();
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                if app
                    .animations
                    .on_intersection(&d, &target, entry.is_intersecting())
                {
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_root_margin("0px");
    options.set_threshold(&JsValue::from_f64(threshold));
    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => {
            for target in &targets {
                observer.observe(target);
            }
        }
        Err(err) => tracing::debug!(?err, "intersection observer unavailable"),
    }
    callback.forget();
}

fn bind_smooth_scroll(dom: &WebDom, app: &Shared) {
    let anchors = app.borrow().smooth_scroll.anchors().to_vec();
    for anchor in anchors {
        let (d, a) = (dom.clone(), Rc::clone(app));
        let clicked = anchor.clone();
        listen(&anchor, "click", move |event| {
            if a.borrow().smooth_scroll.on_click(&d, &clicked) {
                event.prevent_default();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    //! Run with `wasm-pack test --headless --chrome -- --features web --lib`.

    use super::*;
    use crate::dom::Dom;
    use wasm_bindgen_test::*;
    use web_sys::{HtmlElement, HtmlFormElement, HtmlSelectElement};

    wasm_bindgen_test_configure!(run_in_browser);

    const PAGE: &str = r##"
        <header class="header">
          <button id="menuToggle">Menu</button>
          <nav id="menu"><a href="#services">Services</a></nav>
        </header>
        <p id="outside">Same-day repairs</p>
        <section id="services">
          <form id="estimateForm">
            <select id="device">
              <option value="">Choose</option>
              <option value="iPhone">iPhone</option>
            </select>
            <select id="issue">
              <option value="">Choose</option>
              <option value="Screen Replacement">Screen Replacement</option>
            </select>
          </form>
          <div id="estimateResult"></div>
        </section>
        <footer><span id="year"></span></footer>
    "##;

    /// Replace the body with the test page and bind a fresh app to it.
    fn booted() -> WebDom {
        let dom = WebDom::new().unwrap();
        dom.document().body().unwrap().set_inner_html(PAGE);
        boot(dom.clone());
        dom
    }

    fn by_id<T: JsCast>(dom: &WebDom, id: &str) -> T {
        dom.document()
            .get_element_by_id(id)
            .unwrap()
            .dyn_into::<T>()
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn menu_opens_on_toggle_and_closes_on_outside_click() {
        let dom = booted();
        let menu: Element = by_id(&dom, "menu");
        let toggle: HtmlElement = by_id(&dom, "menuToggle");

        toggle.click();
        assert!(menu.class_list().contains("open"));
        assert_eq!(toggle.get_attribute("aria-expanded").as_deref(), Some("true"));

        by_id::<HtmlElement>(&dom, "outside").click();
        assert!(!menu.class_list().contains("open"));
        assert_eq!(toggle.get_attribute("aria-expanded").as_deref(), Some("false"));
    }

    #[wasm_bindgen_test]
    fn estimate_renders_on_submit() {
        let dom = booted();
        by_id::<HtmlSelectElement>(&dom, "device").set_value("iPhone");
        by_id::<HtmlSelectElement>(&dom, "issue").set_value("Screen Replacement");

        let form: HtmlFormElement = by_id(&dom, "estimateForm");
        form.dispatch_event(&Event::new("submit").unwrap()).unwrap();

        let result: Element = by_id(&dom, "estimateResult");
        assert!(result.class_list().contains("has-value"));
        assert!(result.inner_html().contains("$119–$249"));
    }

    #[wasm_bindgen_test]
    fn footer_gets_current_year() {
        let dom = booted();
        let year: Element = by_id(&dom, "year");
        assert_eq!(
            year.text_content().as_deref(),
            Some(dom.current_year().to_string().as_str())
        );
    }
}
