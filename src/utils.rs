//! Small helpers shared by the components: phone number handling, URI
//! component encoding, debouncing, and offset-aware smooth scrolling.

use crate::dom::Dom;
use std::cell::Cell;
use std::rc::Rc;

/// Strip everything but ASCII digits: `"(918) 376-0093"` → `"9183760093"`.
pub fn phone_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Format a phone number for display.
///
/// Exactly ten digits (after stripping) become `(918) 376-0093`; anything
/// else is returned unchanged.
pub fn format_phone(phone: &str) -> String {
    let digits = phone_digits(phone);
    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        phone.to_string()
    }
}

/// Mask a phone field while the user types.
///
/// - 6+ digits: `(918) 376-0093`, extra digits past ten are dropped
/// - 3–5 digits: `(918) 37`
/// - fewer: the bare digits
pub fn format_phone_input(value: &str) -> String {
    let digits = phone_digits(value);
    let len = digits.len();
    if len >= 6 {
        format!(
            "({}) {}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..len.min(10)]
        )
    } else if len >= 3 {
        format!("({}) {}", &digits[..3], &digits[3..])
    } else {
        digits
    }
}

/// Percent-encode `input` the way `encodeURIComponent` does.
///
/// Letters, digits, and `-_.!~*'()` pass through; every other byte of the
/// UTF-8 encoding becomes `%XX`.
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Trailing-edge debounce over [`Dom::set_timeout`].
///
/// Every [`Debounce::call`] schedules its callback `wait_ms` later and
/// invalidates any callback still pending, so a burst of calls runs only the
/// last one. Clones share the same pending state.
#[derive(Debug, Clone)]
pub struct Debounce {
    wait_ms: u32,
    generation: Rc<Cell<u64>>,
}

impl Debounce {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms,
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn wait_ms(&self) -> u32 {
        self.wait_ms
    }

    pub fn call<D: Dom>(&self, dom: &D, callback: impl FnOnce(&D) + 'static) {
        let ticket = self.generation.get().wrapping_add(1);
        self.generation.set(ticket);
        let generation = Rc::clone(&self.generation);
        dom.set_timeout(
            self.wait_ms,
            Box::new(move |dom: &D| {
                if generation.get() == ticket {
                    callback(dom);
                }
            }),
        );
    }
}

/// Smoothly scroll so the element matching `selector` sits `offset` pixels
/// below the top of the viewport. Returns `false` if nothing matches.
pub fn smooth_scroll<D: Dom>(dom: &D, selector: &str, offset: f64) -> bool {
    let Some(target) = dom.query_selector(selector) else {
        return false;
    };
    dom.smooth_scroll_to(dom.page_offset_top(&target) - offset);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryDom;

    #[test]
    fn phone_digits_strips_formatting() {
        assert_eq!(phone_digits("(918) 376-0093"), "9183760093");
        assert_eq!(phone_digits("+1 918.376.0093"), "19183760093");
        assert_eq!(phone_digits("call me"), "");
    }

    #[test]
    fn format_phone_ten_digits() {
        assert_eq!(format_phone("9183760093"), "(918) 376-0093");
        assert_eq!(format_phone("918-376-0093"), "(918) 376-0093");
    }

    #[test]
    fn format_phone_leaves_other_lengths() {
        assert_eq!(format_phone("918-376"), "918-376");
        assert_eq!(format_phone("+19183760093"), "+19183760093");
    }

    #[test]
    fn format_phone_input_progressive() {
        assert_eq!(format_phone_input(""), "");
        assert_eq!(format_phone_input("91"), "91");
        assert_eq!(format_phone_input("918"), "(918) ");
        assert_eq!(format_phone_input("91837"), "(918) 37");
        assert_eq!(format_phone_input("918376"), "(918) 376-");
        assert_eq!(format_phone_input("9183760"), "(918) 376-0");
        assert_eq!(format_phone_input("9183760093"), "(918) 376-0093");
    }

    #[test]
    fn format_phone_input_is_stable_on_reformat() {
        let once = format_phone_input("9183760093");
        assert_eq!(format_phone_input(&once), once);
    }

    #[test]
    fn format_phone_input_truncates_extra_digits() {
        assert_eq!(format_phone_input("918376009312"), "(918) 376-0093");
    }

    #[test]
    fn encode_uri_component_matches_js() {
        assert_eq!(encode_uri_component("abc-_.!~*'()"), "abc-_.!~*'()");
        assert_eq!(encode_uri_component("a b"), "a%20b");
        assert_eq!(encode_uri_component("line\nbreak"), "line%0Abreak");
        assert_eq!(encode_uri_component("x&y=z?"), "x%26y%3Dz%3F");
        assert_eq!(encode_uri_component("Camera / Mic"), "Camera%20%2F%20Mic");
        assert_eq!(encode_uri_component("é"), "%C3%A9");
    }

    #[test]
    fn debounce_runs_only_last_call_of_burst() {
        let dom = MemoryDom::new();
        let target = dom.element(&dom.body(), "div");
        let debounce = Debounce::new(16);

        for label in ["a", "b", "c"] {
            debounce.call(&dom, move |dom: &MemoryDom| dom.set_text(&target, label));
            dom.advance(5);
        }
        assert_eq!(dom.text(&target), "");

        dom.advance(16);
        assert_eq!(dom.text(&target), "c");
        assert_eq!(dom.pending_timers(), 0);
    }

    #[test]
    fn debounce_fires_again_after_quiet_period() {
        let dom = MemoryDom::new();
        let target = dom.element(&dom.body(), "div");
        let debounce = Debounce::new(16);

        debounce.call(&dom, move |dom: &MemoryDom| dom.add_class(&target, "first"));
        dom.advance(20);
        debounce
            .clone()
            .call(&dom, move |dom: &MemoryDom| dom.add_class(&target, "second"));
        dom.advance(20);

        assert!(dom.has_class(&target, "first"));
        assert!(dom.has_class(&target, "second"));
    }

    #[test]
    fn smooth_scroll_applies_offset() {
        let dom = MemoryDom::new();
        let section = dom.element(&dom.body(), "section#pricing");
        dom.set_offset_top(&section, 1200.0);

        assert!(smooth_scroll(&dom, "#pricing", 80.0));
        assert_eq!(dom.scroll_positions(), vec![1120.0]);
        assert!(!smooth_scroll(&dom, "#missing", 80.0));
    }
}
