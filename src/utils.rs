use once_cell::sync::Lazy;
use regex::Regex;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::error::{WidgetError, WidgetResult};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

pub const PHONE_MAX_DIGITS: usize = 11;

pub fn window() -> WidgetResult<Window> {
    web_sys::window().ok_or(WidgetError::Unsupported("window"))
}

pub fn document() -> WidgetResult<Document> {
    window()?.document().ok_or(WidgetError::Unsupported("document"))
}

pub fn body() -> WidgetResult<HtmlElement> {
    document()?.body().ok_or(WidgetError::Missing("body"))
}

pub fn select(selector: &str) -> Option<Element> {
    document().ok()?.query_selector(selector).ok().flatten()
}

pub fn select_in(parent: &Element, selector: &str) -> Option<Element> {
    parent.query_selector(selector).ok().flatten()
}

pub fn select_all(selector: &str) -> Vec<Element> {
    match document() {
        Ok(document) => match document.query_selector_all(selector) {
            Ok(list) => collect_elements(&list),
            Err(_) => Vec::new(),
        },
        Err(_) => Vec::new(),
    }
}

pub fn select_all_in(parent: &Element, selector: &str) -> Vec<Element> {
    match parent.query_selector_all(selector) {
        Ok(list) => collect_elements(&list),
        Err(_) => Vec::new(),
    }
}

fn collect_elements(list: &web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Like [`select`] but a missing element disables the caller.
pub fn require(selector: &'static str) -> WidgetResult<Element> {
    select(selector).ok_or(WidgetError::Missing(selector))
}

pub fn add_class(element: &Element, class: &str) {
    let _ = element.class_list().add_1(class);
}

pub fn remove_class(element: &Element, class: &str) {
    let _ = element.class_list().remove_1(class);
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    if on {
        add_class(element, class);
    } else {
        remove_class(element, class);
    }
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

pub fn focus(element: &Element) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.focus();
    }
}

/// Attaches a handler for the lifetime of the page.
pub fn listen<E, F>(target: &EventTarget, event: &str, handler: F) -> WidgetResult<()>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let callback = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

pub fn scroll_y() -> f64 {
    window()
        .ok()
        .and_then(|window| window.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn inner_width() -> f64 {
    window()
        .ok()
        .and_then(|window| window.inner_width().ok())
        .and_then(|width| width.as_f64())
        .unwrap_or(0.0)
}

pub fn scroll_to_smooth(top: f64) {
    if let Ok(window) = window() {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}

/// Document-relative top of an element, minus `offset`.
pub fn scroll_target(element_top: f64, page_offset: f64, offset: f64) -> f64 {
    element_top + page_offset - offset
}

pub fn smooth_scroll_to(target: Option<&Element>, offset: f64) {
    let Some(element) = target else {
        return;
    };
    let top = element.get_bounding_client_rect().top();
    scroll_to_smooth(scroll_target(top, scroll_y(), offset));
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn is_valid_phone(phone: &str) -> bool {
    let count = digits(phone).len();
    (10..=PHONE_MAX_DIGITS).contains(&count)
}

/// Formats a complete 10 or 11 digit number; anything else is returned as-is.
pub fn format_phone(phone: &str) -> String {
    let d = digits(phone);
    match d.len() {
        11 => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
        10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        _ => phone.to_string(),
    }
}

/// Live mask applied while the phone field is being typed into.
pub fn mask_phone(input: &str) -> String {
    let mut d = digits(input);
    d.truncate(PHONE_MAX_DIGITS);
    match d.len() {
        0 => String::new(),
        1..=2 => format!("({}", d),
        3..=6 => format!("({}) {}", &d[..2], &d[2..]),
        _ => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("maria@ex.com"));
        assert!(is_valid_email("a.b+c@sub.domain.com.br"));
        assert!(!is_valid_email("bad"));
        assert!(!is_valid_email("no@tld"));
        assert!(!is_valid_email("two@@ex.com"));
        assert!(!is_valid_email("spa ce@ex.com"));
        assert!(!is_valid_email("@ex.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn phone_digit_counts() {
        assert!(is_valid_phone("12991234567"));
        assert!(is_valid_phone("(12) 9912-3456"));
        assert!(!is_valid_phone("123"));
        assert!(!is_valid_phone("129912345678"));
    }

    #[test]
    fn format_complete_numbers() {
        assert_eq!(format_phone("12991234567"), "(12) 99123-4567");
        assert_eq!(format_phone("1233334444"), "(12) 3333-4444");
        assert_eq!(format_phone("123"), "123");
    }

    #[test]
    fn mask_grows_with_input() {
        assert_eq!(mask_phone(""), "");
        assert_eq!(mask_phone("1"), "(1");
        assert_eq!(mask_phone("12"), "(12");
        assert_eq!(mask_phone("129"), "(12) 9");
        assert_eq!(mask_phone("129912"), "(12) 9912");
        assert_eq!(mask_phone("1299123"), "(12) 99123-");
        assert_eq!(mask_phone("12991234567"), "(12) 99123-4567");
    }

    #[test]
    fn masked_landline_is_regrouped_once_complete() {
        let masked = mask_phone("1233334444");
        assert_eq!(masked, "(12) 33334-444");
        assert_eq!(format_phone(&masked), "(12) 3333-4444");
        assert_eq!(format_phone(&mask_phone("12991234567")), "(12) 99123-4567");
    }

    #[test]
    fn mask_drops_extra_digits_and_noise() {
        assert_eq!(mask_phone("(12) 99123-45678999"), "(12) 99123-4567");
        assert_eq!(mask_phone("ab1c2"), "(12");
    }

    #[test]
    fn scroll_target_subtracts_offset() {
        assert_eq!(scroll_target(400.0, 1200.0, 80.0), 1520.0);
    }

    proptest! {
        #[test]
        fn phone_valid_iff_ten_or_eleven_digits(d in 0usize..20) {
            let number = "9".repeat(d);
            prop_assert_eq!(is_valid_phone(&number), (10..=11).contains(&d));
        }

        #[test]
        fn mask_is_idempotent(raw in "[0-9 ()-]{0,20}") {
            let once = mask_phone(&raw);
            prop_assert_eq!(mask_phone(&once), once.clone());
            prop_assert!(digits(&once).len() <= PHONE_MAX_DIGITS);
        }

        #[test]
        fn email_without_at_is_rejected(s in "[^@]{0,30}") {
            prop_assert!(!is_valid_email(&s));
        }
    }
}
