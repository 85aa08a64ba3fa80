use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, HtmlElement, HtmlInputElement, HtmlTextAreaElement, Window};

pub fn get_window() -> Option<Window> {
    web_sys::window()
}

fn get_document() -> Option<Document> {
    get_window().and_then(|w| w.document())
}

fn get_value_from_input(element: JsValue) -> String {
    if let Some(element) = element.dyn_ref::<HtmlInputElement>() {
        element.value()
    } else if let Some(element) = element.dyn_ref::<HtmlTextAreaElement>() {
        element.value()
    } else {
        "".to_string()
    }
}

pub fn set_title(text: &str) {
    if let Some(d) = get_document() {
        d.set_title(text);
    }
}

pub fn get_value_by_query(selectors: &str) -> String {
    query_selector(selectors)
        .map(|element| get_value_from_input(JsValue::from(element)))
        .unwrap_or_default()
}

/// Value of the named field inside the element carrying `scope` as a class.
pub fn get_form_value(scope: &str, name: &str) -> String {
    get_value_by_query(&format!(".{scope} [name={name}]"))
}

pub fn clear_form_value(scope: &str, name: &str) {
    if let Some(element) = query_selector(&format!(".{scope} [name={name}]")) {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value("");
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value("");
        }
    }
}

pub fn focus_field(scope: &str, name: &str) {
    if let Some(elem) = get_html_element(query_selector(&format!(".{scope} [name={name}]"))) {
        if elem.focus().is_ok() {}
    }
}

pub fn query_selector(selectors: &str) -> Option<Element> {
    get_document().and_then(|d| d.query_selector(selectors).ok()).and_then(|e| e)
}

pub fn get_html_element(el: Option<Element>) -> Option<HtmlElement> {
    el.map(|el| el.dyn_into::<HtmlElement>().ok()).and_then(|el| el)
}

/// `content` of `<meta name="…">` in the host page.
pub fn meta_content(name: &str) -> Option<String> {
    query_selector(&format!("meta[name=\"{name}\"]"))
        .and_then(|element| element.get_attribute("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

pub fn attr_data(key: &str) -> String {
    format!("data-{key}")
}

/// Nearest element at or above the event target that carries `data-{key}`,
/// with the value of `data-{key}` and `data-{id_key}`.
pub fn from_closest_dataset(target: Option<EventTarget>, key: &str, id_key: &str) -> Option<(String, String)> {
    let element = target.and_then(|target| target.dyn_into::<Element>().ok())?;
    let found = element.closest(&format!("[{}]", attr_data(key))).ok().flatten()?;
    let value = found.get_attribute(&attr_data(key))?;
    let id = found.get_attribute(&attr_data(id_key)).unwrap_or_default();
    Some((value, id))
}

/// True when the target is not inside an element matching `selectors`.
pub fn is_outside(target: Option<EventTarget>, selectors: &str) -> bool {
    target
        .and_then(|target| target.dyn_into::<Element>().ok())
        .map(|element| matches!(element.closest(selectors), Ok(None)))
        .unwrap_or_default()
}
