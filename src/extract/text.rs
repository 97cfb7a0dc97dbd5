//! Text normalization and element lookup helpers.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

static IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

/// Collapse every whitespace run into one space and trim the ends.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized text of all descendant text nodes, concatenated as written.
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize(&element.text().collect::<String>())
}

/// First descendant of `scope` matching `selector`.
pub fn first_match<'a>(scope: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    scope.select(selector).next()
}

/// Attribute value, treating blank values as absent.
pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// First image reference at or below `element`: `src`, or `data-src` for
/// images that only carry a lazy-load URL.
pub fn first_image(element: ElementRef<'_>) -> Option<String> {
    std::iter::once(element)
        .filter(|el| el.value().name() == "img")
        .chain(element.select(&IMAGE))
        .find_map(|img| attr(img, "src").or_else(|| attr(img, "data-src")))
        .map(str::to_string)
}
