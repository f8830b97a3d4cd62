use scraper::{Html, Selector};

pub mod poster;
pub mod title;

// First element matching `sel_str`, then its trimmed non-empty `attr`.
fn select_attr(doc: &Html, sel_str: &str, attr: &str) -> Option<String> {
    let sel = Selector::parse(sel_str).ok()?;
    let node = doc.select(&sel).next()?;
    let value = node.value().attr(attr)?.trim();
    if value.is_empty() { None } else { Some(value.to_string()) }
}

fn meta_content(doc: &Html, sel_str: &str) -> Option<String> {
    select_attr(doc, sel_str, "content")
}

fn first_text(doc: &Html, sel_str: &str) -> Option<String> {
    let sel = Selector::parse(sel_str).ok()?;
    let node = doc.select(&sel).next()?;
    let text = node.text().collect::<String>();
    let text = text.trim();
    if text.is_empty() { None } else { Some(text.to_string()) }
}
