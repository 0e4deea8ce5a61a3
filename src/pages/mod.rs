//! Page controllers. Each one locates its anchors in a host document, loads one
//! data file and replaces the anchor's children with freshly built nodes.

pub mod home_news;
pub mod home_taikai;
pub mod news;
pub mod results;
pub mod taikai;

use crate::dates::Recency;
use crate::dom::{el, Document, Element, Node};
use crate::errors::FetchError;
use crate::models::SiteDocument;
use crate::normalize::{DetailRow, DetailValue, DocKind, DocLink, Entry};
use crate::storage::DataSource;
use chrono::NaiveDate;
use tracing::{debug, error};

#[derive(Debug, Clone)]
pub struct RenderContext {
    pub today: NaiveDate,
    pub recency: Recency,
    pub site_name: String,
    pub results_key: String,
}

impl RenderContext {
    pub fn is_new(&self, entry: &Entry) -> bool {
        self.recency.is_date_new_at(self.today, entry.date)
    }
}

/// What a controller did to its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A required anchor is missing, the page does not have this feature.
    Skipped,
    Failed,
    Empty,
    Rendered(usize),
}

pub(crate) fn note(text: &str) -> Node {
    el("div", &[("class", "note"), ("text", text)], vec![]).into()
}

/// Replaces the children of the element with `id`, if the page has one.
pub(crate) fn replace(doc: &mut Document, id: &str, children: Vec<Node>) {
    match doc.element_by_id_mut(id) {
        Some(element) => element.replace_children(children),
        None => debug!("no #{id} on page {:?}", doc.title),
    }
}

pub(crate) async fn load(
    source: &DataSource,
    name: &str,
    page: &str,
) -> Result<SiteDocument, FetchError> {
    source.fetch(name).await.inspect_err(|err| {
        error!(page, location = %source.locate(name), "failed to load data: {err}");
    })
}

pub(crate) fn new_tag(class: &str) -> Node {
    el("span", &[("class", class), ("text", "NEW")], vec![]).into()
}

/// `a.doc` button with a file-type icon, opening in a new tab.
pub(crate) fn doc_button(doc: &DocLink, kind: DocKind, label: &str) -> Node {
    let icon_class = format!("icon {}", kind.css_class());
    el(
        "a",
        &[
            ("class", "doc"),
            ("href", doc.href()),
            ("target", "_blank"),
            ("rel", "noopener"),
        ],
        vec![
            el(
                "span",
                &[("class", icon_class.as_str()), ("text", kind.icon())],
                vec![],
            )
            .into(),
            el("span", &[("text", label)], vec![]).into(),
        ],
    )
    .into()
}

pub(crate) fn line(label: &str, value: Element) -> Node {
    el(
        "div",
        &[("class", "line")],
        vec![el("div", &[("class", "label"), ("text", label)], vec![]).into(), value.into()],
    )
    .into()
}

/// One labelled detail row; link rows render as plain `a.doc` links.
pub(crate) fn detail_line(row: &DetailRow) -> Node {
    let value = match &row.value {
        DetailValue::Text(text) => el("div", &[("class", "value"), ("text", text.as_str())], vec![]),
        DetailValue::Links(links) => el(
            "div",
            &[("class", "value actions")],
            links.iter().map(action_link).collect(),
        ),
    };
    line(&row.label, value)
}

fn action_link(link: &DocLink) -> Node {
    let label = if link.label.is_empty() { "リンク" } else { link.label.as_str() };
    let mut anchor = el("a", &[("class", "doc"), ("href", link.url.as_str()), ("text", label)], vec![]);
    if let Some(target) = &link.target {
        anchor.set_attr("target", target);
        anchor.set_attr("rel", "noopener");
    }
    anchor.into()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::RenderContext;
    use crate::dates::Recency;
    use crate::dom::{Document, Element};
    use crate::storage::DataSource;
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub fn context() -> RenderContext {
        RenderContext {
            today: NaiveDate::from_ymd_opt(2026, 3, 20).unwrap(),
            recency: Recency::new(14),
            site_name: "テスト協会".to_string(),
            results_key: "open_team".to_string(),
        }
    }

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    /// Directory source holding `files`, unique per call.
    pub fn source_with(files: &[(&str, serde_json::Value)]) -> DataSource {
        let seq = COUNTER.fetch_add(1, Ordering::SeqCst);
        let mut dir: PathBuf = std::env::temp_dir();
        dir.push(format!("site_render_pages_{}_{}", std::process::id(), seq));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        for (name, value) in files {
            std::fs::write(dir.join(name), serde_json::to_vec(value).unwrap()).unwrap();
        }
        DataSource::Dir(dir)
    }

    pub fn notes(doc: &Document, id: &str) -> Vec<String> {
        doc.element_by_id(id)
            .unwrap()
            .find_all_by_class("note")
            .iter()
            .map(|n| n.text_content())
            .collect()
    }

    pub fn children<'a>(doc: &'a Document, id: &str) -> Vec<&'a Element> {
        doc.element_by_id(id).unwrap().child_elements().collect()
    }
}
