use super::{detail_line, doc_button, line, load, new_tag, note, replace, Outcome, RenderContext};
use crate::dates::{format_date, DateStyle};
use crate::dom::{el, Document, Node};
use crate::normalize::{clean_file_label, group_by_bucket, normalize_year, Entry};
use crate::storage::{DataSource, TAIKAI_DATA};
use tracing::{debug, info};

/// Holds the year sections that have no anchor of their own on the page.
pub const LIST_ID: &str = "taikaiList";

const LOAD_FAILED: &str = "大会情報データの読み込みに失敗しました。";
const EMPTY: &str = "大会情報がありません。";

/// Tournament listing, one section per season in file order.
///
/// `#taikaiList` is required. A season renders into the element whose id
/// equals the season id; seasons without such an element get a generated
/// section inside `#taikaiList`.
pub async fn render(doc: &mut Document, source: &DataSource, ctx: &RenderContext) -> Outcome {
    if !doc.contains_id(LIST_ID) {
        debug!("tournament listing disabled, #{LIST_ID} not on page");
        return Outcome::Skipped;
    }

    let data = match load(source, TAIKAI_DATA, "taikai").await {
        Ok(data) => data,
        Err(_) => {
            replace(doc, LIST_ID, vec![note(LOAD_FAILED)]);
            return Outcome::Failed;
        }
    };

    let seasons: Vec<(String, String, Vec<Entry>)> = data
        .years
        .unwrap_or_default()
        .into_iter()
        .map(|year| (year.id.clone(), year.label.clone(), normalize_year(year)))
        .collect();
    let rendered: usize = seasons.iter().map(|(_, _, entries)| entries.len()).sum();
    if rendered == 0 {
        replace(doc, LIST_ID, vec![note(EMPTY)]);
        return Outcome::Empty;
    }

    let mut generated: Vec<Node> = Vec::new();
    for (id, label, entries) in seasons {
        let mut children: Vec<Node> = vec![el("div", &[("class", "section-bar")], vec![]).into()];
        children.extend(entries.iter().map(|entry| article(entry, ctx)));

        if !id.is_empty() && doc.contains_id(&id) {
            replace(doc, &id, children);
            continue;
        }
        let mut section = el("section", &[("class", "taikai-year")], vec![]);
        if !id.is_empty() {
            section.set_attr("id", &id);
        }
        if !label.is_empty() {
            section.append(el("h2", &[("class", "year-title"), ("text", label.as_str())], vec![]));
        }
        section.children.extend(children);
        generated.push(section.into());
    }

    replace(doc, LIST_ID, generated);
    info!(rendered, "rendered tournaments");
    Outcome::Rendered(rendered)
}

fn article(entry: &Entry, ctx: &RenderContext) -> Node {
    let mut head = el(
        "div",
        &[("class", "entry-head")],
        vec![el("div", &[("class", "entry-title"), ("text", entry.title.as_str())], vec![]).into()],
    );
    if ctx.is_new(entry) {
        head.append(new_tag("tag new"));
    }

    let meta = match entry.date {
        Some(_) => format!("更新日：{}", format_date(entry.date, DateStyle::Padded)),
        None => entry.meta.clone(),
    };

    let mut body: Vec<Node> = entry.details.iter().map(detail_line).collect();
    for (bucket, docs) in group_by_bucket(&entry.docs) {
        let buttons = docs
            .into_iter()
            .map(|doc| doc_button(doc, doc.url_kind(), &clean_file_label(&doc.label)))
            .collect();
        body.push(line(bucket.heading(), el("div", &[("class", "value actions")], buttons)));
    }

    el(
        "article",
        &[("class", "entry"), ("data-updated", entry.updated.as_str())],
        vec![
            head.into(),
            el("div", &[("class", "entry-meta"), ("text", meta.as_str())], vec![]).into(),
            el("div", &[("class", "entry-body entry-lines")], body).into(),
        ],
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;
    use crate::pages::test_support::{children, context, notes, source_with};
    use crate::shell;
    use serde_json::{json, Value};

    fn data() -> Value {
        json!({ "years": [
            { "id": "y2026", "label": "2026年度", "entries": [
                {
                    "title": "市民大会",
                    "updated": "2026-03-10",
                    "rows": [{ "key": "期日", "value": "5月3日" }],
                    "files": [
                        { "label": "結果（PDF）", "url": "/result.pdf" },
                        { "label": "要項（PDF）", "url": "/guide.pdf" },
                        { "label": "X 参加申込（xlsx）", "url": "/entry.xlsx" },
                        { "label": "タイムテーブル", "url": "/tt.pdf" },
                        { "label": "会場案内", "url": "/map.pdf" }
                    ]
                },
                { "title": "秋季大会", "meta": "更新日：未定" }
            ]},
            { "id": "y2025", "label": "2025年度", "entries": [] }
        ]})
    }

    fn headings(article: &Element) -> Vec<String> {
        article
            .find_all_by_class("label")
            .iter()
            .map(|label| label.text_content())
            .collect()
    }

    #[tokio::test]
    async fn seasons_get_generated_sections() {
        let source = source_with(&[(TAIKAI_DATA, data())]);
        let mut doc = shell::taikai_page("協会");
        assert_eq!(render(&mut doc, &source, &context()).await, Outcome::Rendered(2));

        let sections = children(&doc, LIST_ID);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].id(), Some("y2026"));
        assert_eq!(sections[1].id(), Some("y2025"));

        let articles: Vec<&Element> = sections[0].child_elements().filter(|c| c.tag == "article").collect();
        assert_eq!(articles.len(), 2);
        assert_eq!(headings(articles[0]), ["期日", "要項等：", "参加申込：", "組合せ等：", "結果等："]);
        let guideline = articles[0].find_all_by_class("actions")[0].text_content();
        assert_eq!(guideline, "PDF要項PDF会場案内");
        let entry_form = articles[0].find_all_by_class("actions")[1].to_html();
        assert!(entry_form.contains(r#"<span class="icon xls">X</span><span>参加申込</span>"#));

        let metas: Vec<String> = sections[0]
            .find_all_by_class("entry-meta")
            .iter()
            .map(|m| m.text_content())
            .collect();
        assert_eq!(metas, ["更新日：2026年03月10日", "更新日：未定"]);
        assert_eq!(articles[0].find_all_by_class("new").len(), 1);
    }

    #[tokio::test]
    async fn existing_section_is_replaced_in_place() {
        let source = source_with(&[(TAIKAI_DATA, data())]);
        let mut doc = shell::taikai_page("協会");
        doc.body.append(el("section", &[("id", "y2025")], vec![Node::text("stale")]));
        render(&mut doc, &source, &context()).await;

        let own = doc.element_by_id("y2025").unwrap();
        assert_eq!(own.text_content(), "");
        assert_eq!(own.child_elements().count(), 1);
        assert_eq!(children(&doc, LIST_ID).len(), 1);
    }

    #[tokio::test]
    async fn no_seasons_renders_one_message() {
        let source = source_with(&[(TAIKAI_DATA, json!({ "years": [] }))]);
        let mut doc = shell::taikai_page("協会");
        assert_eq!(render(&mut doc, &source, &context()).await, Outcome::Empty);
        assert_eq!(notes(&doc, LIST_ID), [EMPTY]);
    }

    #[tokio::test]
    async fn seasons_without_entries_render_one_message() {
        let source = source_with(&[(
            TAIKAI_DATA,
            json!({ "years": [
                { "id": "y2026", "label": "2026年度", "entries": [] },
                { "id": "y2025", "label": "2025年度" }
            ]}),
        )]);
        let mut doc = shell::taikai_page("協会");
        assert_eq!(render(&mut doc, &source, &context()).await, Outcome::Empty);
        assert_eq!(notes(&doc, LIST_ID), [EMPTY]);
        assert_eq!(children(&doc, LIST_ID).len(), 1);
        assert!(!doc.contains_id("y2026"));
    }

    #[tokio::test]
    async fn page_without_anchor_is_left_alone() {
        let source = source_with(&[]);
        let mut doc = shell::home_page("協会");
        let before = doc.to_html();
        assert_eq!(render(&mut doc, &source, &context()).await, Outcome::Skipped);
        assert_eq!(doc.to_html(), before);
    }

    #[tokio::test]
    async fn fetch_failure_renders_one_error() {
        let source = source_with(&[]);
        let mut doc = shell::taikai_page("協会");
        assert_eq!(render(&mut doc, &source, &context()).await, Outcome::Failed);
        assert_eq!(notes(&doc, LIST_ID), [LOAD_FAILED]);
    }
}
