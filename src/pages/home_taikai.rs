use super::{load, note, replace, Outcome, RenderContext};
use crate::dom::{el, Document, Element, Node};
use crate::listing::take_newest;
use crate::normalize::{flatten, short_label, DetailSource, Entry};
use crate::storage::{DataSource, TAIKAI_DATA};
use tracing::info;

pub const LIST_ID: &str = "homeTaikaiList";
pub const MAX_ITEMS: usize = 3;

const LOAD_FAILED: &str = "大会情報データの読み込みに失敗しました。";
const EMPTY: &str = "大会情報がありません。";

/// The most recently updated tournaments, from either file layout.
pub async fn render(doc: &mut Document, source: &DataSource, ctx: &RenderContext) -> Outcome {
    if !doc.contains_id(LIST_ID) {
        return Outcome::Skipped;
    }

    let data = match load(source, TAIKAI_DATA, "home-taikai").await {
        Ok(data) => data,
        Err(_) => {
            replace(doc, LIST_ID, vec![note(LOAD_FAILED)]);
            return Outcome::Failed;
        }
    };

    let top = take_newest(flatten(data), MAX_ITEMS);
    if top.is_empty() {
        replace(doc, LIST_ID, vec![note(EMPTY)]);
        return Outcome::Empty;
    }

    replace(doc, LIST_ID, top.iter().map(|entry| item(entry, ctx)).collect());
    info!(count = top.len(), "rendered home tournaments");
    Outcome::Rendered(top.len())
}

fn item(entry: &Entry, ctx: &RenderContext) -> Node {
    let updated = if entry.updated.is_empty() { "-" } else { entry.updated.as_str() };
    let title = match (entry.title.as_str(), entry.origin.category_label()) {
        ("", Some(label)) => label,
        ("", None) => "(無題)",
        (title, _) => title,
    };

    let date = format!("更新日：{updated}");
    let mut meta = el(
        "div",
        &[("class", "meta")],
        vec![el("span", &[("class", "date"), ("text", date.as_str())], vec![]).into()],
    );
    if ctx.is_new(entry) {
        meta.append(el("span", &[("class", "badge"), ("text", "NEW")], vec![]));
    }

    let link = el(
        "a",
        &[("class", "title"), ("href", entry.url.as_str()), ("text", title)],
        vec![],
    );

    el(
        "li",
        &[("class", "item")],
        vec![meta.into(), link.into(), description(entry).into()],
    )
    .into()
}

/// `期日：… / 会場：…` followed by the document links.
fn description(entry: &Entry) -> Element {
    let mut desc = el("p", &[("class", "desc")], vec![]);

    // Legacy `lines` labels are free-form, so they match on a single character.
    let (date_key, venue_key) = match entry.detail_source {
        DetailSource::Rows => ("期日", "会場"),
        DetailSource::Lines => ("期", "会"),
        DetailSource::Absent => ("", ""),
    };
    let mut parts = Vec::new();
    if !date_key.is_empty() {
        if let Some(row) = entry.detail_containing(&[date_key]).filter(|r| !r.text().is_empty()) {
            parts.push(format!("期日：{}", row.text()));
        }
        if let Some(row) = entry.detail_containing(&[venue_key]).filter(|r| !r.text().is_empty()) {
            parts.push(format!("会場：{}", row.text()));
        }
    }
    if !parts.is_empty() {
        desc.append(Node::text(parts.join(" / ")));
    }

    let docs: Vec<_> = entry.docs.iter().filter(|doc| !doc.url.is_empty()).collect();
    if docs.is_empty() {
        return desc;
    }
    if !parts.is_empty() {
        desc.append(el("br", &[], vec![]));
    }

    let mut row = el(
        "div",
        &[("class", "home-docs-row")],
        vec![el("span", &[("class", "home-docs-label"), ("text", "資料：")], vec![]).into()],
    );
    for doc in docs {
        let label = format!("{}：", short_label(&doc.label));
        row.append(el(
            "span",
            &[("class", "home-doc-item")],
            vec![
                el("span", &[("class", "home-doc-label"), ("text", label.as_str())], vec![]).into(),
                el(
                    "a",
                    &[
                        ("class", "home-doc-pdf"),
                        ("href", doc.url.as_str()),
                        ("target", "_blank"),
                        ("rel", "noopener"),
                        ("text", "PDF"),
                    ],
                    vec![],
                )
                .into(),
            ],
        ));
    }
    desc.append(row);
    desc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::test_support::{children, context, notes, source_with};
    use crate::shell;
    use serde_json::json;

    #[tokio::test]
    async fn picks_three_newest_across_layouts() {
        let source = source_with(&[(
            TAIKAI_DATA,
            json!({
                "years": [{ "id": "y2026", "label": "2026年度", "entries": [
                    {
                        "title": "春季大会",
                        "updated": "2026-03-18",
                        "rows": [{ "key": "期日", "value": "4月5日" }, { "key": "会場", "value": "総合体育館" }],
                        "files": [
                            { "label": "要項（PDF）", "url": "/spring.pdf" },
                            { "label": "申込", "url": "" }
                        ]
                    },
                    { "title": "古い大会", "updated": "2025-01-01" }
                ]}],
                "categories": [{ "key": "open_team", "label": "オープン団体", "years": [{ "year": 2026, "entries": [
                    { "meta": "更新日：2026年3月1日", "lines": [{ "label": "会場", "value": "市民館" }] },
                    { "title": "日付なし" }
                ]}]}]
            }),
        )]);
        let mut doc = shell::home_page("協会");
        assert_eq!(render(&mut doc, &source, &context()).await, Outcome::Rendered(3));

        let items = children(&doc, LIST_ID);
        let texts: Vec<String> = items.iter().map(|li| li.text_content()).collect();
        assert_eq!(
            texts,
            [
                "更新日：2026-03-18NEW春季大会期日：4月5日 / 会場：総合体育館資料：要項：PDF",
                "更新日：2026-03-01オープン団体会場：市民館",
                "更新日：2025-01-01古い大会",
            ]
        );
        assert_eq!(items[0].find_all_by_class("home-doc-item").len(), 1);
        assert_eq!(items[2].find_all_by_class("badge").len(), 0);
    }

    #[tokio::test]
    async fn summary_keywords_depend_on_the_detail_field() {
        let source = source_with(&[(
            TAIKAI_DATA,
            json!({ "years": [{ "id": "y2026", "entries": [
                {
                    "title": "行",
                    "updated": "2026-03-02",
                    "rows": [{ "key": "会長", "value": "山田" }, { "key": "開催期日", "value": "6月1日" }]
                },
                {
                    "title": "旧",
                    "updated": "2026-03-01",
                    "lines": [{ "label": "開催期間", "value": "6月2日" }, { "label": "会長", "value": "佐藤" }]
                }
            ]}]}),
        )]);
        let mut doc = shell::home_page("協会");
        render(&mut doc, &source, &context()).await;

        let descs: Vec<String> = children(&doc, LIST_ID)
            .iter()
            .map(|li| li.find_all_by_class("desc")[0].text_content())
            .collect();
        assert_eq!(descs, ["期日：6月1日", "期日：6月2日 / 会場：佐藤"]);
    }

    #[tokio::test]
    async fn no_entries_renders_one_message() {
        let source = source_with(&[(TAIKAI_DATA, json!({ "years": [{ "id": "y" }] }))]);
        let mut doc = shell::home_page("協会");
        assert_eq!(render(&mut doc, &source, &context()).await, Outcome::Empty);
        assert_eq!(notes(&doc, LIST_ID), [EMPTY]);
    }

    #[tokio::test]
    async fn invalid_json_renders_one_error() {
        let source = source_with(&[]);
        if let crate::storage::DataSource::Dir(dir) = &source {
            std::fs::write(dir.join(TAIKAI_DATA), "{").unwrap();
        }
        let mut doc = shell::home_page("協会");
        assert_eq!(render(&mut doc, &source, &context()).await, Outcome::Failed);
        assert_eq!(notes(&doc, LIST_ID), [LOAD_FAILED]);
        assert_eq!(children(&doc, LIST_ID).len(), 1);
    }
}
