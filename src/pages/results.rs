use super::{detail_line, doc_button, line, load, new_tag, note, replace, Outcome, RenderContext};
use crate::dates::{format_display_date, DateStyle};
use crate::dom::{el, Document, Node};
use crate::listing::{sort_entries, SortOrder};
use crate::models::YearGroup;
use crate::normalize::{normalize_entries, Entry, Origin};
use crate::storage::{DataSource, RESULTS_DATA};
use tracing::info;

pub const LIST_ID: &str = "resultsList";
pub const TITLE_ID: &str = "pageTitle";
pub const CRUMB_ID: &str = "crumbTitle";

const LOAD_FAILED: &str =
    "データの読み込みに失敗しました。data/results-data.json のパスと内容を確認してください。";
const NO_CATEGORY: &str = "表示できる大会カテゴリがありません。";
const NO_YEARS: &str = "この大会の結果データはまだありません。";
const NO_ENTRIES: &str = "この年度の結果はまだありません。";
const DEFAULT_LABEL: &str = "大会結果";

/// Results of one tournament category, newest season first.
///
/// `key` selects the category; when absent or unknown the configured fallback
/// key is tried, then the first category in the file.
pub async fn render(
    doc: &mut Document,
    source: &DataSource,
    ctx: &RenderContext,
    key: Option<&str>,
) -> Outcome {
    if !doc.contains_id(LIST_ID) {
        return Outcome::Skipped;
    }

    let data = match load(source, RESULTS_DATA, "results").await {
        Ok(data) => data,
        Err(_) => {
            replace(doc, LIST_ID, vec![note(LOAD_FAILED)]);
            return Outcome::Failed;
        }
    };

    let key = key.filter(|k| !k.is_empty()).unwrap_or(ctx.results_key.as_str());
    let mut categories = data.categories.unwrap_or_default();
    let Some(index) = categories
        .iter()
        .position(|c| c.key == key)
        .or_else(|| categories.iter().position(|c| c.key == ctx.results_key))
        .or((!categories.is_empty()).then_some(0))
    else {
        replace(doc, LIST_ID, vec![note(NO_CATEGORY)]);
        return Outcome::Empty;
    };
    let category = categories.swap_remove(index);

    let label = if category.label.is_empty() {
        DEFAULT_LABEL.to_string()
    } else {
        category.label.clone()
    };
    for id in [TITLE_ID, CRUMB_ID] {
        if let Some(element) = doc.element_by_id_mut(id) {
            element.set_text(&label);
        }
    }
    doc.title = format!("{label}｜{}", ctx.site_name);

    let mut years = category.years.unwrap_or_default();
    years.sort_by_key(|year| std::cmp::Reverse(year_number(year)));
    if years.is_empty() {
        replace(doc, LIST_ID, vec![note(NO_YEARS)]);
        return Outcome::Empty;
    }

    let mut nodes = Vec::new();
    let mut rendered = 0;
    for (index, year) in years.into_iter().enumerate() {
        if index > 0 {
            nodes.push(el("div", &[("class", "section-bar"), ("aria-hidden", "true")], vec![]).into());
        }
        let origin = Origin::Category {
            key: category.key.clone(),
            label: category.label.clone(),
            year: year.year,
        };
        let mut entries = normalize_entries(year.entries, &origin);
        sort_entries(&mut entries, SortOrder::Desc);
        if entries.is_empty() {
            nodes.push(note(NO_ENTRIES));
            continue;
        }
        rendered += entries.len();
        nodes.extend(entries.iter().map(|entry| article(entry, ctx)));
    }

    replace(doc, LIST_ID, nodes);
    info!(key = %category.key, rendered, "rendered results");
    Outcome::Rendered(rendered)
}

/// Non-numeric years sort last.
fn year_number(year: &YearGroup) -> i64 {
    year.year.trim().parse().unwrap_or(0)
}

/// Blank for entries with no date text at all.
fn padded_meta(entry: &Entry) -> String {
    if entry.updated.is_empty() {
        String::new()
    } else {
        format!("更新日：{}", format_display_date(&entry.updated, DateStyle::Padded))
    }
}

fn article(entry: &Entry, ctx: &RenderContext) -> Node {
    let title = if entry.title.is_empty() { "(無題)" } else { entry.title.as_str() };
    let mut head = el(
        "div",
        &[("class", "entry-head")],
        vec![el(
            "a",
            &[("class", "entry-title"), ("href", entry.url.as_str()), ("text", title)],
            vec![],
        )
        .into()],
    );
    if ctx.is_new(entry) {
        head.append(new_tag("tag new"));
    }
    let meta = padded_meta(entry);

    let mut body: Vec<Node> = entry.details.iter().map(detail_line).collect();
    if !entry.docs.is_empty() {
        let buttons = entry
            .docs
            .iter()
            .map(|doc| {
                let label = if doc.label.is_empty() { "資料" } else { doc.label.as_str() };
                doc_button(doc, doc.declared_kind(), label)
            })
            .collect();
        body.push(line("資料：", el("div", &[("class", "value actions")], buttons)));
    }

    el(
        "article",
        &[("class", "entry")],
        vec![
            head.into(),
            el("div", &[("class", "entry-meta"), ("text", meta.as_str())], vec![]).into(),
            el("div", &[("class", "entry-body entry-lines")], body).into(),
        ],
    )
    .into()
}
