use super::{load, note, replace, Outcome, RenderContext};
use crate::dates::{format_date, DateStyle};
use crate::dom::{el, Document, Node};
use crate::listing::take_newest;
use crate::normalize::{normalize_news, Entry};
use crate::storage::{DataSource, NEWS_DATA};
use tracing::info;

pub const LIST_ID: &str = "homeNewsList";
pub const UPDATED_ID: &str = "homeNewsUpdated";
pub const MAX_ITEMS: usize = 5;

const LOAD_FAILED: &str = "お知らせデータの読み込みに失敗しました。";
const EMPTY: &str = "お知らせがありません。";

/// Newest news items as a compact dated list on the home page.
pub async fn render(doc: &mut Document, source: &DataSource, ctx: &RenderContext) -> Outcome {
    if !doc.contains_id(LIST_ID) {
        return Outcome::Skipped;
    }

    let data = match load(source, NEWS_DATA, "home-news").await {
        Ok(data) => data,
        Err(_) => {
            replace(doc, LIST_ID, vec![note(LOAD_FAILED)]);
            return Outcome::Failed;
        }
    };

    let top = take_newest(normalize_news(data), MAX_ITEMS);

    if let Some(updated) = doc.element_by_id_mut(UPDATED_ID) {
        let latest = top
            .first()
            .map(|entry| entry.updated.as_str())
            .filter(|value| !value.is_empty())
            .unwrap_or("-");
        updated.set_text(&format!("更新：{latest}"));
    }

    if top.is_empty() {
        replace(doc, LIST_ID, vec![note(EMPTY)]);
        return Outcome::Empty;
    }

    let rows = top.iter().map(|entry| row(entry, ctx)).collect();
    replace(
        doc,
        LIST_ID,
        vec![el("ul", &[("class", "news-simple-list")], rows).into()],
    );
    info!(count = top.len(), "rendered home news");
    Outcome::Rendered(top.len())
}

fn row(entry: &Entry, ctx: &RenderContext) -> Node {
    let title = if entry.title.is_empty() { "(無題)" } else { entry.title.as_str() };
    let date = format_date(entry.date, DateStyle::Unpadded);

    let mut title_wrap = el(
        "div",
        &[("class", "news-simple-titlewrap")],
        vec![el(
            "a",
            &[("class", "news-simple-title"), ("href", entry.url.as_str()), ("text", title)],
            vec![],
        )
        .into()],
    );
    if ctx.is_new(entry) {
        title_wrap.append(el("span", &[("class", "news-simple-badge"), ("text", "NEW")], vec![]));
    }

    el(
        "li",
        &[("class", "news-simple-row")],
        vec![
            el(
                "time",
                &[
                    ("class", "news-simple-date"),
                    ("datetime", entry.updated.as_str()),
                    ("text", date.as_str()),
                ],
                vec![],
            )
            .into(),
            title_wrap.into(),
        ],
    )
    .into()
}
