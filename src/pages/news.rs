use super::{detail_line, load, new_tag, note, replace, Outcome, RenderContext};
use crate::dates::{format_date, DateStyle};
use crate::dom::{el, Document, Node};
use crate::listing::{ListController, ListEvent, SortOrder};
use crate::normalize::{normalize_news, Entry};
use crate::storage::{DataSource, NEWS_DATA};
use tracing::{debug, info};

pub const LIST_ID: &str = "newsList";
pub const PAGE_SIZE: usize = 10;

const SORT_TOP: &str = "sortSelect";
const SORT_BOTTOM: &str = "sortSelectBottom";
const PREV_TOP: &str = "prevPage";
const NEXT_TOP: &str = "nextPage";
const INFO_TOP: &str = "pageInfo";
const PREV_BOTTOM: &str = "prevPageBottom";
const NEXT_BOTTOM: &str = "nextPageBottom";
const INFO_BOTTOM: &str = "pageInfoBottom";

const LOAD_FAILED: &str = "お知らせデータの読み込みに失敗しました。";
const EMPTY: &str = "お知らせがありません。";

/// Sort and page requested by the visitor; both are optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewsRequest {
    pub order: Option<SortOrder>,
    pub page: Option<usize>,
}

/// Full news listing with a sort selector and pagers above and below.
pub async fn render(
    doc: &mut Document,
    source: &DataSource,
    ctx: &RenderContext,
    request: NewsRequest,
) -> Outcome {
    let required = [LIST_ID, SORT_TOP, PREV_TOP, NEXT_TOP, INFO_TOP];
    if let Some(missing) = required.iter().find(|id| !doc.contains_id(id)) {
        debug!("news listing disabled, #{missing} not on page");
        return Outcome::Skipped;
    }

    let initial: SortOrder = doc
        .element_by_id(SORT_TOP)
        .and_then(|select| select.select_value())
        .and_then(|value| value.parse().ok())
        .unwrap_or_default();

    let data = match load(source, NEWS_DATA, "news").await {
        Ok(data) => data,
        Err(_) => {
            replace(doc, LIST_ID, vec![note(LOAD_FAILED)]);
            return Outcome::Failed;
        }
    };

    let mut list = ListController::new(normalize_news(data), PAGE_SIZE, initial);
    if let Some(order) = request.order.filter(|order| *order != initial) {
        list.dispatch(ListEvent::SetOrder(order));
    }
    if let Some(page) = request.page {
        if list.dispatch(ListEvent::GoTo(page)) {
            debug!(page = list.state().page, "news page moved");
        }
    }

    sync_controls(doc, &list);

    if list.is_empty() {
        replace(doc, LIST_ID, vec![note(EMPTY)]);
        return Outcome::Empty;
    }

    let shown = list.window().len();
    replace(doc, LIST_ID, list.window().iter().map(|e| article(e, ctx)).collect());
    info!(
        page = list.state().page,
        order = list.state().order.as_str(),
        shown,
        total = list.len(),
        "rendered news listing"
    );
    Outcome::Rendered(shown)
}

fn article(entry: &Entry, ctx: &RenderContext) -> Node {
    let mut head = el(
        "div",
        &[("class", "entry-head")],
        vec![el(
            "a",
            &[
                ("class", "entry-title"),
                ("href", entry.url.as_str()),
                ("text", entry.title.as_str()),
            ],
            vec![],
        )
        .into()],
    );
    if ctx.is_new(entry) {
        head.append(new_tag("tag new"));
    }
    let meta = format!("更新日：{}", format_date(entry.date, DateStyle::Padded));

    el(
        "article",
        &[("class", "entry"), ("data-updated", entry.updated.as_str())],
        vec![
            head.into(),
            el("div", &[("class", "entry-meta"), ("text", meta.as_str())], vec![]).into(),
            el(
                "div",
                &[("class", "entry-body entry-lines")],
                entry.details.iter().map(detail_line).collect(),
            )
            .into(),
        ],
    )
    .into()
}

fn sync_controls(doc: &mut Document, list: &ListController) {
    let state = list.state();
    let info = format!("{} / {}", state.page, list.total_pages());
    let prev = list.has_prev().then(|| pager_href(state.order, state.page - 1));
    let next = list.has_next().then(|| pager_href(state.order, state.page + 1));

    for id in [SORT_TOP, SORT_BOTTOM] {
        if let Some(select) = doc.element_by_id_mut(id) {
            select.set_select_value(state.order.as_str());
        }
    }

    // The bottom pager is only driven when all three of its parts exist.
    let bottom = [PREV_BOTTOM, NEXT_BOTTOM, INFO_BOTTOM]
        .iter()
        .all(|id| doc.contains_id(id));
    let mut pagers = vec![(PREV_TOP, INFO_TOP, NEXT_TOP)];
    if bottom {
        pagers.push((PREV_BOTTOM, INFO_BOTTOM, NEXT_BOTTOM));
    }

    for (prev_id, info_id, next_id) in pagers {
        if let Some(element) = doc.element_by_id_mut(info_id) {
            element.set_text(&info);
        }
        set_pager_link(doc, prev_id, prev.as_deref());
        set_pager_link(doc, next_id, next.as_deref());
    }
}

/// Page moves keep the order and jump back to the top of the listing.
fn pager_href(order: SortOrder, page: usize) -> String {
    format!("?order={}&page={page}#{LIST_ID}", order.as_str())
}

fn set_pager_link(doc: &mut Document, id: &str, href: Option<&str>) {
    let Some(link) = doc.element_by_id_mut(id) else {
        return;
    };
    match href {
        Some(href) => {
            link.set_attr("href", href);
            link.remove_attr("aria-disabled");
        }
        None => {
            link.remove_attr("href");
            link.set_attr("aria-disabled", "true");
        }
    }
}
