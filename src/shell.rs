//! Host documents for each page type. Controllers fill the id anchors in place.

use crate::dom::{el, Document, Element, Node};

fn layout(site_name: &str, title: &str, main: Vec<Node>) -> Document {
    let header = el(
        "header",
        &[("class", "site-header")],
        vec![
            el("a", &[("class", "site-name"), ("href", "/"), ("text", site_name)], vec![]).into(),
            el(
                "nav",
                &[("class", "site-nav")],
                vec![
                    nav_link("/", "ホーム"),
                    nav_link("/news", "お知らせ"),
                    nav_link("/taikai", "大会情報"),
                    nav_link("/results", "大会結果"),
                ],
            )
            .into(),
        ],
    );
    let body = el(
        "body",
        &[],
        vec![
            header.into(),
            el("main", &[("class", "content"), ("id", "content")], main).into(),
        ],
    );
    let mut doc = Document::new(format!("{title}｜{site_name}"), body);
    doc.stylesheets.push("/assets/style.css".to_string());
    doc
}

fn nav_link(href: &str, text: &str) -> Node {
    el("a", &[("href", href), ("text", text)], vec![]).into()
}

fn heading(tag: &str, text: &str) -> Node {
    el(tag, &[("text", text)], vec![]).into()
}

pub fn home_page(site_name: &str) -> Document {
    layout(
        site_name,
        "ホーム",
        vec![
            el(
                "section",
                &[("class", "home-news")],
                vec![
                    heading("h2", "お知らせ"),
                    el("p", &[("class", "updated"), ("id", "homeNewsUpdated")], vec![]).into(),
                    el("div", &[("id", "homeNewsList")], vec![]).into(),
                    el("a", &[("class", "more"), ("href", "/news"), ("text", "お知らせ一覧へ")], vec![])
                        .into(),
                ],
            )
            .into(),
            el(
                "section",
                &[("class", "home-taikai")],
                vec![
                    heading("h2", "大会情報"),
                    el("ul", &[("class", "items"), ("id", "homeTaikaiList")], vec![]).into(),
                    el("a", &[("class", "more"), ("href", "/taikai"), ("text", "大会情報一覧へ")], vec![])
                        .into(),
                ],
            )
            .into(),
        ],
    )
}

fn sort_form(select_id: &str) -> Node {
    el(
        "form",
        &[("class", "sort"), ("method", "get"), ("action", "/news")],
        vec![
            el("label", &[("for", select_id), ("text", "並び順")], vec![]).into(),
            el(
                "select",
                &[("id", select_id), ("name", "order"), ("onchange", "this.form.submit()")],
                vec![
                    el("option", &[("value", "desc"), ("text", "新しい順")], vec![]).into(),
                    el("option", &[("value", "asc"), ("text", "古い順")], vec![]).into(),
                ],
            )
            .into(),
            el(
                "noscript",
                &[],
                vec![el("button", &[("type", "submit"), ("text", "並べ替え")], vec![]).into()],
            )
            .into(),
        ],
    )
    .into()
}

fn pager(prev_id: &str, info_id: &str, next_id: &str) -> Node {
    el(
        "nav",
        &[("class", "pager")],
        vec![
            el("a", &[("class", "pager-prev"), ("id", prev_id), ("text", "前へ")], vec![]).into(),
            el("span", &[("class", "pager-info"), ("id", info_id)], vec![]).into(),
            el("a", &[("class", "pager-next"), ("id", next_id), ("text", "次へ")], vec![]).into(),
        ],
    )
    .into()
}

fn controls(class: &str, children: Vec<Node>) -> Node {
    el("div", &[("class", class)], children).into()
}

pub fn news_page(site_name: &str) -> Document {
    layout(
        site_name,
        "お知らせ",
        vec![
            heading("h1", "お知らせ一覧"),
            controls(
                "list-controls",
                vec![sort_form("sortSelect"), pager("prevPage", "pageInfo", "nextPage")],
            ),
            el("div", &[("id", "newsList")], vec![]).into(),
            controls(
                "list-controls bottom",
                vec![
                    sort_form("sortSelectBottom"),
                    pager("prevPageBottom", "pageInfoBottom", "nextPageBottom"),
                ],
            ),
        ],
    )
}

pub fn results_page(site_name: &str) -> Document {
    let crumbs: Element = el(
        "nav",
        &[("class", "breadcrumb")],
        vec![
            el("a", &[("href", "/"), ("text", "ホーム")], vec![]).into(),
            el("span", &[("class", "sep"), ("text", "›")], vec![]).into(),
            el("span", &[("id", "crumbTitle"), ("text", "大会結果")], vec![]).into(),
        ],
    );
    layout(
        site_name,
        "大会結果",
        vec![
            crumbs.into(),
            el("h1", &[("id", "pageTitle"), ("text", "大会結果")], vec![]).into(),
            el("div", &[("id", "resultsList")], vec![]).into(),
        ],
    )
}

pub fn taikai_page(site_name: &str) -> Document {
    layout(
        site_name,
        "大会情報",
        vec![
            heading("h1", "大会情報"),
            el("div", &[("id", "taikaiList")], vec![]).into(),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_carry_their_anchors() {
        let home = home_page("協会");
        assert!(home.contains_id("homeNewsList"));
        assert!(home.contains_id("homeNewsUpdated"));
        assert!(home.contains_id("homeTaikaiList"));

        let news = news_page("協会");
        for id in [
            "newsList",
            "sortSelect",
            "sortSelectBottom",
            "prevPage",
            "nextPage",
            "pageInfo",
            "prevPageBottom",
            "nextPageBottom",
            "pageInfoBottom",
        ] {
            assert!(news.contains_id(id), "{id}");
        }

        let results = results_page("協会");
        assert!(results.contains_id("resultsList"));
        assert!(results.contains_id("pageTitle"));
        assert!(results.contains_id("crumbTitle"));

        assert!(taikai_page("協会").contains_id("taikaiList"));
    }

    #[test]
    fn title_includes_site_name() {
        assert_eq!(news_page("協会").title, "お知らせ｜協会");
    }
}
