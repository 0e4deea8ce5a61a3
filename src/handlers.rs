use crate::listing::SortOrder;
use crate::pages::{self, news::NewsRequest};
use crate::shell;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

/// Raw query strings; unparsable values are ignored rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub order: Option<String>,
    pub page: Option<String>,
}

impl ListQuery {
    pub fn to_request(&self) -> NewsRequest {
        NewsRequest {
            order: self.order.as_deref().and_then(|value| value.parse::<SortOrder>().ok()),
            page: self.page.as_deref().and_then(|value| value.trim().parse().ok()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ResultsQuery {
    pub key: Option<String>,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let ctx = state.context();
    let mut doc = shell::home_page(&state.config.site_name);
    pages::home_news::render(&mut doc, &state.source, &ctx).await;
    pages::home_taikai::render(&mut doc, &state.source, &ctx).await;
    Html(doc.to_html())
}

pub async fn news(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Html<String> {
    let ctx = state.context();
    let mut doc = shell::news_page(&state.config.site_name);
    pages::news::render(&mut doc, &state.source, &ctx, query.to_request()).await;
    Html(doc.to_html())
}

pub async fn results(
    State(state): State<AppState>,
    Query(query): Query<ResultsQuery>,
) -> Html<String> {
    let ctx = state.context();
    let mut doc = shell::results_page(&state.config.site_name);
    pages::results::render(&mut doc, &state.source, &ctx, query.key.as_deref()).await;
    Html(doc.to_html())
}

pub async fn taikai(State(state): State<AppState>) -> Html<String> {
    let ctx = state.context();
    let mut doc = shell::taikai_page(&state.config.site_name);
    pages::taikai::render(&mut doc, &state.source, &ctx).await;
    Html(doc.to_html())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_values_are_parsed_leniently() {
        let query = ListQuery {
            order: Some("asc".to_string()),
            page: Some(" 3 ".to_string()),
        };
        assert_eq!(
            query.to_request(),
            NewsRequest { order: Some(SortOrder::Asc), page: Some(3) }
        );

        let query = ListQuery {
            order: Some("random".to_string()),
            page: Some("-1".to_string()),
        };
        assert_eq!(query.to_request(), NewsRequest::default());
    }
}
