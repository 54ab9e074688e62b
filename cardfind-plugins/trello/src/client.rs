use std::time::Duration;

use cardfind_plugin::ResultItem;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::card::{ActionBinder, Card};
use crate::config::{Credentials, DefaultSort};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Transport failure, the url is stripped since it carries the credentials.
    #[error("Request failed: {0}")]
    Http(#[source] reqwest::Error),
    #[error("Trello responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("Response has no `cards` key")]
    MissingCards,
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value.without_url())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    cards: Option<Vec<Card>>,
}

/// Appends the default filter clauses unless the user already wrote one.
///
/// Both checks are plain substring tests, so `sort:` anywhere in the text,
/// even inside a search term, suppresses the default sort.
pub fn build_query(query: &str, default_sort: DefaultSort) -> String {
    let mut query = query.to_owned();

    if !query.contains("is:closed") {
        query.push_str(" is:open");
    }

    if !query.contains("sort:") {
        query.push_str(" sort:");
        query.push_str(default_sort.token());
    }

    query
}

#[derive(Debug, Clone)]
pub struct TrelloClient {
    http: Client,
    base_url: String,
}

impl TrelloClient {
    /// Cards requested from the server per search.
    pub const CARDS_LIMIT: usize = 5;

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url.trim_end_matches('/'))
    }

    /// Runs one search request, in server order.
    pub fn search_cards(&self, query: &str, credentials: &Credentials) -> Result<Vec<Card>, Error> {
        let span = tracing::debug_span!("trello::search_cards", query);
        let _enter = span.enter();

        let cards_limit = Self::CARDS_LIMIT.to_string();
        let params = [
            ("query", query),
            ("key", credentials.key.expose()),
            ("token", credentials.token.expose()),
            ("partial", "true"),
            ("modelTypes", "cards"),
            ("cards_limit", cards_limit.as_str()),
            ("card_fields", "name,url"),
            ("card_board", "true"),
            ("card_list", "true"),
            ("board_fields", "name"),
            ("list_fields", "name"),
        ];

        let response = self
            .http
            .get(self.search_url())
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&params)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(Error::Status { status, body });
        }

        let response: SearchResponse = serde_json::from_str(&body)?;
        let cards = response.cards.ok_or(Error::MissingCards)?;
        tracing::debug!("got {} cards", cards.len());

        Ok(cards)
    }

    /// Searches for cards matching `query` and maps them to result items.
    ///
    /// Never fails: every error is logged and yields an empty list.
    pub fn search(
        &self,
        query: &str,
        credentials: &Credentials,
        default_sort: DefaultSort,
        binder: &ActionBinder,
    ) -> Vec<ResultItem> {
        let query = build_query(query, default_sort);

        match self.search_cards(&query, credentials) {
            Ok(cards) => cards.iter().map(|card| card.item(binder)).collect(),
            Err(Error::MissingCards) => {
                tracing::warn!("Trello search response has no `cards` key");
                Vec::new()
            }
            Err(e) => {
                tracing::error!("Unable to search Trello cards: {e}");
                Vec::new()
            }
        }
    }
}
