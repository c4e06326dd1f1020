use super::{tool::ToolFuture, validation::parse_parameters, Tool};
use crate::error::{PetNameError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

pub const DEFAULT_WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_TOP_K_RESULTS: usize = 3;
pub const DEFAULT_MAX_CHARS: usize = 4000;
pub const NO_RESULT_MESSAGE: &str = "No good Wikipedia Search Result was found";

/// Parameters accepted by the Wikipedia tool
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct WikipediaParams {
    /// Search query, e.g. a person, place, animal or topic
    pub query: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    #[serde(default)]
    query: Option<ExtractQuery>,
}

#[derive(Debug, Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: HashMap<String, ExtractPage>,
}

#[derive(Debug, Deserialize)]
struct ExtractPage {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    extract: Option<String>,
}

/// Encyclopedia lookup backed by the MediaWiki search and extracts APIs
#[derive(Debug, Clone)]
pub struct WikipediaTool {
    client: Client,
    api_url: String,
    top_k_results: usize,
    max_chars: usize,
}

impl Default for WikipediaTool {
    fn default() -> Self {
        Self::new()
    }
}

impl WikipediaTool {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(concat!("pet-namer-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_url: DEFAULT_WIKIPEDIA_API_URL.to_string(),
            top_k_results: DEFAULT_TOP_K_RESULTS,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_top_k_results(mut self, top_k_results: usize) -> Self {
        self.top_k_results = top_k_results;
        self
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Search, summarize the top hits, and join them into one observation.
    pub async fn run(&self, query: &str) -> Result<String> {
        let titles = self.search(query).await?;
        debug!(query, hits = titles.len(), "wikipedia search");

        let mut summaries = Vec::new();
        for title in titles {
            if let Some(extract) = self.extract(&title).await? {
                summaries.push(format!("Page: {}\nSummary: {}", title, extract));
            }
        }

        if summaries.is_empty() {
            return Ok(NO_RESULT_MESSAGE.to_string());
        }

        Ok(truncate_chars(&summaries.join("\n\n"), self.max_chars))
    }

    async fn search(&self, query: &str) -> Result<Vec<String>> {
        let limit = self.top_k_results.to_string();
        let response: SearchResponse = self
            .get_json(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", limit.as_str()),
                ("format", "json"),
            ])
            .await?;

        Ok(response
            .query
            .map(|query| {
                query
                    .search
                    .into_iter()
                    .take(self.top_k_results)
                    .map(|hit| hit.title)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn extract(&self, title: &str) -> Result<Option<String>> {
        let response: ExtractResponse = self
            .get_json(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", title),
                ("format", "json"),
            ])
            .await?;

        Ok(response.query.and_then(|query| {
            query
                .pages
                .into_values()
                .filter(|page| page.title.is_some())
                .find_map(|page| page.extract)
                .map(|extract| extract.trim().to_string())
                .filter(|extract| !extract.is_empty())
        }))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T> {
        let response = self
            .client
            .get(&self.api_url)
            .query(params)
            .send()
            .await
            .map_err(|err| {
                PetNameError::ToolExecution(format!("Failed to call Wikipedia: {}", err))
            })?;

        if !response.status().is_success() {
            return Err(PetNameError::ToolExecution(format!(
                "Wikipedia returned status {}",
                response.status()
            )));
        }

        response.json::<T>().await.map_err(|err| {
            PetNameError::ToolExecution(format!("Failed to read Wikipedia response: {}", err))
        })
    }
}

impl Tool for WikipediaTool {
    fn name(&self) -> &'static str {
        "wikipedia"
    }

    fn description(&self) -> &'static str {
        "Look up general knowledge on Wikipedia: people, places, animals, facts, historical events and other subjects. Input should be a search query."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        let schema = schemars::schema_for!(WikipediaParams);
        serde_json::to_value(&schema.schema).unwrap_or_else(|_| {
            serde_json::json!({
                "type": "object",
                "properties": { "query": { "type": "string" } },
                "required": ["query"]
            })
        })
    }

    fn execute(&self, parameters: serde_json::Value) -> ToolFuture<'_> {
        Box::pin(async move {
            let params: WikipediaParams = parse_parameters(self.name(), parameters)?;
            let summary = self.run(&params.query).await?;
            Ok(serde_json::Value::String(summary))
        })
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
