//! End-to-end question answering: route → fetch → flatten → extract.

use std::future::Future;

use serde::Serialize;
use tracing::{debug, field, info, instrument};
use url::Url;

use cdpdocs_fetcher::{Fetcher, flatten};
use cdpdocs_shared::{AppConfig, Answer, Result, Task, validate_config};

use crate::extract::extract_snippet;
use crate::router::{ProductTable, route};

/// Where the assistant gets documentation HTML from.
///
/// `None` means the page is unavailable for any reason.
pub trait DocumentSource: Send + Sync {
    fn fetch(&self, url: &Url) -> impl Future<Output = Option<String>> + Send;
}

impl DocumentSource for Fetcher {
    async fn fetch(&self, url: &Url) -> Option<String> {
        Fetcher::fetch(self, url).await
    }
}

/// An answer together with what the question resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Keyword of the matched product.
    pub product: Option<String>,
    /// Task named in the question.
    pub task: Option<Task>,
    pub answer: Answer,
}

/// Answers questions about the configured products. Immutable once built.
#[derive(Debug)]
pub struct Assistant<S> {
    products: ProductTable,
    snippet_chars: usize,
    source: S,
}

impl Assistant<Fetcher> {
    /// Build an assistant that fetches over HTTP, from a loaded config.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        validate_config(config)?;
        let fetcher = Fetcher::new(&config.fetch)?;
        Ok(Self::new(
            ProductTable::new(config.products.iter().cloned()),
            config.answer.snippet_chars,
            fetcher,
        ))
    }
}

impl<S: DocumentSource> Assistant<S> {
    pub fn new(products: ProductTable, snippet_chars: usize, source: S) -> Self {
        Self {
            products,
            snippet_chars,
            source,
        }
    }

    pub fn products(&self) -> &ProductTable {
        &self.products
    }

    /// Answer a free-text question.
    pub async fn answer(&self, question: &str) -> Answer {
        self.resolve(question).await.answer
    }

    /// Answer a free-text question, keeping the matched product and task.
    #[instrument(skip(self), fields(product = field::Empty, task = field::Empty))]
    pub async fn resolve(&self, question: &str) -> Resolution {
        let Some(route) = route(&self.products, question) else {
            debug!("no product keyword in question");
            return Resolution {
                product: None,
                task: None,
                answer: Answer::NoInformation,
            };
        };

        let span = tracing::Span::current();
        span.record("product", route.product.keyword.as_str());
        if let Some(task) = route.task {
            span.record("task", task.phrase());
        }

        let answer = match self.source.fetch(&route.product.url).await {
            None => Answer::NoInformation,
            Some(html) => match route.task {
                None => Answer::TaskNotRecognized,
                Some(task) => {
                    let text = flatten(&html);
                    match extract_snippet(&text, task.phrase(), self.snippet_chars) {
                        Some(snippet) => Answer::Snippet(snippet),
                        None => Answer::PhraseNotInDocs,
                    }
                }
            },
        };

        info!(snippet = answer.is_snippet(), "question answered");

        Resolution {
            product: Some(route.product.keyword.clone()),
            task: route.task,
            answer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use cdpdocs_shared::{DEFAULT_SNIPPET_CHARS, default_products};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// In-memory pages keyed by URL; unknown URLs are unavailable.
    #[derive(Default)]
    struct StaticSource {
        pages: HashMap<String, String>,
        calls: AtomicUsize,
    }

    impl StaticSource {
        fn with_page(url: &str, html: &str) -> Self {
            let mut source = Self::default();
            source.pages.insert(url.to_string(), html.to_string());
            source
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DocumentSource for StaticSource {
        async fn fetch(&self, url: &Url) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.pages.get(url.as_str()).cloned()
        }
    }

    const SEGMENT_URL: &str = "https://segment.com/docs/?ref=nav";

    fn assistant(source: StaticSource) -> Assistant<StaticSource> {
        Assistant::new(
            ProductTable::new(default_products()),
            DEFAULT_SNIPPET_CHARS,
            source,
        )
    }

    fn segment_page() -> String {
        let filler = "Segment collects events from every surface. ".repeat(3);
        let guide = "To set up a new source, open Connections and click Add Source. ".repeat(10);
        format!("<html><body><main><h1>Docs</h1><p>{filler}</p><p>{guide}</p></main></body></html>")
    }

    #[tokio::test]
    async fn snippet_starts_at_phrase_and_spans_window() {
        let html = segment_page();
        let a = assistant(StaticSource::with_page(SEGMENT_URL, &html));

        let snippet = match a.answer("How do I set up a new source in Segment?").await {
            Answer::Snippet(snippet) => snippet,
            other => panic!("expected snippet, got {other:?}"),
        };

        let text = flatten(&html);
        let chars: Vec<char> = text.chars().collect();
        let offset = crate::extract::find_case_insensitive(&chars, "set up a new source").unwrap();
        let expected: String = chars[offset..].iter().take(300).collect();

        assert!(snippet.to_lowercase().starts_with("set up a new source"));
        assert_eq!(snippet.chars().count(), 300.min(chars.len() - offset));
        assert_eq!(snippet, expected);
    }

    #[tokio::test]
    async fn no_product_returns_fallback_without_fetching() {
        let a = assistant(StaticSource::with_page(SEGMENT_URL, &segment_page()));

        let answer = a.answer("How do I set up a new source?").await;
        assert_eq!(answer.to_string(), Answer::NO_INFORMATION);
        assert_eq!(a.source.calls(), 0);

        assert_eq!(a.answer("").await, Answer::NoInformation);
    }

    #[tokio::test]
    async fn failed_fetch_returns_fallback_regardless_of_task() {
        let a = assistant(StaticSource::default());

        assert_eq!(
            a.answer("How do I set up a new source in segment?").await,
            Answer::NoInformation
        );
        assert_eq!(a.answer("What is lytics?").await, Answer::NoInformation);
        assert_eq!(a.source.calls(), 2);
    }

    #[tokio::test]
    async fn phrase_missing_from_docs() {
        let a = assistant(StaticSource::with_page(SEGMENT_URL, &segment_page()));

        let answer = a.answer("How do I build an audience segment?").await;
        assert_eq!(
            answer.to_string(),
            "Relevant information not found in the documentation."
        );
    }

    #[tokio::test]
    async fn product_without_task_is_not_recognized() {
        let a = assistant(StaticSource::with_page(SEGMENT_URL, &segment_page()));

        let resolution = a.resolve("Tell me about Segment pricing").await;
        assert_eq!(resolution.product.as_deref(), Some("segment"));
        assert_eq!(resolution.task, None);
        assert_eq!(resolution.answer, Answer::TaskNotRecognized);
        assert_eq!(a.source.calls(), 1);
    }

    #[tokio::test]
    async fn only_first_matching_product_is_fetched() {
        // segment wins the tie but is unavailable; lytics is never tried.
        let mut source = StaticSource::default();
        source.pages.insert(
            "https://docs.lytics.com/".into(),
            "<p>integrate my data here</p>".into(),
        );
        let a = assistant(source);

        let answer = a.answer("segment vs lytics: how do I integrate my data?").await;
        assert_eq!(answer, Answer::NoInformation);
        assert_eq!(a.source.calls(), 1);
    }

    #[tokio::test]
    async fn snippet_honours_configured_length() {
        let a = Assistant::new(
            ProductTable::new(default_products()),
            17,
            StaticSource::with_page(SEGMENT_URL, &segment_page()),
        );
        let answer = a.answer("set up a new source with segment").await;
        assert_eq!(answer, Answer::Snippet("set up a new sour".into()));
    }

    #[tokio::test]
    async fn resolution_serializes() {
        let a = assistant(StaticSource::with_page(SEGMENT_URL, &segment_page()));
        let resolution = a.resolve("segment: integrate my data").await;
        let json = serde_json::to_value(&resolution).unwrap();
        assert_eq!(json["product"], "segment");
        assert_eq!(json["task"], "integrate-data");
        assert_eq!(json["answer"]["kind"], "phrase_not_in_docs");
    }

    #[tokio::test]
    async fn answers_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/docs/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<html><body><h2>Profiles</h2><p>To create a user profile, call identify().</p></body></html>",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = AppConfig::default();
        config.products = vec![cdpdocs_shared::ProductEntry::new(
            "acme",
            Url::parse(&format!("{}/docs/", server.uri())).unwrap(),
        )];
        let a = Assistant::from_config(&config).unwrap();

        let answer = a.answer("How do I create a user profile in ACME?").await;
        assert_eq!(
            answer,
            Answer::Snippet("create a user profile, call identify().".into())
        );
    }

    #[tokio::test]
    async fn http_error_status_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let mut config = AppConfig::default();
        config.products = vec![cdpdocs_shared::ProductEntry::new(
            "acme",
            Url::parse(&server.uri()).unwrap(),
        )];
        let a = Assistant::from_config(&config).unwrap();

        assert_eq!(
            a.answer("acme: set up a new source").await,
            Answer::NoInformation
        );
    }

    #[test]
    fn from_config_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.products.clear();
        assert!(Assistant::from_config(&config).is_err());
    }
}
