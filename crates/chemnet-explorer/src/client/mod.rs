//! ChemNet REST API client.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - One attempt per call (no retry, no backoff, no cache)
//! - Status and payload classification into [`ClientError`]

use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{Config, api, paths};
use crate::error::{ClientError, ClientResult};
use crate::models::{
    ChemicalCatalog, ChemicalSearchRequest, ChemicalSearchResult, Chemicals, Companies,
    CompanyCatalog, CompanyDetails, CompanySearchRequest, CompanySearchResult, FundingTable,
    ResearcherCatalog, ResearcherSearchRequest, ResearcherSearchResult, Researchers, SearchKind,
    Universities, UniversityCatalog, UniversitySearchRequest, UniversitySearchResult,
};

/// ChemNet API client.
#[derive(Clone)]
pub struct ChemNetClient {
    /// HTTP client.
    client: Client,

    /// API root, always ending in `/`.
    api_root: Url,

    /// Host the visualization frames are served from.
    visualization_host: Url,
}

impl ChemNetClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if a configured URL is invalid or HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true);

        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            api_root: Url::parse(&config.api_root())?,
            visualization_host: Url::parse(&config.visualization_host)?,
        })
    }

    /// Host that `iframe_url` paths are resolved against.
    #[must_use]
    pub const fn visualization_host(&self) -> &Url {
        &self.visualization_host
    }

    /// Fetch the example listing of a search endpoint.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or malformed payload.
    pub async fn catalog<K: SearchKind>(&self) -> ClientResult<K::Catalog> {
        let url = self.endpoint(K::PATH)?;
        self.get(url).await
    }

    /// Run one search against a search endpoint.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or malformed payload.
    /// A `success: false` answer is not an error at this layer.
    pub async fn search<K: SearchKind>(&self, request: &K::Request) -> ClientResult<K::Response> {
        let url = self.endpoint(K::PATH)?;
        self.post(url, request).await
    }

    /// Get example chemicals and all chemical names.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_chemical_data(&self) -> ClientResult<ChemicalCatalog> {
        self.catalog::<Chemicals>().await
    }

    /// Search for a chemical.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn search_chemical(
        &self,
        request: &ChemicalSearchRequest,
    ) -> ClientResult<ChemicalSearchResult> {
        self.search::<Chemicals>(request).await
    }

    /// Get example funding sources and filter options.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_company_data(&self) -> ClientResult<CompanyCatalog> {
        self.catalog::<Companies>().await
    }

    /// Search for a funding source.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn search_company(
        &self,
        request: &CompanySearchRequest,
    ) -> ClientResult<CompanySearchResult> {
        self.search::<Companies>(request).await
    }

    /// Get example universities and filter options.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_university_data(&self) -> ClientResult<UniversityCatalog> {
        self.catalog::<Universities>().await
    }

    /// Search for a university.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn search_university(
        &self,
        request: &UniversitySearchRequest,
    ) -> ClientResult<UniversitySearchResult> {
        self.search::<Universities>(request).await
    }

    /// Get example researchers and all researcher names.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_researcher_data(&self) -> ClientResult<ResearcherCatalog> {
        self.catalog::<Researchers>().await
    }

    /// Search for a researcher, optionally picking or combining ambiguous matches.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn search_researcher(
        &self,
        request: &ResearcherSearchRequest,
    ) -> ClientResult<ResearcherSearchResult> {
        self.search::<Researchers>(request).await
    }

    /// Get the ranked list of top funding sources.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_funding_table(&self) -> ClientResult<FundingTable> {
        let url = self.endpoint(paths::FUNDING_TABLE)?;
        self.get(url).await
    }

    /// Get top chemicals and affiliations of one funding source.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_company_details(&self, company_name: &str) -> ClientResult<CompanyDetails> {
        let mut url = self.endpoint(paths::FUNDING_TABLE)?;
        url.query_pairs_mut().append_pair("company_name", company_name);
        self.get(url).await
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.api_root.join(path)?)
    }

    /// Make a GET request.
    async fn get<T>(&self, url: Url) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(method = "GET", url = %url, "ChemNet request");

        let response = self.client.get(url.clone()).send().await.inspect_err(|e| {
            tracing::warn!(url = %url, error = %e, "ChemNet request failed");
        })?;

        Self::read_json(response).await
    }

    /// Make a POST request with a JSON body.
    async fn post<T, B>(&self, url: Url, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        tracing::debug!(method = "POST", url = %url, "ChemNet request");

        let body = serde_json::to_vec(body)?;
        let response = self.client.post(url.clone()).body(body).send().await.inspect_err(|e| {
            tracing::warn!(url = %url, error = %e, "ChemNet request failed");
        })?;

        Self::read_json(response).await
    }

    /// Check the status, then decode the body as JSON.
    ///
    /// HTML documents are rejected before decoding: the backend serves its
    /// error pages as HTML with a 200 status on some failures.
    async fn read_json<T>(response: reqwest::Response) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = backend_message(&body);
            tracing::warn!(status = status.as_u16(), message = ?message, "ChemNet error status");
            return Err(ClientError::from_status(status.as_u16(), message));
        }

        if looks_like_html(&content_type, &body) {
            tracing::warn!(content_type = %content_type, "ChemNet returned HTML instead of JSON");
            let content_type =
                if content_type.is_empty() { "text/html".to_string() } else { content_type };
            return Err(ClientError::UnexpectedContent { content_type });
        }

        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(error = %e, "ChemNet payload did not match the expected shape");
            ClientError::from(e)
        })
    }
}

/// Pull a human-readable explanation out of an error body.
fn backend_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["message", "error", "detail"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

fn looks_like_html(content_type: &str, body: &[u8]) -> bool {
    if content_type.contains("html") {
        return true;
    }
    body.iter().find(|b| !b.is_ascii_whitespace()) == Some(&b'<')
}

impl std::fmt::Debug for ChemNetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChemNetClient")
            .field("api_root", &self.api_root.as_str())
            .field("visualization_host", &self.visualization_host.as_str())
            .finish()
    }
}
