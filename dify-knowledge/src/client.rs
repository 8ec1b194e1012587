use reqwest::{
    Client, ClientBuilder, RequestBuilder, Response,
    header::{AUTHORIZATION, HeaderMap, HeaderValue, InvalidHeaderValue},
    multipart::Form,
};
use serde::{Serialize, de::DeserializeOwned};
use snafu::{OptionExt, ResultExt, Snafu};
use std::{path::PathBuf, sync::Arc};
use tracing::{Level, instrument};
use url::Url;

/// Base URL of the hosted service, used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.dify.ai/v1";

/// Environment variable holding the dataset API key.
pub const API_KEY_ENV: &str = "DIFY_API_KEY";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const API_URL_ENV: &str = "DIFY_API_URL";

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("failed to parse API key"))]
    InvalidApiKey {
        source: InvalidHeaderValue,
    },

    #[snafu(display("failed to parse base URL '{url}'"))]
    UrlParse {
        source: url::ParseError,
        url: String,
    },

    #[snafu(display("base URL '{url}' cannot carry path segments"))]
    InvalidBaseUrl {
        url: String,
    },

    #[snafu(display("environment variable {name} is not set"))]
    MissingEnv {
        name: String,
    },

    #[snafu(display("failed to build HTTP client"))]
    BuildHttpClient {
        source: reqwest::Error,
    },

    #[snafu(display("failed to perform request to '{url}'"))]
    PerformRequest {
        source: reqwest::Error,
        url: Url,
    },

    #[snafu(display(
        "bad response from server; code {code}; description: {}",
        description.as_deref().unwrap_or("none")
    ))]
    BadResponse {
        /// HTTP status code
        code: u16,
        /// Raw response body, if it could be read
        description: Option<String>,
    },

    #[snafu(display("failed to decode response body"))]
    DecodeResponse {
        source: reqwest::Error,
    },

    #[snafu(display("failed to serialize document data"))]
    SerializeData {
        source: serde_json::Error,
    },

    #[snafu(display("failed to build multipart form"))]
    BuildMultipart {
        source: reqwest::Error,
    },

    #[snafu(display("failed to open '{}' for upload", path.display()))]
    OpenFile {
        source: std::io::Error,
        path: PathBuf,
    },

    #[snafu(display("failed to read metadata of '{}'", path.display()))]
    FileMetadata {
        source: std::io::Error,
        path: PathBuf,
    },
}

impl Error {
    /// HTTP status code of a rejected request, if this error came from one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::BadResponse { code, .. } => Some(*code),
            _ => None,
        }
    }
}

struct ClientInner {
    http_client: Client,
    base_url: Url,
}

/// Client for the knowledge-base API.
///
/// Every method maps to exactly one HTTP request. The client holds no mutable
/// state; clones share the same connection pool and can be used from many tasks.
///
/// ```no_run
/// use dify_knowledge::{KnowledgeBaseClient, Pagination};
///
/// # async fn run() -> Result<(), dify_knowledge::Error> {
/// let client = KnowledgeBaseClient::new("dataset-key", "https://api.dify.ai/v1")?;
/// for dataset in client.list_datasets(Pagination::default()).await? {
///     println!("{} {}", dataset.id, dataset.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct KnowledgeBaseClient {
    inner: Arc<ClientInner>,
}

impl KnowledgeBaseClient {
    /// Create a new client with the given API key and base URL.
    pub fn new<K: Into<String>, U: Into<String>>(api_key: K, base_url: U) -> Result<Self, Error> {
        KnowledgeBaseBuilder::new(api_key).with_base_url(base_url).build()
    }

    /// Create a client from `DIFY_API_KEY` and, if set, `DIFY_API_URL`.
    pub fn from_env() -> Result<Self, Error> {
        KnowledgeBaseBuilder::from_env()?.build()
    }

    /// The base URL all endpoints are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Check the response status code and return an error if it is not successful
    #[instrument(skip_all, err)]
    async fn check_response(response: Response) -> Result<Response, Error> {
        let status = response.status();
        if !status.is_success() {
            let description = response.text().await.ok();
            BadResponseSnafu { code: status.as_u16(), description }.fail()
        } else {
            Ok(response)
        }
    }

    /// Performs one HTTP request against `url`.
    ///
    /// `builder` shapes the request from the shared [`Client`], the response status
    /// is checked, and `deserializer` turns a successful response into `T`. Error
    /// responses never reach `deserializer`.
    #[instrument(skip_all, fields(request.url = %url))]
    pub(crate) async fn perform_request<
        B: FnOnce(&Client, Url) -> RequestBuilder,
        D: AsyncFn(Response) -> Result<T, Error>,
        T,
    >(
        &self,
        url: Url,
        builder: B,
        deserializer: D,
    ) -> Result<T, Error> {
        let request = builder(&self.inner.http_client, url.clone());
        tracing::debug!("request built successfully");
        let response = request.send().await.context(PerformRequestSnafu { url })?;
        tracing::debug!(status = response.status().as_u16(), "response received successfully");
        let response = Self::check_response(response).await?;
        tracing::debug!("response ok");
        deserializer(response).await
    }

    #[instrument(skip(self), fields(request.type = "get"))]
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        self.perform_request(
            url,
            |c, url| c.get(url),
            async |r| r.json().await.context(DecodeResponseSnafu),
        )
        .await
    }

    #[instrument(skip(self, body), fields(request.type = "post"))]
    pub(crate) async fn post_json<Req: Serialize, Res: DeserializeOwned>(
        &self,
        url: Url,
        body: &Req,
    ) -> Result<Res, Error> {
        self.perform_request(
            url,
            |c, url| c.post(url).json(body),
            async |r| r.json().await.context(DecodeResponseSnafu),
        )
        .await
    }

    #[instrument(skip(self, form), fields(request.type = "post_multipart"))]
    pub(crate) async fn post_multipart<Res: DeserializeOwned>(
        &self,
        url: Url,
        form: Form,
    ) -> Result<Res, Error> {
        self.perform_request(
            url,
            |c, url| c.post(url).multipart(form),
            async |r| r.json().await.context(DecodeResponseSnafu),
        )
        .await
    }

    /// DELETE whose response body, if any, is discarded.
    #[instrument(skip(self), fields(request.type = "delete"))]
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        self.perform_request(url, |c, url| c.delete(url), async |_r| Ok(())).await
    }

    /// Build the URL for a resource path below the base URL.
    ///
    /// Each segment is percent-encoded on its own, so identifiers containing `/`,
    /// `?` or `#` stay inside a single path segment.
    #[instrument(skip(self), ret(level = Level::DEBUG), err)]
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .ok()
            .context(InvalidBaseUrlSnafu { url: self.inner.base_url.as_str() })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// A builder for the [`KnowledgeBaseClient`].
///
/// ## With a request timeout
///
/// ```no_run
/// use dify_knowledge::KnowledgeBaseBuilder;
/// use reqwest::ClientBuilder;
/// use std::time::Duration;
///
/// # fn run() -> Result<(), dify_knowledge::Error> {
/// let client = KnowledgeBaseBuilder::new("dataset-key")
///     .with_base_url("http://localhost/v1")
///     .with_http_client(ClientBuilder::new().timeout(Duration::from_secs(30)))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct KnowledgeBaseBuilder {
    api_key: String,
    base_url: String,
    client_builder: ClientBuilder,
}

impl KnowledgeBaseBuilder {
    /// Creates a new `KnowledgeBaseBuilder` with the given API key.
    pub fn new<K: Into<String>>(key: K) -> Self {
        Self {
            api_key: key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client_builder: ClientBuilder::default(),
        }
    }

    /// Creates a builder from [`API_KEY_ENV`], applying [`API_URL_ENV`] when present.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var(API_KEY_ENV).ok().context(MissingEnvSnafu { name: API_KEY_ENV })?;
        let builder = Self::new(api_key);
        Ok(match std::env::var(API_URL_ENV) {
            Ok(base_url) => builder.with_base_url(base_url),
            Err(_) => builder,
        })
    }

    /// Sets the base URL, e.g. `https://api.dify.ai/v1`. A trailing slash is optional.
    pub fn with_base_url<U: Into<String>>(mut self, base_url: U) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets a custom `reqwest::ClientBuilder` (proxy, timeouts, TLS).
    pub fn with_http_client(mut self, client_builder: ClientBuilder) -> Self {
        self.client_builder = client_builder;
        self
    }

    /// Builds the client. No request is sent.
    pub fn build(self) -> Result<KnowledgeBaseClient, Error> {
        let base_url = Url::parse(&self.base_url).context(UrlParseSnafu { url: &self.base_url })?;
        if base_url.cannot_be_a_base() {
            return InvalidBaseUrlSnafu { url: self.base_url }.fail();
        }

        let mut authorization =
            HeaderValue::from_str(&format!("Bearer {}", self.api_key)).context(InvalidApiKeySnafu)?;
        authorization.set_sensitive(true);
        let headers = HeaderMap::from_iter([(AUTHORIZATION, authorization)]);

        let http_client =
            self.client_builder.default_headers(headers).build().context(BuildHttpClientSnafu)?;

        Ok(KnowledgeBaseClient { inner: Arc::new(ClientInner { http_client, base_url }) })
    }
}
