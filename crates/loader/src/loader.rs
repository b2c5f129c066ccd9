// ABOUTME: Asynchronous single-shot URL loading with explicit abort support.
// ABOUTME: Every convenience call funnels through perform(); each call completes exactly once.

use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use tokio::sync::Notify;
use url::Url;

use crate::error::LoadError;
use crate::options::{LoadOptions, LoaderBuilder};

/// The outcome of a completed load.
#[derive(Debug, Clone)]
pub struct LoadResponse {
    /// The raw response body.
    pub data: Bytes,
    /// The body decoded to text, unless the loader expects binary data.
    pub string: Option<String>,
    /// The HTTP response status code, reported but not interpreted.
    pub status: u16,
}

/// Loads data from a single URL.
///
/// Each operation resolves exactly once: with a response, with an error, or
/// with [`LoadError::Cancelled`] after [`Loader::abort`]. Aborting is
/// permanent for the loader; in-flight operations are cancelled and later
/// ones fail immediately.
#[derive(Debug)]
pub struct Loader {
    url: Url,
    opts: LoadOptions,
    client: reqwest::Client,
    aborted: AtomicBool,
    abort_signal: Notify,
}

impl Loader {
    /// Creates a loader for the given URL with default options.
    pub fn new(url: impl Into<String>) -> Result<Self, LoadError> {
        Self::builder(url).build()
    }

    /// Creates a builder for configuring a loader.
    pub fn builder(url: impl Into<String>) -> LoaderBuilder {
        LoaderBuilder::new(url)
    }

    pub(crate) fn from_options(url: String, opts: LoadOptions) -> Result<Self, LoadError> {
        let parsed = Url::parse(&url).map_err(|err| LoadError::invalid_url(&url, err))?;
        let scheme = parsed.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(LoadError::invalid_url(
                &url,
                format!("unsupported scheme {scheme:?}"),
            ));
        }

        let client = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .expect("failed to build HTTP client")
        });

        Ok(Self {
            url: parsed,
            opts,
            client,
            aborted: AtomicBool::new(false),
            abort_signal: Notify::new(),
        })
    }

    /// The URL this loader reads from.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Loads the URL with a GET request.
    pub async fn get(&self) -> Result<LoadResponse, LoadError> {
        let request = self
            .request_builder(self.client.get(self.url.clone()))
            .build()
            .map_err(LoadError::request)?;
        self.perform(request).await
    }

    /// POSTs a form-encoded body to the URL.
    pub async fn post(&self, body: impl Into<String>) -> Result<LoadResponse, LoadError> {
        let request = self
            .request_builder(self.client.post(self.url.clone()))
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body.into())
            .build()
            .map_err(LoadError::request)?;
        self.perform(request).await
    }

    /// Performs an arbitrary request. All load operations end up here.
    pub async fn perform(&self, request: reqwest::Request) -> Result<LoadResponse, LoadError> {
        let notified = self.abort_signal.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.aborted.load(Ordering::SeqCst) {
            return Err(LoadError::Cancelled);
        }
        tokio::select! {
            _ = &mut notified => Err(LoadError::Cancelled),
            result = self.execute(request) => result,
        }
    }

    /// Aborts loading. An in-flight operation resolves to
    /// [`LoadError::Cancelled`]; an already-completed one is unaffected.
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::SeqCst);
        self.abort_signal.notify_waiters();
    }

    /// Loads the URL and parses the response text as an XML document.
    pub async fn load_xml(&self) -> Result<xmlkit_dom::Document, LoadError> {
        let response = self.get().await?;
        let text = match response.string {
            Some(text) => text,
            None => decode_body(&response.data, None),
        };
        Ok(xmlkit_dom::parse_xml(&text)?)
    }

    fn request_builder(&self, mut builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        for (key, value) in &self.opts.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        builder
    }

    async fn execute(&self, request: reqwest::Request) -> Result<LoadResponse, LoadError> {
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|err| self.classify(err))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let data = response.bytes().await.map_err(|err| self.classify(err))?;
        let string = if self.opts.expect_binary {
            None
        } else {
            Some(decode_body(&data, content_type.as_deref()))
        };

        Ok(LoadResponse {
            data,
            string,
            status,
        })
    }

    fn classify(&self, err: reqwest::Error) -> LoadError {
        if err.is_timeout() {
            LoadError::Timeout(self.opts.timeout)
        } else {
            LoadError::request(err)
        }
    }
}

/// Decode body bytes to a String using the charset from the content-type
/// header, falling back to detection.
pub(crate) fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(ct) = content_type {
        if let Some(charset) = extract_charset(ct) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(body);
                return decoded.into_owned();
            }
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract the charset value from a Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    for part in lower.split(';') {
        let trimmed = part.trim();
        if let Some(charset) = trimmed.strip_prefix("charset=") {
            let charset = charset.trim_matches('"').trim_matches('\'');
            return Some(charset.to_string());
        }
    }
    None
}
