//! Coolapk API client.
//!
//! # Responsibilities
//! - Build headline and tag feed URLs
//! - Attach the app identification headers and token
//! - Return upstream status and raw body without interpretation
//! - Keep every call inside the caller's deadline

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use url::Url;

use crate::config::UpstreamConfig;
use crate::resilience::{Deadline, Elapsed};
use crate::upstream::token::{app_token, random_device_code, APP_ID};
use crate::upstream::{FeedSource, UpstreamError, UpstreamResponse};

const SDK_INT: &str = "33";
const SDK_LOCALE: &str = "zh-CN";

/// `FeedSource` backed by the Coolapk HTTP API.
#[derive(Clone)]
pub struct CoolapkClient {
    http: reqwest::Client,
    base_url: Url,
    headlines_path: String,
    tag_feed_path: String,
    device_code: String,
    app_version: String,
    app_code: String,
    api_version: String,
}

impl CoolapkClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `config` - Upstream configuration
    ///
    /// # Returns
    /// A new client or error if the base URL or HTTP client is unusable
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(&config.base_url)?;
        let device_code = if config.device_code.is_empty() {
            random_device_code()
        } else {
            config.device_code.clone()
        };

        let mut builder = reqwest::Client::builder()
            .user_agent(user_agent(&config.app_version, &config.app_code));
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(UpstreamError::Transport)?;

        tracing::info!(
            base_url = %base_url,
            app_version = %config.app_version,
            "Coolapk client initialized"
        );

        Ok(Self {
            http,
            base_url,
            headlines_path: config.headlines_path.clone(),
            tag_feed_path: config.tag_feed_path.clone(),
            device_code,
            app_version: config.app_version.clone(),
            app_code: config.app_code.clone(),
            api_version: config.api_version.clone(),
        })
    }

    pub fn device_code(&self) -> &str {
        &self.device_code
    }

    pub(crate) fn headlines_url(&self, page: i64) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.join(&self.headlines_path)?;
        url.query_pairs_mut().append_pair("page", &page.to_string());
        Ok(url)
    }

    pub(crate) fn tag_feed_url(&self, tag: &str, page: i64) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.join(&self.tag_feed_path)?;
        url.query_pairs_mut()
            .append_pair("tag", tag)
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    fn app_headers(&self) -> Result<HeaderMap, UpstreamError> {
        let pairs = [
            ("x-requested-with", "XMLHttpRequest".to_string()),
            ("x-sdk-int", SDK_INT.to_string()),
            ("x-sdk-locale", SDK_LOCALE.to_string()),
            ("x-app-id", APP_ID.to_string()),
            ("x-app-version", self.app_version.clone()),
            ("x-app-code", self.app_code.clone()),
            ("x-api-version", self.api_version.clone()),
            ("x-app-device", self.device_code.clone()),
            ("x-app-token", app_token(&self.device_code)),
        ];

        let mut headers = HeaderMap::with_capacity(pairs.len());
        for (name, value) in pairs {
            let value: HeaderValue = value
                .parse()
                .map_err(|_| UpstreamError::InvalidHeader(name))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    async fn get(&self, url: Url, deadline: Deadline) -> Result<UpstreamResponse, UpstreamError> {
        if deadline.is_expired() {
            return Err(UpstreamError::DeadlineExceeded);
        }

        tracing::debug!(url = %url, remaining = ?deadline.remaining(), "Calling Coolapk API");

        let request = self
            .http
            .get(url)
            .headers(self.app_headers()?)
            .timeout(deadline.remaining());

        let call = async {
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.bytes().await?;
            Ok::<_, UpstreamError>(UpstreamResponse { status, body })
        };

        match deadline.run(call).await {
            Ok(result) => result,
            Err(Elapsed) => Err(UpstreamError::DeadlineExceeded),
        }
    }
}

fn user_agent(app_version: &str, app_code: &str) -> String {
    format!(
        "Dalvik/2.1.0 (Linux; U; Android 13; Pixel 7 Build/TQ3A.230901.001) \
         (#Build; google; Pixel 7; TQ3A.230901.001; 13) \
         +CoolMarket/{app_version}-{app_code}-universal"
    )
}

#[async_trait]
impl FeedSource for CoolapkClient {
    async fn fetch_headlines(
        &self,
        page: i64,
        deadline: Deadline,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.headlines_url(page)?;
        self.get(url, deadline).await
    }

    async fn fetch_tag_feed(
        &self,
        tag: &str,
        page: i64,
        deadline: Deadline,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = self.tag_feed_url(tag, page)?;
        self.get(url, deadline).await
    }
}
