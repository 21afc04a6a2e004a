use std::{
    ops::{Deref, DerefMut},
    sync::Arc,
    time::Duration,
};

use futures::FutureExt as _;
use reqwest::{
    Method, StatusCode,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use secrecy::{ExposeSecret as _, SecretString};
use tracing::{debug, warn};

use crate::{Chat, Error, Images, Result, error::ApiError};

pub(crate) const BASE_URI: &str = "https://xioca.live/api";
pub(crate) const API_KEY_ENV: &str = "XIOCA_API_KEY";
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One endpoint call: the HTTP verb, the path under the base URI, an optional
/// JSON body, and the type the answer decodes into. `validate` runs before any
/// socket work, so locally detectable mistakes never leave the process.
pub trait Request: Send + Sized + 'static {
    type Model: serde::de::DeserializeOwned + Send + 'static;
    type Body: serde::ser::Serialize;

    const METHOD: Method;

    fn path(&self) -> &'static str;

    fn body(&self) -> Option<Self::Body> {
        None
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// An in-flight request handle. Awaiting it performs the call; until then the
/// underlying kind stays reachable through `Deref` for builder-style tweaks.
pub struct Route<T> {
    client: Client,
    kind: T,
}

impl<T> Route<T> {
    pub(crate) fn new(client: &Client, kind: T) -> Self {
        Self {
            client: client.clone(),
            kind,
        }
    }
}

impl<T> Deref for Route<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

impl<T> DerefMut for Route<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.kind
    }
}

impl<T: Request> IntoFuture for Route<T> {
    type Output = Result<T::Model>;
    type IntoFuture = futures::future::BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        async move {
            self.kind.validate()?;

            let url = join_url(&self.client.base_url, self.kind.path());
            let mut request = self.client.http.request(T::METHOD, &url);
            if let Some(body) = self.kind.body() {
                request = request.json(&body);
            }

            debug!(method = %T::METHOD, %url, "dispatching request");
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;

            decode(status, &body)
        }
        .boxed()
    }
}

/// Maps a finished HTTP exchange onto the error taxonomy: 2xx parses into the
/// expected model (anything else in the body is a parse failure), non-2xx
/// becomes an [`ApiError`] built from the payload.
pub(crate) fn decode<M: serde::de::DeserializeOwned>(status: StatusCode, body: &str) -> Result<M> {
    if !status.is_success() {
        let error = ApiError::from_body(status.as_u16(), body);
        warn!(status = error.status, message = %error.message, "api rejected the request");
        return Err(Error::Api(error));
    }

    serde_json::from_str(body).map_err(|source| Error::Parse {
        source,
        body: body.chars().take(256).collect(),
    })
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Assembles a [`Client`] (or its [blocking](crate::blocking::Client) twin)
/// from an API key, an optional base URL override, and a per-request timeout.
#[derive(Default)]
pub struct ClientBuilder {
    key: Option<SecretString>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    pub fn key(mut self, key: impl Into<SecretString>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Client> {
        let config = self.into_config()?;
        let http = reqwest::Client::builder()
            .default_headers(config.headers()?)
            .timeout(config.timeout)
            .build()?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http,
                base_url: config.base_url,
            }),
        })
    }

    pub(crate) fn into_config(self) -> Result<Config> {
        Ok(Config {
            key: resolve_key(self.key)?,
            base_url: self.base_url.unwrap_or_else(|| BASE_URI.to_owned()),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

pub(crate) struct Config {
    key: SecretString,
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
}

impl Config {
    pub(crate) fn headers(&self) -> Result<HeaderMap> {
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", self.key.expose_secret()))
            .map_err(|_| {
                Error::Configuration(
                    "api key contains characters that cannot be sent in a header".into(),
                )
            })?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }
}

/// An explicit key wins over the environment; empty values count as missing.
fn resolve_key(explicit: Option<SecretString>) -> Result<SecretString> {
    if let Some(key) = explicit {
        return if key.expose_secret().is_empty() {
            Err(Error::Configuration("the provided api key is empty".into()))
        } else {
            Ok(key)
        };
    }

    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.is_empty() => Ok(key.into()),
        _ => Err(Error::Configuration(format!(
            "no api key provided; pass one to the client or set {API_KEY_ENV}"
        ))),
    }
}

/// Asynchronous entry point to the API.
///
/// Cheap to clone; all clones share one connection pool, which is safe for
/// concurrent calls and is released once the last clone is dropped.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Deref for Client {
    type Target = ClientInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Client {
    /// Client with an explicit API key and default configuration.
    pub fn new(key: impl Into<SecretString>) -> Result<Self> {
        Self::builder().key(key).build()
    }

    /// Client keyed from the `XIOCA_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn chat(&self) -> Chat {
        Chat::new(self)
    }

    pub fn images(&self) -> Images {
        Images::new(self)
    }
}

pub struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret as _;

    use super::*;
    use crate::types::ChatCompletion;

    const COMPLETION: &str = r#"{
        "id": "cmpl-1",
        "object": "chat.completion",
        "created": 1754000000,
        "model": "deepseek-v3",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": "hello"}}
        ]
    }"#;

    #[test]
    fn decode_maps_rejections_to_api_errors() {
        let err = decode::<ChatCompletion>(StatusCode::UNAUTHORIZED, r#"{"error": "invalid_key"}"#)
            .unwrap_err();
        match err {
            Error::Api(api) => {
                assert_eq!(api.status, 401);
                assert_eq!(api.message, "invalid_key");
            }
            other => panic!("expected Error::Api, got {other:?}"),
        }
    }

    #[test]
    fn decode_flags_bodies_missing_choices() {
        let body = r#"{"id": "cmpl-1", "object": "chat.completion", "created": 1, "model": "deepseek-v3"}"#;
        let err = decode::<ChatCompletion>(StatusCode::OK, body).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn decode_accepts_well_formed_bodies() {
        let completion = decode::<ChatCompletion>(StatusCode::OK, COMPLETION).unwrap();
        assert_eq!(completion.to_string(), "hello");
    }

    #[test]
    fn decode_keeps_unparseable_error_bodies_verbatim() {
        let err = decode::<ChatCompletion>(StatusCode::BAD_GATEWAY, "upstream fell over").unwrap_err();
        match err {
            Error::Api(api) => {
                assert_eq!(api.status, 502);
                assert_eq!(api.message, "upstream fell over");
            }
            other => panic!("expected Error::Api, got {other:?}"),
        }
    }

    #[test]
    fn urls_join_without_doubled_slashes() {
        assert_eq!(join_url("https://xioca.live/api/", "/ai"), "https://xioca.live/api/ai");
        assert_eq!(join_url("https://xioca.live/api", "ai"), "https://xioca.live/api/ai");
    }

    // One test owns every environment mutation so parallel runs never interleave.
    #[test]
    fn key_resolution_prefers_the_explicit_argument() {
        unsafe { std::env::set_var(API_KEY_ENV, "from-env") };
        let resolved = resolve_key(Some("explicit".into())).unwrap();
        assert_eq!(resolved.expose_secret(), "explicit");

        let resolved = resolve_key(None).unwrap();
        assert_eq!(resolved.expose_secret(), "from-env");

        unsafe { std::env::remove_var(API_KEY_ENV) };
        assert!(matches!(resolve_key(None), Err(Error::Configuration(_))));
        assert!(matches!(
            resolve_key(Some("".into())),
            Err(Error::Configuration(_))
        ));
    }
}
