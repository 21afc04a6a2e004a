//! Blocking twin of the async [`Client`](crate::Client).
//!
//! Same surface, same validation, same error mapping; the only difference is
//! that calls block the current thread instead of suspending a task. Request
//! kinds, validation, and the decode step are shared with the async side.
//!
//! ```rust,no_run
//! use xioca_rs::blocking;
//! use xioca_rs::types::{ChatMessage, TextModel};
//!
//! fn main() -> xioca_rs::Result<()> {
//!     let client = blocking::Client::from_env()?;
//!     let completion = client
//!         .chat()
//!         .create(TextModel::DeepseekV3, vec![ChatMessage::user("hi")])
//!         .send()?;
//!     println!("{completion}");
//!     Ok(())
//! }
//! ```

use std::{
    ops::{Deref, DerefMut},
    sync::Arc,
};

use secrecy::SecretString;
use tracing::debug;

use crate::{
    ClientBuilder, Result,
    chat::ChatCompletions,
    client::{Request, decode, join_url},
    images::ImageGeneration,
    types::{ChatMessage, ImageModel, TextModel},
};

impl ClientBuilder {
    /// Finishes the builder with a blocking transport instead of an async one.
    pub fn build_blocking(self) -> Result<Client> {
        let config = self.into_config()?;
        let http = reqwest::blocking::Client::builder()
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
}

/// Synchronous entry point to the API.
///
/// Clones share one connection pool; a call blocks only its own thread. Must
/// not be used from inside an async runtime.
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
        Self::builder().key(key).build_blocking()
    }

    /// Client keyed from the `XIOCA_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        Self::builder().build_blocking()
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
    http: reqwest::blocking::Client,
    base_url: String,
}

/// Blocking request handle, the counterpart of the awaitable
/// [`Route`](crate::Route).
pub struct Route<T> {
    client: Client,
    kind: T,
}

impl<T> Route<T> {
    fn new(client: &Client, kind: T) -> Self {
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

impl<T: Request> Route<T> {
    /// Performs the call, blocking until the response arrives or the
    /// configured timeout elapses.
    pub fn send(self) -> Result<T::Model> {
        self.kind.validate()?;

        let url = join_url(&self.client.base_url, self.kind.path());
        let mut request = self.client.http.request(T::METHOD, &url);
        if let Some(body) = self.kind.body() {
            request = request.json(&body);
        }

        debug!(method = %T::METHOD, %url, "dispatching blocking request");
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        decode(status, &body)
    }
}

/// Text-generation side of the API
pub struct Chat {
    client: Client,
}

impl Chat {
    fn new(client: &Client) -> Self {
        Self {
            client: client.clone(),
        }
    }

    pub fn create(&self, model: TextModel, messages: Vec<ChatMessage>) -> Route<ChatCompletions> {
        Route::new(&self.client, ChatCompletions::new(model, messages))
    }
}

/// Image-generation side of the API
pub struct Images {
    client: Client,
}

impl Images {
    fn new(client: &Client) -> Self {
        Self {
            client: client.clone(),
        }
    }

    pub fn generate(
        &self,
        model: ImageModel,
        prompt: impl Into<String>,
    ) -> Route<ImageGeneration> {
        Route::new(&self.client, ImageGeneration::new(model, prompt.into()))
    }
}
