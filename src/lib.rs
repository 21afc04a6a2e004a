#![warn(unreachable_pub, unused_qualifications)]

//! *A Rust client library for the xioca.live generative-AI API.*
//!
//! # Overview
//!
//! This library wraps the Xioca HTTP API in typed request builders and typed
//! responses, covering:
//!
//! - Chat completions across the hosted text models (DeepSeek, Qwen, Llama, ...)
//! - Image generation (`flux`)
//! - Web-aware answers (the `online` flag) and sampling temperature
//! - Both asynchronous and [blocking](blocking) clients over one shared core
//!
//! # Authentication
//!
//! The client requires a Xioca API key which can be provided in two ways:
//! - Environment variable: `XIOCA_API_KEY`
//! - Programmatically: `Client::new(api_key)` (the explicit key wins)
//!
//! A missing key fails with [`Error::Configuration`] before anything touches
//! the network.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! use xioca_rs::types::{ChatMessage, TextModel};
//!
//! #[tokio::main]
//! async fn main() -> xioca_rs::Result<()> {
//!     let client = xioca_rs::client()?;
//!
//!     let completion = client
//!         .chat()
//!         .create(TextModel::DeepseekV3, vec![ChatMessage::user("What is Rust's ownership model?")])
//!         .await?;
//!     println!("{completion}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! Every failure is a variant of [`Error`]: configuration and validation
//! problems are raised locally before any request is sent, remote rejections
//! carry the HTTP status and the backend's message, and a 2xx body that does
//! not match the documented schema is reported separately from either. The
//! library never retries on its own; see [`Error`] for the full taxonomy.
//!
//! # Resource Handling
//!
//! Clients are cheap to clone and share one connection pool. The pool is
//! released exactly once, when the last clone goes out of scope; no explicit
//! shutdown call is needed.

pub mod blocking;
mod chat;
mod client;
mod error;
mod images;
pub mod types;

pub type Result<T> = std::result::Result<T, Error>;

pub use chat::{Chat, ChatCompletions};
pub use client::{Client, ClientBuilder, Request, Route};
pub use error::{ApiError, Error};
pub use images::{ImageGeneration, Images};

/// Creates an async client configured from the environment (`XIOCA_API_KEY`).
pub fn client() -> Result<Client> {
    Client::from_env()
}
