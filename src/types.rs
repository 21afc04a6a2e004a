//! Contains every wire type used in the library

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// The author of a message
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn of a conversation.
///
/// Requests always carry `content`; the backend marks both fields optional on
/// responses, and image answers arrive through `image_url`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
            image_url: None,
        }
    }
}

/// Text models the backend currently serves
///
/// Using a closed enum means an unknown model name is rejected while the
/// request is being built, not by a failed round trip.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum TextModel {
    #[serde(rename = "deepseek-v3")]
    DeepseekV3,
    #[serde(rename = "deepseek-r1")]
    DeepseekR1,
    #[serde(rename = "qwen3")]
    Qwen3,
    #[serde(rename = "deepcoder")]
    Deepcoder,
    #[serde(rename = "llama-3.3")]
    Llama33,
}

impl TextModel {
    pub const fn as_str(self) -> &'static str {
        match self {
            TextModel::DeepseekV3 => "deepseek-v3",
            TextModel::DeepseekR1 => "deepseek-r1",
            TextModel::Qwen3 => "qwen3",
            TextModel::Deepcoder => "deepcoder",
            TextModel::Llama33 => "llama-3.3",
        }
    }
}

impl fmt::Display for TextModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deepseek-v3" => Ok(TextModel::DeepseekV3),
            "deepseek-r1" => Ok(TextModel::DeepseekR1),
            "qwen3" => Ok(TextModel::Qwen3),
            "deepcoder" => Ok(TextModel::Deepcoder),
            "llama-3.3" => Ok(TextModel::Llama33),
            _ => Err(Error::Validation(format!("unsupported text model: {s:?}"))),
        }
    }
}

impl TryFrom<&str> for TextModel {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Image models the backend currently serves
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum ImageModel {
    #[serde(rename = "flux")]
    Flux,
}

impl ImageModel {
    pub const fn as_str(self) -> &'static str {
        match self {
            ImageModel::Flux => "flux",
        }
    }
}

impl fmt::Display for ImageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flux" => Ok(ImageModel::Flux),
            _ => Err(Error::Validation(format!("unsupported image model: {s:?}"))),
        }
    }
}

impl TryFrom<&str> for ImageModel {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Body of a chat completion request
///
/// Options left unset stay out of the payload entirely so the backend applies
/// its own defaults.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: TextModel,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Body of an image generation request
///
/// The endpoint is chat-shaped: the prompt travels as a single user message.
#[derive(Debug, Clone, Serialize)]
pub struct ImageRequest {
    pub model: ImageModel,
    pub messages: Vec<ChatMessage>,
}

/// A completed generation, one entry per candidate answer
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletion {
    pub id: String,
    pub object: String,
    pub created: i64,
    /// Model name as echoed by the backend.
    pub model: String,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl fmt::Display for ChatCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(
            self.choices
                .first()
                .and_then(|choice| choice.message.content.as_deref())
                .unwrap_or_default(),
        )
    }
}

/// A single candidate answer
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub index: u32,
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token accounting for one request
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// A generated image
///
/// Built from the same chat-shaped payload as [`ChatCompletion`]; a 2xx body
/// that carries no usable URL fails to deserialize.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "ChatCompletion")]
pub struct ImageResult {
    pub url: String,
    pub model: String,
    pub created: i64,
    pub usage: Option<Usage>,
}

impl TryFrom<ChatCompletion> for ImageResult {
    type Error = String;

    fn try_from(completion: ChatCompletion) -> Result<Self, Self::Error> {
        let ChatCompletion {
            model,
            created,
            choices,
            usage,
            ..
        } = completion;

        let url = choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.image_url.or(choice.message.content))
            .ok_or_else(|| "image response carried no url".to_owned())?;

        Ok(Self {
            url,
            model,
            created,
            usage,
        })
    }
}
