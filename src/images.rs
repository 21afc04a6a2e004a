use reqwest::Method;

use crate::{
    Client, Error, Result,
    client::{Request, Route},
    types::{ChatMessage, ImageModel, ImageRequest, ImageResult},
};

/// Image-generation side of the API
pub struct Images {
    client: Client,
}

impl Images {
    pub(crate) fn new(client: &Client) -> Self {
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

pub struct ImageGeneration {
    model: ImageModel,
    prompt: String,
}

impl ImageGeneration {
    pub(crate) fn new(model: ImageModel, prompt: String) -> Self {
        Self { model, prompt }
    }
}

impl Request for ImageGeneration {
    type Model = ImageResult;
    type Body = ImageRequest;

    const METHOD: Method = Method::POST;

    fn path(&self) -> &'static str {
        "ai"
    }

    fn body(&self) -> Option<Self::Body> {
        Some(ImageRequest {
            model: self.model,
            messages: vec![ChatMessage::user(self.prompt.clone())],
        })
    }

    fn validate(&self) -> Result<()> {
        if self.prompt.is_empty() {
            return Err(Error::Validation("prompt must not be empty".into()));
        }
        Ok(())
    }
}
