use reqwest::Method;

use crate::{
    Client, Error, Result,
    client::{Request, Route},
    types::{ChatCompletion, ChatMessage, ChatRequest, TextModel},
};

/// Text-generation side of the API
pub struct Chat {
    client: Client,
}

impl Chat {
    pub(crate) fn new(client: &Client) -> Self {
        Self {
            client: client.clone(),
        }
    }

    /// Starts a chat completion. Optional knobs go on the returned route:
    ///
    /// ```rust,no_run
    /// # async fn run(client: xioca_rs::Client) -> xioca_rs::Result<()> {
    /// use xioca_rs::types::{ChatMessage, TextModel};
    ///
    /// let mut request = client
    ///     .chat()
    ///     .create(TextModel::DeepseekV3, vec![ChatMessage::user("hi")]);
    /// request.temperature(0.7);
    /// let completion = request.await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn create(&self, model: TextModel, messages: Vec<ChatMessage>) -> Route<ChatCompletions> {
        Route::new(&self.client, ChatCompletions::new(model, messages))
    }
}

pub struct ChatCompletions {
    pub body: ChatRequest,
}

impl ChatCompletions {
    pub(crate) fn new(model: TextModel, messages: Vec<ChatMessage>) -> Self {
        Self {
            body: ChatRequest {
                model,
                messages,
                online: None,
                temperature: None,
            },
        }
    }

    /// Lets the model consult live web results while answering.
    pub fn online(&mut self, online: bool) {
        self.body.online = Some(online);
    }

    /// Sampling temperature, accepted range 0–2.
    pub fn temperature(&mut self, temperature: f32) {
        self.body.temperature = Some(temperature);
    }
}

impl Request for ChatCompletions {
    type Model = ChatCompletion;
    type Body = ChatRequest;

    const METHOD: Method = Method::POST;

    fn path(&self) -> &'static str {
        "ai"
    }

    fn body(&self) -> Option<Self::Body> {
        Some(self.body.clone())
    }

    fn validate(&self) -> Result<()> {
        if let Some(temperature) = self.body.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(Error::Validation(format!(
                    "temperature must lie within 0..=2, got {temperature}"
                )));
            }
        }
        Ok(())
    }
}
