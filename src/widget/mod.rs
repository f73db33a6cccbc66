//! Client-side chat state: message history, input box, provider selection.
//!
//! The widget owns everything it shows. A turn is split in two halves so a
//! UI can render the optimistic user message while the relay call is in
//! flight: [`ChatWidget::begin_submit`] and [`ChatWidget::finish_submit`].

pub mod transport;

use log::error;

use crate::llm::{ Provider, ZhipuModel };
use crate::models::chat::{ ChatMessage, ChatRequest, Role };

pub use transport::{ HttpRelayTransport, RelayTransport, WidgetError };

pub const MAX_CHARS: usize = 2000;
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";
pub const EMPTY_PLACEHOLDER: &str = "Start a conversation by typing a message below";

/// One rendered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bubble<'a> {
    pub role: Role,
    pub content: &'a str,
    pub label: &'static str,
}

impl<'a> From<&'a ChatMessage> for Bubble<'a> {
    fn from(message: &'a ChatMessage) -> Self {
        let label = match message.role {
            Role::User => "You",
            Role::Assistant => "AI",
        };
        Bubble { role: message.role, content: &message.content, label }
    }
}

#[derive(Debug, Default)]
pub struct ChatWidget {
    messages: Vec<ChatMessage>,
    input: String,
    is_loading: bool,
    provider: Provider,
    zhipu_model: ZhipuModel,
    revision: u64,
    scrolled_to: u64,
}

impl ChatWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Message bubbles in insertion order.
    pub fn bubbles(&self) -> impl Iterator<Item = Bubble<'_>> + '_ {
        self.messages.iter().map(Bubble::from)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn set_provider(&mut self, provider: Provider) {
        self.provider = provider;
    }

    pub fn zhipu_model(&self) -> ZhipuModel {
        self.zhipu_model
    }

    pub fn set_zhipu_model(&mut self, model: ZhipuModel) {
        self.zhipu_model = model;
    }

    /// Input length in UTF-16 code units, the unit browsers count in.
    pub fn char_count(&self) -> usize {
        self.input.encode_utf16().count()
    }

    pub fn is_over_limit(&self) -> bool {
        self.char_count() > MAX_CHARS
    }

    /// Counter shown under the input, e.g. `12/2000`.
    pub fn counter(&self) -> String {
        format!("{}/{}", self.char_count(), MAX_CHARS)
    }

    pub fn can_send(&self) -> bool {
        !self.is_loading && !self.input.trim().is_empty() && !self.is_over_limit()
    }

    /// Returns true once per history change, telling the view to scroll to
    /// the newest message.
    pub fn take_scroll_request(&mut self) -> bool {
        let pending = self.scrolled_to != self.revision;
        self.scrolled_to = self.revision;
        pending
    }

    /// First half of a turn. Appends the user message, clears the input and
    /// marks the widget as loading; returns the request to send. Returns
    /// `None` without touching any state if the input cannot be sent.
    pub fn begin_submit(&mut self) -> Option<ChatRequest> {
        if !self.can_send() {
            return None;
        }

        let message = std::mem::take(&mut self.input);
        self.push(ChatMessage::user(message.clone()));
        self.is_loading = true;

        let model = match self.provider {
            Provider::Zhipu => Some(self.zhipu_model.as_str().to_string()),
            Provider::OpenAI => None,
        };

        Some(ChatRequest {
            message,
            provider: self.provider.as_str().to_string(),
            model,
        })
    }

    /// Second half of a turn. Appends the reply, or the fixed error reply on
    /// failure, and clears the loading flag.
    pub fn finish_submit(&mut self, result: Result<String, WidgetError>) {
        let reply = match result {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to send message: {}", e);
                ERROR_REPLY.to_string()
            }
        };
        self.push(ChatMessage::assistant(reply));
        self.is_loading = false;
    }

    /// Runs a whole turn against `transport`. Returns whether a request was
    /// issued.
    pub async fn submit<T: RelayTransport + ?Sized>(&mut self, transport: &T) -> bool {
        let Some(request) = self.begin_submit() else {
            return false;
        };
        let result = transport.post_chat(&request).await;
        self.finish_submit(result);
        true
    }

    fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.revision += 1;
    }
}
