use chrono::{DateTime, Local};

pub const WELCOME_MESSAGE: &str = "Welcome, Operator. I am RescueVisionAI. How may I assist you?";
pub const NO_RELEVANT_INFORMATION: &str = "No relevant information found.";
pub const KNOWLEDGE_BASE_UNREACHABLE: &str = "Sorry, I am having trouble connecting to my knowledge base. Please ensure the backend service is running.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageAuthor {
    Operator,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub author: MessageAuthor,
    pub text: String,
    pub sent_at: DateTime<Local>,
}

impl ChatMessage {
    pub fn operator(text: impl Into<String>) -> Self {
        Self::new(MessageAuthor::Operator, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(MessageAuthor::Assistant, text)
    }

    fn new(author: MessageAuthor, text: impl Into<String>) -> Self {
        Self {
            author,
            text: text.into(),
            sent_at: Local::now(),
        }
    }

    pub fn is_from_assistant(&self) -> bool {
        self.author == MessageAuthor::Assistant
    }
}
