use serde::{Deserialize, Serialize};

use crate::core::message::Message;

#[derive(Serialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

#[derive(Deserialize)]
pub struct ChatResponseMessage {
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub struct ChatResponseChoice {
    pub message: ChatResponseMessage,
}

#[derive(Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatResponseChoice>,
}

impl From<&Message> for ChatMessage {
    fn from(msg: &Message) -> Self {
        ChatMessage {
            role: msg.role.as_str().to_string(),
            content: msg.content.clone(),
        }
    }
}

impl ChatRequest {
    /// Build a non-streaming request carrying the whole conversation.
    pub fn from_conversation<I, M>(model: impl Into<String>, conversation: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<ChatMessage>,
    {
        ChatRequest {
            model: model.into(),
            messages: conversation.into_iter().map(Into::into).collect(),
            stream: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Role;

    #[test]
    fn request_serializes_roles_and_disables_streaming() {
        let conversation = [Message::seed(), Message::user("hello")];
        let request = ChatRequest::from_conversation("gpt-4o", conversation.iter());
        let json = serde_json::to_value(&request).expect("serialize");

        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "hello");
    }

    #[test]
    fn response_content_is_extracted_from_the_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hi there"}}]}"#;
        let response: ChatResponse = serde_json::from_str(body).expect("deserialize");
        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref());
        assert_eq!(content, Some("hi there"));
    }

    #[test]
    fn chat_message_mirrors_conversation_roles() {
        let msg = Message::new(Role::Assistant, "done");
        let wire = ChatMessage::from(&msg);
        assert_eq!(wire.role, "assistant");
        assert_eq!(wire.content, "done");
    }
}
