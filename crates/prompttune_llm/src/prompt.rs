//! Prompt templates for the rewrite request.

use prompttune_core::Settings;

use crate::types::{ChatMessage, ChatRequest, GenerationOptions};

pub const SYSTEM_PROMPT: &str = "You are a prompt optimization expert. Rewrite the user's prompt to be clearer, more specific, and more effective. Output only the improved prompt, no explanations. Read the user's prompt and catch the tone. Role, Context, Task, Output Format and Tone should be mentioned. Try to be as neutral as possible.";

/// The user turn wraps the prompt in quotes, which is why models echo them back.
pub fn user_message(prompt: &str) -> String {
    format!("Optimize this prompt: \"{}\"", prompt)
}

pub fn build_chat_request(prompt: &str, settings: &Settings) -> ChatRequest {
    ChatRequest {
        model: settings.model_name.clone(),
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(user_message(prompt)),
        ],
        stream: false,
        options: GenerationOptions {
            temperature: settings.temperature,
            ..GenerationOptions::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn test_user_message_quotes_prompt() {
        assert_eq!(user_message("write story"), "Optimize this prompt: \"write story\"");
    }

    #[test]
    fn test_build_chat_request_uses_settings() {
        let settings = Settings::default().with_model("mistral").with_temperature(0.9);
        let request = build_chat_request("summarize this", &settings);

        assert_eq!(request.model, "mistral");
        assert!(!request.stream);
        assert_eq!(request.options.temperature, 0.9);
        assert_eq!(request.options.top_p, 0.8);
        assert_eq!(request.options.num_predict, 250);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[0].content, SYSTEM_PROMPT);
        assert_eq!(request.messages[1].content, "Optimize this prompt: \"summarize this\"");
    }
}
