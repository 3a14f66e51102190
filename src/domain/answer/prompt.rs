//! Prompt assembly for the completion call

use serde::{Deserialize, Serialize};

use crate::domain::llm::{LlmRequest, Message};

pub const FREQUENCY_PENALTY: f32 = 0.5;
pub const PRESENCE_PENALTY: f32 = 0.0;
pub const TOP_P: f32 = 0.95;
pub const STOP_SEQUENCE: &str = "You:";

/// User prompt embedding the literal question and the retrieved context
pub fn create_question_and_context(question: &str, context: &str) -> String {
    format!("[Question] {} \r\n\r\n[Context] {} \r\n", question, context)
}

/// Configurable completion parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionSettings {
    /// Deployment that serves the completion
    pub deployment_id: String,
    /// Persona instruction sent ahead of the user prompt
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionSettings {
    /// Completion request for an assembled prompt
    ///
    /// The persona goes out with the assistant role, ahead of the user prompt.
    pub fn build_request(&self, prompt_text: &str) -> LlmRequest {
        LlmRequest::builder()
            .message(Message::assistant(self.system_prompt.clone()))
            .user(prompt_text)
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .frequency_penalty(FREQUENCY_PENALTY)
            .presence_penalty(PRESENCE_PENALTY)
            .top_p(TOP_P)
            .stop(vec![STOP_SEQUENCE.to_string()])
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MessageRole;

    #[test]
    fn test_prompt_with_empty_context() {
        let prompt = create_question_and_context("what is vpn?", "");
        assert_eq!(prompt, "[Question] what is vpn? \r\n\r\n[Context]  \r\n");
    }

    #[test]
    fn test_prompt_embeds_context() {
        let prompt = create_question_and_context("what is vpn?", "VPN is a private network.");
        assert!(prompt.ends_with("[Context] VPN is a private network. \r\n"));
    }

    #[test]
    fn test_build_request_uses_fixed_parameters() {
        let settings = CompletionSettings {
            deployment_id: "gpt-35-turbo".to_string(),
            system_prompt: "You answer IT questions in Turkish.".to_string(),
            max_tokens: 800,
            temperature: 0.7,
        };

        let request = settings.build_request("[Question] q \r\n\r\n[Context]  \r\n");

        assert_eq!(request.messages[0].role, MessageRole::Assistant);
        assert_eq!(request.messages[0].content, "You answer IT questions in Turkish.");
        assert_eq!(request.messages[1].role, MessageRole::User);
        assert_eq!(request.max_tokens, Some(800));
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.frequency_penalty, Some(0.5));
        assert_eq!(request.presence_penalty, Some(0.0));
        assert_eq!(request.top_p, Some(0.95));
        assert_eq!(request.stop, Some(vec!["You:".to_string()]));
    }
}
