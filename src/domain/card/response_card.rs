//! Cards sent in reply to a user question

use serde_json::{json, Value};

use super::strings::{ASK_AN_EXPERT_TEXT, SHARE_FEEDBACK_TEXT, UNRECOGNIZED_INPUT_TEXT};
use super::ResponseCardPayload;
use crate::domain::bot::Attachment;

const ADAPTIVE_CARD_VERSION: &str = "1.2";

pub(crate) fn adaptive_card(body: Vec<Value>, actions: Vec<Value>) -> Value {
    json!({
        "$schema": "http://adaptivecards.io/schemas/adaptive-card.json",
        "type": "AdaptiveCard",
        "version": ADAPTIVE_CARD_VERSION,
        "body": body,
        "actions": actions,
    })
}

fn message_back_action(title: &str, text: &str, data: Value, icon_url: Option<String>) -> Value {
    let mut payload = data;
    payload["msteams"] = json!({
        "type": "messageBack",
        "displayText": title,
        "text": text,
    });

    let mut action = json!({
        "type": "Action.Submit",
        "title": title,
        "data": payload,
    });

    if let Some(url) = icon_url {
        action["iconUrl"] = json!(url);
    }

    action
}

/// Answer card for a generated reply
pub fn response_card(
    answer: &str,
    user_question: &str,
    app_base_uri: &str,
    payload: &ResponseCardPayload,
) -> Attachment {
    let action_payload = ResponseCardPayload {
        user_question: Some(user_question.to_string()),
        knowledge_base_answer: Some(answer.to_string()),
        previous_questions: payload.previous_questions.clone(),
    };
    let data = serde_json::to_value(&action_payload).unwrap_or_else(|_| json!({}));
    let base = app_base_uri.trim_end_matches('/');

    let body = vec![json!({
        "type": "TextBlock",
        "text": answer,
        "wrap": true,
    })];

    let actions = vec![
        message_back_action(
            ASK_AN_EXPERT_TEXT,
            "ask an expert",
            data.clone(),
            Some(format!("{}/content/ask-an-expert.png", base)),
        ),
        message_back_action(
            SHARE_FEEDBACK_TEXT,
            "share feedback",
            data,
            Some(format!("{}/content/share-feedback.png", base)),
        ),
    ];

    Attachment::adaptive_card(adaptive_card(body, actions))
}

/// Card shown when no answer can be produced for a question
pub fn unrecognized_input_card(user_question: &str) -> Attachment {
    let data = json!({ "userQuestion": user_question });

    let body = vec![json!({
        "type": "TextBlock",
        "text": UNRECOGNIZED_INPUT_TEXT,
        "wrap": true,
    })];

    let actions = vec![message_back_action(
        ASK_AN_EXPERT_TEXT,
        "ask an expert",
        data,
        None,
    )];

    Attachment::adaptive_card(adaptive_card(body, actions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bot::ADAPTIVE_CARD_CONTENT_TYPE;
    use crate::domain::card::PreviousQuestion;

    #[test]
    fn test_response_card_carries_answer_and_question() {
        let payload = ResponseCardPayload {
            previous_questions: vec![PreviousQuestion {
                qna_id: 4,
                questions: vec!["vpn".to_string()],
            }],
            ..Default::default()
        };

        let card = response_card(
            "**VPN** is ...",
            "what is vpn?",
            "https://bot.contoso.com/",
            &payload,
        );

        assert_eq!(card.content_type, ADAPTIVE_CARD_CONTENT_TYPE);
        assert_eq!(card.content["body"][0]["text"], "**VPN** is ...");

        let ask = &card.content["actions"][0];
        assert_eq!(ask["data"]["userQuestion"], "what is vpn?");
        assert_eq!(ask["data"]["knowledgeBaseAnswer"], "**VPN** is ...");
        assert_eq!(ask["data"]["previousQuestions"][0]["qnaId"], 4);
        assert_eq!(ask["data"]["msteams"]["type"], "messageBack");
        assert_eq!(ask["iconUrl"], "https://bot.contoso.com/content/ask-an-expert.png");
    }

    #[test]
    fn test_unrecognized_input_card() {
        let card = unrecognized_input_card("what is vpn?");

        assert_eq!(card.content["body"][0]["text"], UNRECOGNIZED_INPUT_TEXT);
        assert_eq!(card.content["actions"][0]["data"]["userQuestion"], "what is vpn?");
    }
}
