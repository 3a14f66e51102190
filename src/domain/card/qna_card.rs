//! Cards displaying a stored question/answer pair

use serde_json::{json, Value};

use super::response_card::adaptive_card;
use super::strings::{action_performed_text, EDIT_TEXT, OPEN_LINK_TEXT};
use super::QnaForm;
use crate::domain::bot::Attachment;

/// Edit action opening the question form pre-filled with the pair
fn edit_action(form: &QnaForm) -> Value {
    json!({
        "type": "Action.Submit",
        "title": EDIT_TEXT,
        "data": {
            "msteams": { "type": "task/fetch" },
            "originalQuestion": form.updated_question(),
            "updatedQuestion": form.updated_question(),
            "description": form.description(),
            "title": form.title,
            "subtitle": form.subtitle,
            "imageUrl": form.image_url,
            "redirectionUrl": form.redirection_url,
            "isRichCard": form.is_rich_card,
            "isTestKnowledgeBase": form.is_test_knowledge_base,
        },
    })
}

fn footer(action_performed: &str, editor_name: &str) -> Value {
    json!({
        "type": "TextBlock",
        "text": action_performed_text(action_performed, editor_name),
        "wrap": true,
        "isSubtle": true,
        "size": "Small",
        "spacing": "Medium",
    })
}

/// Plain question and answer card
pub fn normal_card(form: &QnaForm, editor_name: &str, action_performed: &str) -> Attachment {
    let body = vec![
        json!({
            "type": "TextBlock",
            "text": form.updated_question(),
            "weight": "Bolder",
            "wrap": true,
        }),
        json!({
            "type": "TextBlock",
            "text": form.description(),
            "wrap": true,
        }),
        footer(action_performed, editor_name),
    ];

    let actions = if form.is_preview_card {
        Vec::new()
    } else {
        vec![edit_action(form)]
    };

    Attachment::adaptive_card(adaptive_card(body, actions))
}

/// Card with title, subtitle, image and link
pub fn rich_card(form: &QnaForm, editor_name: &str, action_performed: &str) -> Attachment {
    let mut body = vec![json!({
        "type": "TextBlock",
        "text": form.updated_question(),
        "weight": "Bolder",
        "wrap": true,
    })];

    if let Some(title) = non_empty(&form.title) {
        body.push(json!({
            "type": "TextBlock",
            "text": title,
            "size": "Large",
            "weight": "Bolder",
            "wrap": true,
        }));
    }

    if let Some(subtitle) = non_empty(&form.subtitle) {
        body.push(json!({
            "type": "TextBlock",
            "text": subtitle,
            "isSubtle": true,
            "wrap": true,
        }));
    }

    if let Some(image_url) = non_empty(&form.image_url) {
        body.push(json!({
            "type": "Image",
            "url": image_url,
            "size": "Auto",
        }));
    }

    if !form.description().trim().is_empty() {
        body.push(json!({
            "type": "TextBlock",
            "text": form.description(),
            "wrap": true,
        }));
    }

    body.push(footer(action_performed, editor_name));

    let mut actions = Vec::new();
    if let Some(url) = non_empty(&form.redirection_url) {
        actions.push(json!({
            "type": "Action.OpenUrl",
            "title": OPEN_LINK_TEXT,
            "url": url,
        }));
    }

    if !form.is_preview_card {
        actions.push(edit_action(form));
    }

    Attachment::adaptive_card(adaptive_card(body, actions))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::LAST_EDITED_TEXT;

    fn form() -> QnaForm {
        QnaForm {
            original_question: Some("What is VPN?".to_string()),
            updated_question: Some("What is a VPN?".to_string()),
            description: Some("A virtual private network.".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_normal_card_shows_editor() {
        let card = normal_card(&form(), "Ayşe", LAST_EDITED_TEXT);
        let body = card.content["body"].as_array().unwrap();

        assert_eq!(body[0]["text"], "What is a VPN?");
        assert_eq!(body[1]["text"], "A virtual private network.");
        assert_eq!(body[2]["text"], "Last edited by Ayşe");

        let edit = &card.content["actions"][0];
        assert_eq!(edit["data"]["originalQuestion"], "What is a VPN?");
        assert_eq!(edit["data"]["msteams"]["type"], "task/fetch");
    }

    #[test]
    fn test_rich_card_fields() {
        let mut form = form();
        form.is_rich_card = true;
        form.title = Some("VPN".to_string());
        form.image_url = Some("https://contoso.com/vpn.png".to_string());
        form.redirection_url = Some("https://contoso.com/vpn".to_string());

        let card = rich_card(&form, "Ayşe", LAST_EDITED_TEXT);
        let body = card.content["body"].as_array().unwrap();

        assert!(body.iter().any(|b| b["type"] == "Image" && b["url"] == "https://contoso.com/vpn.png"));
        assert!(body.iter().any(|b| b["text"] == "VPN"));

        let actions = card.content["actions"].as_array().unwrap();
        assert_eq!(actions[0]["type"], "Action.OpenUrl");
        assert_eq!(actions[1]["data"]["isRichCard"], true);
    }

    #[test]
    fn test_preview_card_has_no_edit_action() {
        let mut form = form();
        form.is_preview_card = true;

        let card = normal_card(&form, "", LAST_EDITED_TEXT);
        assert!(card.content["actions"].as_array().unwrap().is_empty());
        assert_eq!(card.content["body"][2]["text"], "Last edited");
    }
}
