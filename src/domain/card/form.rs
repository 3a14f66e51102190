//! Add/edit question form shown in the task module

use serde_json::{json, Value};

use super::response_card::adaptive_card;
use super::strings::{
    ANSWER_LABEL, IMAGE_URL_LABEL, PREVIEW_TEXT, QUESTION_LABEL, REDIRECTION_URL_LABEL, SAVE_TEXT,
    SUBTITLE_LABEL, TITLE_LABEL,
};
use super::QnaForm;
use crate::domain::bot::Attachment;

fn labelled_input(
    id: &str,
    label: &str,
    value: &str,
    multiline: bool,
    error: Option<&str>,
) -> Vec<Value> {
    let max_length = if multiline { 1000 } else { 500 };
    let mut elements = vec![
        json!({
            "type": "TextBlock",
            "text": label,
            "weight": "Bolder",
            "wrap": true,
        }),
        json!({
            "type": "Input.Text",
            "id": id,
            "value": value,
            "isMultiline": multiline,
            "maxLength": max_length,
        }),
    ];

    if let Some(message) = error {
        elements.push(json!({
            "type": "TextBlock",
            "text": message,
            "color": "Attention",
            "size": "Small",
            "wrap": true,
        }));
    }

    elements
}

/// Question form with the submitted values and inline validation messages
pub fn add_question_form(form: &QnaForm, app_base_uri: &str) -> Attachment {
    let validation = &form.validation;
    let mut body = Vec::new();

    body.extend(labelled_input(
        "updatedQuestion",
        QUESTION_LABEL,
        form.updated_question(),
        false,
        validation.question.as_deref(),
    ));
    body.extend(labelled_input(
        "description",
        ANSWER_LABEL,
        form.description(),
        true,
        validation.description.as_deref(),
    ));
    body.extend(labelled_input(
        "title",
        TITLE_LABEL,
        form.title.as_deref().unwrap_or_default(),
        false,
        validation.title.as_deref(),
    ));
    body.extend(labelled_input(
        "subtitle",
        SUBTITLE_LABEL,
        form.subtitle.as_deref().unwrap_or_default(),
        false,
        validation.subtitle.as_deref(),
    ));
    body.extend(labelled_input(
        "imageUrl",
        IMAGE_URL_LABEL,
        form.image_url.as_deref().unwrap_or_default(),
        false,
        validation.image_url.as_deref(),
    ));
    body.extend(labelled_input(
        "redirectionUrl",
        REDIRECTION_URL_LABEL,
        form.redirection_url.as_deref().unwrap_or_default(),
        false,
        validation.redirection_url.as_deref(),
    ));

    let hidden = json!({
        "originalQuestion": form.original_question(),
        "isTestKnowledgeBase": form.is_test_knowledge_base,
        "isRichCard": form.is_rich_card,
    });

    let base = app_base_uri.trim_end_matches('/');
    let actions = vec![
        submit_action(PREVIEW_TEXT, &hidden, true, format!("{}/content/preview.png", base)),
        submit_action(SAVE_TEXT, &hidden, false, format!("{}/content/save.png", base)),
    ];

    Attachment::adaptive_card(adaptive_card(body, actions))
}

fn submit_action(title: &str, hidden: &Value, is_preview: bool, icon_url: String) -> Value {
    let mut data = hidden.clone();
    data["isPreviewCard"] = json!(is_preview);

    json!({
        "type": "Action.Submit",
        "title": title,
        "iconUrl": icon_url,
        "data": data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::QnaFormValidationError;

    fn input<'a>(card: &'a Attachment, id: &str) -> &'a Value {
        card.content["body"]
            .as_array()
            .unwrap()
            .iter()
            .find(|element| element["id"] == id)
            .unwrap()
    }

    #[test]
    fn test_form_echoes_submitted_values() {
        let form = QnaForm {
            original_question: Some("What is VPN?".to_string()),
            updated_question: Some("What is a VPN?".to_string()),
            description: Some("A private network".to_string()),
            is_test_knowledge_base: true,
            ..Default::default()
        };

        let card = add_question_form(&form, "https://bot.contoso.com");

        assert_eq!(input(&card, "updatedQuestion")["value"], "What is a VPN?");
        assert_eq!(input(&card, "description")["value"], "A private network");

        let save = &card.content["actions"][1];
        assert_eq!(save["data"]["originalQuestion"], "What is VPN?");
        assert_eq!(save["data"]["isTestKnowledgeBase"], true);
        assert_eq!(save["data"]["isPreviewCard"], false);
    }

    #[test]
    fn test_form_shows_duplicate_error() {
        let form = QnaForm {
            original_question: Some("What is VPN?".to_string()),
            updated_question: Some("What is a VPN?".to_string()),
            description: Some("A private network".to_string()),
            ..Default::default()
        }
        .with_errors(&[QnaFormValidationError::DuplicateQuestion]);

        let card = add_question_form(&form, "");
        let body = card.content["body"].as_array().unwrap();

        assert!(body.iter().any(|element| {
            element["color"] == "Attention"
                && element["text"] == QnaFormValidationError::DuplicateQuestion.to_string()
        }));
    }
}
