//! User-facing card text

pub const LAST_EDITED_TEXT: &str = "edited";
pub const LAST_ADDED_TEXT: &str = "added";

pub(crate) const ASK_AN_EXPERT_TEXT: &str = "Ask an expert";
pub(crate) const SHARE_FEEDBACK_TEXT: &str = "Share feedback";
pub(crate) const UNRECOGNIZED_INPUT_TEXT: &str =
    "I didn't find a matching answer for this question. Do you want to ask an expert?";
pub(crate) const EDIT_TEXT: &str = "Edit";
pub(crate) const QUESTION_LABEL: &str = "Question";
pub(crate) const ANSWER_LABEL: &str = "Answer";
pub(crate) const TITLE_LABEL: &str = "Title (optional)";
pub(crate) const SUBTITLE_LABEL: &str = "Subtitle (optional)";
pub(crate) const IMAGE_URL_LABEL: &str = "Image URL (optional)";
pub(crate) const REDIRECTION_URL_LABEL: &str = "Redirection URL (optional)";
pub(crate) const SAVE_TEXT: &str = "Save";
pub(crate) const PREVIEW_TEXT: &str = "Preview";
pub(crate) const OPEN_LINK_TEXT: &str = "Learn more";

/// Footer line naming who last changed a pair
pub(crate) fn action_performed_text(action: &str, by: &str) -> String {
    if by.is_empty() {
        format!("Last {}", action)
    } else {
        format!("Last {} by {}", action, by)
    }
}
