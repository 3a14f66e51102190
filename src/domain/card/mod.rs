//! Adaptive card payloads, validation and rendering

mod form;
mod payload;
mod qna_card;
mod response_card;
mod strings;
mod validation;

pub use form::add_question_form;
pub use payload::{FormValidation, PreviousQuestion, QnaForm, ResponseCardPayload, RichAnswer};
pub use qna_card::{normal_card, rich_card};
pub use response_card::{response_card, unrecognized_input_card};
pub use strings::{LAST_EDITED_TEXT, LAST_ADDED_TEXT};
pub use validation::{
    validate_markup_and_required, validate_rich_card_urls, QnaFormValidationError,
};
