//! Answer generation outcomes and prompt assembly

mod outcome;
mod prompt;

pub use outcome::{AnswerOutcome, EditOutcome};
pub use prompt::{
    create_question_and_context, CompletionSettings, FREQUENCY_PENALTY, PRESENCE_PENALTY,
    STOP_SEQUENCE, TOP_P,
};
