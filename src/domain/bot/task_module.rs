//! Task module (modal form) responses

use serde::{Deserialize, Serialize};

use super::Attachment;

const DEFAULT_TITLE: &str = "FAQ Plus";
const DEFAULT_HEIGHT: u32 = 460;
const DEFAULT_WIDTH: u32 = 500;

/// Value of a `task/fetch` or `task/submit` invoke
///
/// `data` holds the card action data or the submitted form inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskModuleRequest<T> {
    pub data: T,
    #[serde(default)]
    pub context: Option<serde_json::Value>,
}

/// Envelope returned to a `task/fetch` or `task/submit` invoke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskModuleResponse {
    pub task: TaskModuleTask,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum TaskModuleTask {
    /// Keep the module open showing a card
    Continue(TaskModuleContinue),
    /// Close the module and show a message
    Message(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskModuleContinue {
    pub title: String,
    pub height: u32,
    pub width: u32,
    pub card: Attachment,
}

impl TaskModuleResponse {
    /// Keep the module open showing `card`
    pub fn with_card(card: Attachment) -> Self {
        Self {
            task: TaskModuleTask::Continue(TaskModuleContinue {
                title: DEFAULT_TITLE.to_string(),
                height: DEFAULT_HEIGHT,
                width: DEFAULT_WIDTH,
                card,
            }),
        }
    }

    pub fn message(text: impl Into<String>) -> Self {
        Self {
            task: TaskModuleTask::Message(text.into()),
        }
    }

    /// The card shown by a continue response
    pub fn card(&self) -> Option<&Attachment> {
        match &self.task {
            TaskModuleTask::Continue(value) => Some(&value.card),
            TaskModuleTask::Message(_) => None,
        }
    }
}
