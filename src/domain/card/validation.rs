//! Question form validation

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::QnaForm;

static HTML_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?[a-zA-Z!][^>]*>").expect("valid html tag pattern"));

static IMAGE_URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://[^\s/$.?#][^\s]*\.(?:png|jpe?g|gif)$")
        .expect("valid image url pattern")
});

static REDIRECTION_URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://[^\s/$.?#][^\s]*$").expect("valid url pattern"));

/// Question form validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QnaFormValidationError {
    /// A field contains markup
    ContainsHtml { field: &'static str },
    EmptyQuestion,
    EmptyAnswer,
    InvalidImageUrl,
    InvalidRedirectionUrl,
    /// The question is already stored in the knowledge base
    DuplicateQuestion,
}

impl fmt::Display for QnaFormValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContainsHtml { .. } => write!(f, "HTML tags are not allowed"),
            Self::EmptyQuestion => write!(f, "Question cannot be empty"),
            Self::EmptyAnswer => write!(f, "Answer cannot be empty"),
            Self::InvalidImageUrl => {
                write!(f, "Image URL must be an http(s) link to a .png, .jpg or .gif file")
            }
            Self::InvalidRedirectionUrl => write!(f, "Redirection URL must be an http(s) link"),
            Self::DuplicateQuestion => {
                write!(f, "This question already exists in the knowledge base")
            }
        }
    }
}

impl std::error::Error for QnaFormValidationError {}

fn form_fields(form: &QnaForm) -> [(&'static str, Option<&str>); 4] {
    [
        ("question", form.updated_question.as_deref()),
        ("description", form.description.as_deref()),
        ("title", form.title.as_deref()),
        ("subtitle", form.subtitle.as_deref()),
    ]
}

/// Whether a non-empty image URL is malformed
pub fn is_image_url_invalid(form: &QnaForm) -> bool {
    match form.image_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => !IMAGE_URL_PATTERN.is_match(url),
        _ => false,
    }
}

/// Whether a non-empty redirection URL is malformed
pub fn is_redirection_url_invalid(form: &QnaForm) -> bool {
    match form.redirection_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => !REDIRECTION_URL_PATTERN.is_match(url),
        _ => false,
    }
}

/// Markup and required field errors, in form order
pub fn validate_markup_and_required(form: &QnaForm) -> Vec<QnaFormValidationError> {
    let mut errors: Vec<QnaFormValidationError> = form_fields(form)
        .into_iter()
        .filter(|(_, value)| value.is_some_and(|v| HTML_TAG_PATTERN.is_match(v)))
        .map(|(field, _)| QnaFormValidationError::ContainsHtml { field })
        .collect();

    let has_error_on = |errors: &[QnaFormValidationError], field: &str| {
        errors
            .iter()
            .any(|e| matches!(e, QnaFormValidationError::ContainsHtml { field: f } if *f == field))
    };

    if form.updated_question().trim().is_empty() && !has_error_on(&errors, "question") {
        errors.push(QnaFormValidationError::EmptyQuestion);
    }

    let has_title = form.title.as_deref().is_some_and(|t| !t.trim().is_empty());
    if form.description().trim().is_empty() && !has_title && !has_error_on(&errors, "description")
    {
        errors.push(QnaFormValidationError::EmptyAnswer);
    }

    errors
}

/// Image and redirection URL errors for rich cards
pub fn validate_rich_card_urls(form: &QnaForm) -> Vec<QnaFormValidationError> {
    let mut errors = Vec::new();

    if is_image_url_invalid(form) {
        errors.push(QnaFormValidationError::InvalidImageUrl);
    }

    if is_redirection_url_invalid(form) {
        errors.push(QnaFormValidationError::InvalidRedirectionUrl);
    }

    errors
}
