//! Question answering and knowledge base editing façade

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::domain::answer::create_question_and_context;
use crate::domain::card::{
    add_question_form, normal_card, response_card, rich_card, unrecognized_input_card,
    validate_markup_and_required, validate_rich_card_urls, QnaFormValidationError,
    LAST_ADDED_TEXT, LAST_EDITED_TEXT,
};
use crate::domain::{
    Activity, ActivityEntity, ActivityStorage, AnswerOutcome, AnswerQuery, Attachment,
    CompletionSettings, ConfigurationDataProvider, DomainError, EditOutcome, LlmProvider,
    MessagingTransport, QnaForm, QnaPair, QuestionAnswerProvider, ResponseCardPayload,
    RetrievedContext, SearchProvider, SearchQuery, TaskModuleResponse, KNOWLEDGE_BASE_ENTITY_ID,
};
use crate::infrastructure::observability::{
    record_answer_outcome, record_edit_outcome, record_llm_request, LlmRequestMetricParams,
};

/// Answer text format sent with response cards
const MARKDOWN_TEXT_FORMAT: &str = "markdown";

/// External service handles used by the façade
#[derive(Clone)]
pub struct QnaPairServiceDeps {
    pub configuration: Arc<dyn ConfigurationDataProvider>,
    pub question_answer: Arc<dyn QuestionAnswerProvider>,
    pub activity_storage: Arc<dyn ActivityStorage>,
    pub search: Arc<dyn SearchProvider>,
    pub llm: Arc<dyn LlmProvider>,
    pub transport: Arc<dyn MessagingTransport>,
}

/// Answer flow and card settings
#[derive(Debug, Clone)]
pub struct QnaPairServiceConfig {
    /// Public base URI of the bot, used for card icons
    pub app_base_uri: String,
    pub query_language: String,
    pub semantic_configuration: String,
    /// Minimum re-ranker score for the top document to be used as context
    pub reranker_threshold: f64,
    pub completion: CompletionSettings,
}

/// Handles question answering and get/add/update of question and answer pairs
pub struct QnaPairService {
    deps: QnaPairServiceDeps,
    config: QnaPairServiceConfig,
}

impl std::fmt::Debug for QnaPairService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QnaPairService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl QnaPairService {
    pub fn new(deps: QnaPairServiceDeps, config: QnaPairServiceConfig) -> Self {
        Self { deps, config }
    }

    /// Answer an incoming message and reply with a card
    pub async fn get_reply_to_qna(&self, activity: &Activity) -> Result<AnswerOutcome, DomainError> {
        let text = normalize_question(activity.text.as_deref().unwrap_or_default());

        let payload = match (&activity.reply_to_id, &activity.value) {
            (Some(_), Some(value)) => {
                match serde_json::from_value::<ResponseCardPayload>(value.clone()) {
                    Ok(payload) => payload,
                    Err(e) => {
                        warn!(error = %e, "Unreadable response card payload, using defaults");
                        ResponseCardPayload::default()
                    }
                }
            }
            _ => ResponseCardPayload::default(),
        };

        let outcome = self.answer(&text).await?;

        let reply = match outcome.answer() {
            Some(answer) => Activity::message_with_attachment(response_card(
                answer,
                &text,
                &self.config.app_base_uri,
                &payload,
            ))
            .with_text_format(MARKDOWN_TEXT_FORMAT),
            None => Activity::message_with_attachment(unrecognized_input_card(&text)),
        };

        self.deps
            .transport
            .send_activity(&activity.conversation_reference(), reply)
            .await?;

        Ok(outcome)
    }

    /// Answer a question without replying
    ///
    /// A bad request from a managed service turns into `NotPublished` when
    /// the knowledge base has never been published; otherwise it propagates.
    pub async fn answer(&self, question: &str) -> Result<AnswerOutcome, DomainError> {
        let text = normalize_question(question);

        let outcome = match self.consolidated_answer(&text).await {
            Ok(outcome) => outcome,
            Err(e) if e.is_bad_request() => {
                let knowledge_base_id = self
                    .deps
                    .configuration
                    .get_saved_entity_detail(KNOWLEDGE_BASE_ENTITY_ID)
                    .await?
                    .unwrap_or_default();

                let has_published = self
                    .deps
                    .question_answer
                    .initial_published_status(&knowledge_base_id)
                    .await?;

                if has_published {
                    return Err(e);
                }

                error!(
                    error = %e,
                    "Error while fetching the qna pair: knowledge base may be empty or it has not published yet"
                );
                AnswerOutcome::NotPublished
            }
            Err(e) => return Err(e),
        };

        record_answer_outcome(&outcome);
        Ok(outcome)
    }

    /// Search, build the prompt and generate the completion
    pub async fn consolidated_answer(&self, user_message: &str) -> Result<AnswerOutcome, DomainError> {
        let context = self.get_search_result(user_message).await;
        let prompt_text = create_question_and_context(user_message, context.text());

        let answer = self.get_answer_from_gpt(&prompt_text).await?;

        Ok(if context.is_unavailable() {
            AnswerOutcome::SearchUnavailable { answer }
        } else {
            AnswerOutcome::Answered { answer, context }
        })
    }

    /// Context from the top search document; search failures yield
    /// `Unavailable` and never propagate
    pub async fn get_search_result(&self, search_query: &str) -> RetrievedContext {
        let query = SearchQuery::semantic(
            search_query,
            &self.config.query_language,
            &self.config.semantic_configuration,
        );

        match self.deps.search.search(query).await {
            Ok(response) => {
                let context =
                    RetrievedContext::from_response(&response, self.config.reranker_threshold);
                debug!(
                    documents = response.documents.len(),
                    matched = matches!(context, RetrievedContext::Snippet(_)),
                    "Search completed"
                );
                context
            }
            Err(e) => {
                warn!(
                    provider = self.deps.search.provider_name(),
                    error = %e,
                    "Search failed, answering without context"
                );
                RetrievedContext::Unavailable
            }
        }
    }

    /// Text of the first completion choice for an assembled prompt
    pub async fn get_answer_from_gpt(&self, prompt_text: &str) -> Result<String, DomainError> {
        let settings = &self.config.completion;
        let request = settings.build_request(prompt_text);

        let started = Instant::now();
        let result = self.deps.llm.chat(&settings.deployment_id, request).await;

        let usage = result.as_ref().ok().and_then(|r| r.usage.clone());
        record_llm_request(LlmRequestMetricParams {
            provider: self.deps.llm.provider_name(),
            deployment: &settings.deployment_id,
            duration: started.elapsed(),
            success: result.is_ok(),
            input_tokens: usage.as_ref().map(|u| u64::from(u.prompt_tokens)),
            output_tokens: usage.as_ref().map(|u| u64::from(u.completion_tokens)),
        });

        Ok(result?.content().to_string())
    }

    /// Update a stored pair and refresh the chat card that displays it
    ///
    /// Returns `false` without writing when the lookup for the original
    /// question does not return that exact question with a valid id.
    pub async fn save_qna_pair(
        &self,
        activity: &Activity,
        answer: &str,
        form: &QnaForm,
    ) -> Result<bool, DomainError> {
        let answers = self
            .deps
            .question_answer
            .generate_answer(AnswerQuery::new(
                form.original_question(),
                form.is_test_knowledge_base,
            ))
            .await?;

        let Some(found) = answers.first() else {
            return Ok(false);
        };

        let qna_id = match found.valid_id() {
            Some(id) if found.is_same_question(form.original_question()) => id,
            _ => return Ok(false),
        };

        let editor_id = activity.from_aad_object_id();

        info!(editor = %editor_id, qna_id, "Started: question update");
        self.deps
            .question_answer
            .update_qna(QnaPair::edited(
                found,
                qna_id,
                answer,
                editor_id,
                form.updated_question(),
                form.original_question(),
                Utc::now(),
            ))
            .await?;
        info!(editor = %editor_id, qna_id, "Completed: question update");

        let mut card_form = form.clone();
        card_form.is_test_knowledge_base = true;
        card_form.is_preview_card = false;
        if !card_form.is_rich_card {
            card_form.description = Some(answer.to_string());
        }
        let card = qna_card(&card_form, activity.from_name(), LAST_EDITED_TEXT);

        let Some(reference_id) = found.activity_reference_id() else {
            warn!(qna_id, "Pair has no activity reference, card not refreshed");
            return Ok(true);
        };

        let stored = self.deps.activity_storage.get(reference_id).await?;
        let Some(entity) = stored.first() else {
            warn!(qna_id, reference_id, "No stored activity for reference, card not refreshed");
            return Ok(true);
        };

        let update = Activity::card_update(&entity.activity_id, activity.conversation.clone(), card);
        self.deps
            .transport
            .update_activity(&activity.conversation_reference(), update)
            .await?;

        Ok(true)
    }

    /// Task module form prefilled from the card that opened it
    pub fn edit_form(&self, form: QnaForm) -> TaskModuleResponse {
        debug!(question = %form.original_question(), "Opening edit form");
        self.form_response(form)
    }

    /// Validate and apply an edit form submission
    pub async fn edit_qna_pair(
        &self,
        form: QnaForm,
        activity: &Activity,
    ) -> Result<EditOutcome, DomainError> {
        let outcome = self.edit(form, activity).await?;
        record_edit_outcome(&outcome);
        Ok(outcome)
    }

    /// Validate and store a new pair, posting its card into the conversation
    pub async fn add_qna_pair(
        &self,
        form: QnaForm,
        activity: &Activity,
    ) -> Result<EditOutcome, DomainError> {
        let outcome = self.add(form, activity).await?;
        record_edit_outcome(&outcome);
        Ok(outcome)
    }

    async fn edit(&self, form: QnaForm, activity: &Activity) -> Result<EditOutcome, DomainError> {
        let (mut form, answer) = match self.validate(form) {
            Ok(validated) => validated,
            Err(outcome) => return Ok(outcome),
        };

        if form.is_preview_card {
            return Ok(self.preview(&form, activity));
        }

        if form.is_question_unchanged() {
            return self.save_with_fallback(activity, &answer, &mut form).await;
        }

        if self
            .deps
            .question_answer
            .question_exists(form.updated_question())
            .await?
        {
            return Ok(self.duplicate_question(form));
        }

        self.save_with_fallback(activity, &answer, &mut form).await
    }

    async fn add(&self, form: QnaForm, activity: &Activity) -> Result<EditOutcome, DomainError> {
        let (mut form, answer) = match self.validate(form) {
            Ok(validated) => validated,
            Err(outcome) => return Ok(outcome),
        };

        if form.is_preview_card {
            return Ok(self.preview(&form, activity));
        }

        let question = form.updated_question().trim().to_string();

        if self.deps.question_answer.question_exists(&question).await? {
            return Ok(self.duplicate_question(form));
        }

        form.original_question = Some(question.clone());
        form.updated_question = Some(question.clone());
        form.is_test_knowledge_base = true;
        if !form.is_rich_card {
            form.description = Some(answer.clone());
        }

        let card = qna_card(&form, activity.from_name(), LAST_ADDED_TEXT);
        let resource = self
            .deps
            .transport
            .send_activity(
                &activity.conversation_reference(),
                Activity::message_with_attachment(card),
            )
            .await?;

        let reference_id = ActivityEntity::new_reference_id();
        self.deps
            .activity_storage
            .upsert(ActivityEntity::new(&reference_id, resource.id))
            .await?;

        let creator_id = activity.from_aad_object_id();
        info!(creator = %creator_id, reference_id = %reference_id, "Adding question");

        self.deps
            .question_answer
            .add_qna(QnaPair::created(
                question,
                answer,
                creator_id,
                &activity.conversation.id,
                &reference_id,
                Utc::now(),
            ))
            .await?;

        Ok(EditOutcome::Saved)
    }

    /// Apply form validation and resolve the answer text to store
    fn validate(&self, mut form: QnaForm) -> Result<(QnaForm, String), EditOutcome> {
        let errors = validate_markup_and_required(&form);
        if !errors.is_empty() {
            return Err(EditOutcome::Invalid(self.form_response(form.with_errors(&errors))));
        }

        if form.is_rich_card || form.has_rich_content() {
            let errors = validate_rich_card_urls(&form);
            if !errors.is_empty() {
                return Err(EditOutcome::Invalid(self.form_response(form.with_errors(&errors))));
            }

            form.is_rich_card = form.has_rich_content();
        }

        let answer = form.combined_description();
        Ok((form, answer))
    }

    /// Save against production first, then the test knowledge base
    async fn save_with_fallback(
        &self,
        activity: &Activity,
        answer: &str,
        form: &mut QnaForm,
    ) -> Result<EditOutcome, DomainError> {
        form.is_test_knowledge_base = false;
        if self.save_qna_pair(activity, answer, form).await? {
            return Ok(EditOutcome::Saved);
        }

        form.is_test_knowledge_base = true;
        if self.save_qna_pair(activity, answer, form).await? {
            return Ok(EditOutcome::Saved);
        }

        warn!(
            question = %form.original_question(),
            "No stored pair matches the original question, nothing saved"
        );
        Ok(EditOutcome::NotSaved)
    }

    fn duplicate_question(&self, form: QnaForm) -> EditOutcome {
        let form = form.with_errors(&[QnaFormValidationError::DuplicateQuestion]);
        EditOutcome::DuplicateQuestion(self.form_response(form))
    }

    fn preview(&self, form: &QnaForm, activity: &Activity) -> EditOutcome {
        let action = if form.is_edit() {
            LAST_EDITED_TEXT
        } else {
            LAST_ADDED_TEXT
        };
        let card = qna_card(form, activity.from_name(), action);
        EditOutcome::Preview(TaskModuleResponse::with_card(card))
    }

    fn form_response(&self, form: QnaForm) -> TaskModuleResponse {
        TaskModuleResponse::with_card(add_question_form(&form, &self.config.app_base_uri))
    }
}

/// Lower-cased, trimmed user utterance
fn normalize_question(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

fn qna_card(form: &QnaForm, editor_name: &str, action_performed: &str) -> Attachment {
    if form.is_rich_card {
        rich_card(form, editor_name, action_performed)
    } else {
        normal_card(form, editor_name, action_performed)
    }
}
