//! Ask command - runs the answer flow once from the terminal

use clap::Args;

use crate::config::AppConfig;
use crate::domain::{AnswerOutcome, RetrievedContext};

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Question text; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    words: Vec<String>,

    /// Also print the retrieved context
    #[arg(long)]
    show_context: bool,
}

impl AskArgs {
    pub fn question(&self) -> String {
        self.words.join(" ")
    }
}

/// Answer the question and print the generated text
pub async fn run(config: AppConfig, args: AskArgs) -> anyhow::Result<()> {
    let service = crate::create_qna_service(&config)?;
    let outcome = service.answer(&args.question()).await?;

    println!("{}", render_outcome(&outcome, args.show_context));

    Ok(())
}

fn render_outcome(outcome: &AnswerOutcome, show_context: bool) -> String {
    match outcome {
        AnswerOutcome::Answered { answer, context } if show_context => {
            let context = match context {
                RetrievedContext::Snippet(text) => text.as_str(),
                _ => "(none)",
            };
            format!("{}\n\n[context] {}", answer, context)
        }
        AnswerOutcome::Answered { answer, .. } => answer.clone(),
        AnswerOutcome::SearchUnavailable { answer } => {
            format!("{}\n\n[search unavailable, answered without context]", answer)
        }
        AnswerOutcome::NotPublished => "The knowledge base has not been published yet.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_answer() {
        let outcome = AnswerOutcome::Answered {
            answer: "VPN şirket ağına güvenli erişimdir.".to_string(),
            context: RetrievedContext::Snippet("VPN ...".to_string()),
        };

        assert_eq!(
            render_outcome(&outcome, false),
            "VPN şirket ağına güvenli erişimdir."
        );
        assert!(render_outcome(&outcome, true).ends_with("[context] VPN ..."));
    }

    #[test]
    fn test_render_not_published() {
        assert!(render_outcome(&AnswerOutcome::NotPublished, false).contains("not been published"));
    }
}
