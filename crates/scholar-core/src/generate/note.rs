use crate::generate::error::GenerateError;
use crate::generate::{call_config, prompt};
use crate::llm_config::LlmConfig;
use crate::openai::{FunctionResponse, call_function};
use scholar_model::generate::{NoteDraft, NoteDraftRequest};
use scholar_model::validation::Validate;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

const SYSTEM_PROMPT: &str = "You are an experienced teacher writing study notes for students. \
Write clear, well structured and factually correct material. Format the note body as HTML using \
headings, paragraphs, lists and emphasis where they help understanding. Do not include a <html>, \
<head> or <body> element.";

#[derive(Debug, Deserialize)]
struct NoteFunctionResponse {
    title: String,
    content: String,
}

impl FunctionResponse for NoteFunctionResponse {
    fn function_name() -> &'static str {
        "save_note"
    }

    fn function_description() -> &'static str {
        "Saves the study note written for the requested subject and topic."
    }

    fn function_definition() -> Value {
        json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "Short title of the note, plain text. Example: \"Solving quadratic equations\""
                },
                "content": {
                    "type": "string",
                    "description": "Body of the note as an HTML fragment."
                }
            },
            "required": ["title", "content"]
        })
    }

    fn fix_escapes(&mut self) {
        // The body is HTML already, only the title is plain text
        self.title = html_escape::decode_html_entities(&self.title).trim().to_string();
    }
}

/// Asks the model for a note about `topic` in `subject`.
#[instrument(skip(llm_config))]
pub async fn generate_note(llm_config: &LlmConfig, request: &NoteDraftRequest) -> Result<NoteDraft, GenerateError> {
    request.validate().map_err(GenerateError::Request)?;

    let messages = prompt(
        SYSTEM_PROMPT,
        format!(
            "Write a study note for the subject \"{}\" about the topic \"{}\".",
            request.subject, request.topic
        ),
    )?;

    let response: NoteFunctionResponse =
        call_function(llm_config, call_config(), messages).await?;

    into_draft(response)
}

fn into_draft(response: NoteFunctionResponse) -> Result<NoteDraft, GenerateError> {
    if response.title.is_empty() {
        return Err(GenerateError::InvalidDraft("note has no title".to_owned()));
    }
    if response.content.trim().is_empty() {
        return Err(GenerateError::InvalidDraft("note has no content".to_owned()));
    }
    Ok(NoteDraft {
        title: response.title,
        content: response.content,
    })
}
