use crate::generate::error::GenerateError;
use crate::generate::{call_config, prompt};
use crate::llm_config::LlmConfig;
use crate::openai::{FunctionResponse, call_function};
use scholar_model::generate::{GENERATED_OPTIONS, QuizDraft, QuizDraftRequest};
use scholar_model::quiz::question::NewQuestion;
use scholar_model::validation::Validate;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

const SYSTEM_PROMPT: &str = "You are an experienced teacher writing multiple choice quizzes. \
Every question has exactly four answer options and exactly one of them is correct. Vary the \
position of the correct option and keep wrong options plausible.";

#[derive(Debug, Deserialize)]
struct GeneratedQuestion {
    question: String,
    options: Vec<String>,
    correct_answer: usize,
}

#[derive(Debug, Deserialize)]
struct QuizFunctionResponse {
    questions: Vec<GeneratedQuestion>,
}

impl FunctionResponse for QuizFunctionResponse {
    fn function_name() -> &'static str {
        "save_quiz"
    }

    fn function_description() -> &'static str {
        "Saves the multiple choice questions written for the requested quiz."
    }

    fn function_definition() -> Value {
        json!({
            "type": "object",
            "properties": {
                "questions": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "question": {
                                "type": "string",
                                "description": "The question text, plain text."
                            },
                            "options": {
                                "type": "array",
                                "items": {"type": "string"},
                                "minItems": GENERATED_OPTIONS,
                                "maxItems": GENERATED_OPTIONS,
                                "description": "Exactly four answer options, plain text."
                            },
                            "correct_answer": {
                                "type": "integer",
                                "minimum": 0,
                                "maximum": GENERATED_OPTIONS - 1,
                                "description": "Zero based index of the correct option."
                            }
                        },
                        "required": ["question", "options", "correct_answer"]
                    }
                }
            },
            "required": ["questions"]
        })
    }

    fn fix_escapes(&mut self) {
        for question in &mut self.questions {
            question.question = html_escape::decode_html_entities(&question.question).to_string();
            for option in &mut question.options {
                *option = html_escape::decode_html_entities(option).to_string();
            }
        }
    }
}

/// Asks the model for `num_questions` questions (5 by default) for a quiz titled `title`.
#[instrument(skip(llm_config))]
pub async fn generate_quiz(llm_config: &LlmConfig, request: &QuizDraftRequest) -> Result<QuizDraft, GenerateError> {
    request.validate().map_err(GenerateError::Request)?;
    let count = request.question_count();

    let messages = prompt(
        SYSTEM_PROMPT,
        format!(
            "Create a quiz titled \"{}\" for the subject \"{}\" with exactly {count} questions.",
            request.title, request.subject
        ),
    )?;

    let response: QuizFunctionResponse =
        call_function(llm_config, call_config(), messages).await?;

    into_draft(response, usize::from(count))
}

fn into_draft(response: QuizFunctionResponse, count: usize) -> Result<QuizDraft, GenerateError> {
    let mut questions = response.questions;
    if questions.len() < count {
        return Err(GenerateError::InvalidDraft(format!(
            "expected {count} questions, got {}",
            questions.len()
        )));
    }
    if questions.len() > count {
        tracing::debug!(received = questions.len(), count, "dropping surplus generated questions");
        questions.truncate(count);
    }

    let questions = questions
        .into_iter()
        .enumerate()
        .map(|(index, generated)| {
            if generated.options.len() != GENERATED_OPTIONS {
                return Err(GenerateError::InvalidDraft(format!(
                    "question {index} has {} options",
                    generated.options.len()
                )));
            }
            let question = NewQuestion {
                text: generated.question,
                options: generated.options,
                correct_answer: generated.correct_answer,
            };
            question
                .validate_at(index)
                .map_err(|error| GenerateError::InvalidDraft(error.to_string()))?;
            Ok(question)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QuizDraft { questions })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> QuizFunctionResponse {
        let mut response: QuizFunctionResponse = serde_json::from_str(json).unwrap();
        response.fix_escapes();
        response
    }

    const TWO_QUESTIONS: &str = r#"{"questions":[
        {"question":"1 + 1 = ?","options":["1","2","3","4"],"correct_answer":1},
        {"question":"Which is larger &gt; 3?","options":["1","2","3","4"],"correct_answer":3}
    ]}"#;

    #[test]
    fn test_quiz_response() {
        let draft = into_draft(response(TWO_QUESTIONS), 2).unwrap();
        assert_eq!(draft.questions.len(), 2);
        assert_eq!(draft.questions[1].text, "Which is larger > 3?");
        assert_eq!(draft.questions[1].correct_answer, 3);
    }

    #[test]
    fn test_surplus_questions_are_dropped() {
        let draft = into_draft(response(TWO_QUESTIONS), 1).unwrap();
        assert_eq!(draft.questions.len(), 1);
        assert_eq!(draft.questions[0].text, "1 + 1 = ?");
    }

    #[test]
    fn test_missing_questions_are_rejected() {
        assert!(matches!(
            into_draft(response(TWO_QUESTIONS), 3),
            Err(GenerateError::InvalidDraft(_))
        ));
    }

    #[test]
    fn test_malformed_questions_are_rejected() {
        let three_options = r#"{"questions":[{"question":"?","options":["a","b","c"],"correct_answer":0}]}"#;
        assert!(matches!(
            into_draft(response(three_options), 1),
            Err(GenerateError::InvalidDraft(_))
        ));

        let out_of_range = r#"{"questions":[{"question":"?","options":["a","b","c","d"],"correct_answer":4}]}"#;
        assert!(matches!(
            into_draft(response(out_of_range), 1),
            Err(GenerateError::InvalidDraft(_))
        ));
    }
}
