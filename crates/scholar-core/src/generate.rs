//! Drafts of notes and quizzes written by a language model for teachers to review.

pub mod error;
pub mod note;
pub mod quiz;

use crate::openai::CallConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use std::time::Duration;

fn call_config() -> CallConfig {
    CallConfig::builder()
        .total_timeout(Duration::from_secs(120))
        .iteration_timeout(Duration::from_secs(60))
        .build()
}

fn prompt(system: &str, user: String) -> Result<Vec<ChatCompletionRequestMessage>, OpenAIError> {
    Ok(vec![
        ChatCompletionRequestSystemMessageArgs::default()
            .content(system)
            .build()?
            .into(),
        ChatCompletionRequestUserMessageArgs::default()
            .content(user)
            .build()?
            .into(),
    ])
}
