//! Forced function calls against an OpenAI compatible chat completion API.

use crate::llm_config::LlmConfig;
use crate::openai::error::{FunctionCallError, OpenAiError};
use async_openai::Client;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionNamedToolChoice, ChatCompletionRequestMessage, ChatCompletionTool,
    ChatCompletionToolChoiceOption, ChatCompletionToolType, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs, CreateChatCompletionResponse, FunctionName, FunctionObject,
};
use backoff::ExponentialBackoff;
use backoff::ExponentialBackoffBuilder;
use std::error::Error;
use std::time::Duration;
use tracing::instrument;
use typed_builder::TypedBuilder;

pub mod error;

/// Limits of one call. Retries happen inside the client until `total_timeout` elapsed.
#[derive(TypedBuilder, Debug, Clone)]
pub struct CallConfig {
    total_timeout: Duration,
    /// Timeout of a single http request
    iteration_timeout: Duration,
    #[builder(default = Duration::from_millis(100))]
    min_retry_interval: Duration,
    #[builder(default = Duration::from_secs(2))]
    max_retry_interval: Duration,
    #[builder(default = 4096)]
    max_tokens: u16,
}

impl CallConfig {
    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoffBuilder::default()
            .with_initial_interval(self.min_retry_interval)
            .with_max_interval(self.max_retry_interval)
            .with_max_elapsed_time(Some(self.total_timeout))
            .build()
    }
}

/// Structured output obtained through a forced function call.
pub trait FunctionResponse: serde::de::DeserializeOwned {
    fn function_name() -> &'static str;
    fn function_description() -> &'static str;

    /// JSON schema of the function arguments
    fn function_definition() -> serde_json::Value;

    /// Undoes HTML entity escaping some models apply to plain text arguments.
    fn fix_escapes(&mut self);
}

fn forced_tool_request<T: FunctionResponse>(
    model: &str,
    max_tokens: u16,
    messages: Vec<ChatCompletionRequestMessage>,
) -> Result<CreateChatCompletionRequest, OpenAiError> {
    let name = T::function_name().to_owned();
    let tool = ChatCompletionTool {
        r#type: ChatCompletionToolType::Function,
        function: FunctionObject {
            name: name.clone(),
            description: Some(T::function_description().to_owned()),
            parameters: Some(T::function_definition()),
            strict: None,
        },
    };
    let choice = ChatCompletionToolChoiceOption::Named(ChatCompletionNamedToolChoice {
        r#type: ChatCompletionToolType::Function,
        function: FunctionName { name },
    });

    Ok(CreateChatCompletionRequestArgs::default()
        .model(model)
        .messages(messages)
        .max_tokens(max_tokens)
        .tools(vec![tool])
        .tool_choice(choice)
        .build()?)
}

/// Sends `messages` and makes the model answer by calling `T`'s function.
#[instrument(skip(llm_config, messages))]
pub async fn call_function<T: FunctionResponse>(
    llm_config: &LlmConfig,
    config: CallConfig,
    messages: Vec<ChatCompletionRequestMessage>,
) -> Result<T, OpenAiError> {
    let request = forced_tool_request::<T>(llm_config.get_generation_model(), config.max_tokens, messages)?;

    let http_client = reqwest::Client::builder()
        .timeout(config.iteration_timeout)
        .build()
        .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to build completion http client"))?;

    let client = Client::with_config(llm_config.get_generation_openai_config())
        .with_http_client(http_client)
        .with_backoff(config.backoff());

    tracing::debug!(function = T::function_name(), "requesting completion");
    let completion = client
        .chat()
        .create(request)
        .await
        .inspect_err(|error| tracing::warn!(error = error as &dyn Error, "completion request failed"))?;

    let call = forced_call(&completion)?;
    check_function_name::<T>(call)?;
    parse_arguments(&call.function.arguments)
}

fn forced_call(completion: &CreateChatCompletionResponse) -> Result<&ChatCompletionMessageToolCall, OpenAiError> {
    let choice = completion.choices.first().ok_or(OpenAiError::EmptyResponse)?;
    let call = choice
        .message
        .tool_calls
        .as_deref()
        .and_then(<[_]>::first)
        .ok_or(FunctionCallError::Missing)?;
    Ok(call)
}

fn check_function_name<T: FunctionResponse>(call: &ChatCompletionMessageToolCall) -> Result<(), FunctionCallError> {
    let expected = T::function_name();
    if call.function.name == expected {
        return Ok(());
    }
    tracing::warn!(expected, called = %call.function.name, "model called the wrong function");
    Err(FunctionCallError::WrongFunction {
        expected,
        called: call.function.name.clone(),
    })
}

fn parse_arguments<T: FunctionResponse>(arguments: &str) -> Result<T, OpenAiError> {
    let mut parsed: T = serde_json::from_str(arguments).map_err(|error| {
        tracing::warn!(error = &error as &dyn Error, arguments, "function arguments do not parse");
        FunctionCallError::InvalidSyntax
    })?;
    parsed.fix_escapes();
    Ok(parsed)
}
