use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error(transparent)]
    Api(#[from] async_openai::error::OpenAIError),

    #[error(transparent)]
    FunctionCall(#[from] FunctionCallError),

    #[error("completion contained no choices")]
    EmptyResponse,

    #[error("could not build the completion http client")]
    HttpClientBuild(#[from] reqwest::Error),
}

/// The model answered, but not with the forced function call.
#[derive(Error, Debug)]
pub enum FunctionCallError {
    #[error("model called {called} instead of {expected}")]
    WrongFunction { expected: &'static str, called: String },

    #[error("function arguments do not match the schema")]
    InvalidSyntax,

    #[error("completion has no function call")]
    Missing,
}
