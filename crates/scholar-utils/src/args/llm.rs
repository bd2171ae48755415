use clap::Args;

/// Credentials and model selection for the OpenAI compatible services used to draft content.
#[derive(Debug, Clone, Args)]
pub struct LlmServices {
    #[arg(long, env = "OPENAI_API_KEY", required = false)]
    pub openai_key: Option<String>,
    #[arg(long, required = false)]
    pub openai_default_model: Option<String>,
    #[arg(long, env = "GEMINI_API_KEY", required = false)]
    pub gemini_key: Option<String>,
    #[arg(long, required = false)]
    pub gemini_default_model: Option<String>,
    #[arg(long, required = false)]
    pub custom_key: Option<String>,
    #[arg(long, required = false)]
    pub custom_default_model: Option<String>,
    /// `openai`, `gemini` or the base url of another compatible service
    #[arg(long, required = false)]
    pub generation_service: Option<String>,
    #[arg(long, required = false)]
    pub generation_model: Option<String>,
}
