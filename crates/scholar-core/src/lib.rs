pub mod generate;
pub mod llm_config;
pub mod openai;
pub mod overview;
pub mod quiz;
pub mod status;
