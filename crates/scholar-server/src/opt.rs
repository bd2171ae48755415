use std::net::IpAddr;

use clap::{Args, Parser, Subcommand};
use scholar_utils::args::llm::LlmServices;
use scholar_utils::tracing::LogFormat;
use url::Url;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "scholar", about = "Study companion backend")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Serve the HTTP API
    Run(Run),
    /// Recompute the note and quiz counters of subjects from their children
    Reconcile(Reconcile),
}

#[derive(Debug, Clone, Args)]
pub(crate) struct Db {
    #[arg(long, env = "DATABASE_URL", help = "sqlite:// or postgres:// url")]
    pub(crate) database_url: Url,

    #[arg(long, help = "Min connections")]
    pub(crate) db_min_connections: Option<u32>,

    #[arg(long, help = "Max connections")]
    pub(crate) db_max_connections: Option<u32>,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct Auth {
    #[arg(long, env = "OIDC_ISSUER_URL")]
    pub(crate) oidc_issuer_url: Url,

    #[arg(long = "aud", value_delimiter = ',', required = true)]
    pub(crate) audience: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub(crate) origins: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct Logging {
    #[arg(long = "sentry-dsn", env = "SENTRY_DSN", help = "Sentry url")]
    pub(crate) sentry_dsn: Option<String>,

    #[arg(long, default_value = "dev", help = "Set the environment used by sentry and prometheus")]
    pub(crate) env: String,

    #[arg(long, default_value_t = LogFormat::Full)]
    pub(crate) log_format: LogFormat,
}

#[derive(Debug, Clone, Parser)]
pub(crate) struct Run {
    #[arg(long)]
    pub(crate) host: Option<IpAddr>,

    #[arg(short, long)]
    pub(crate) port: Option<u16>,

    #[command(flatten)]
    pub(crate) auth: Auth,

    #[command(flatten)]
    pub(crate) llm_services: LlmServices,

    #[command(flatten)]
    pub(crate) db: Db,

    #[command(flatten)]
    pub(crate) logging: Logging,
}

#[derive(Debug, Clone, Parser)]
pub(crate) struct Reconcile {
    #[command(flatten)]
    pub(crate) db: Db,

    #[command(flatten)]
    pub(crate) logging: Logging,

    #[arg(long, help = "Only reconcile this subject")]
    pub(crate) subject: Option<Uuid>,
}
