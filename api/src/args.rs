use clap::Parser;
use pantrychef_core::domain::common::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, LLMConfig, PantryChefConfig, SessionConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "pantrychef-api", version, about = "PantryChef HTTP API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub session: SessionArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LlmArgs {
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    #[arg(long = "gemini-base-url", env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,

    #[arg(long = "llm-timeout-secs", env = "LLM_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct SessionArgs {
    #[arg(
        long = "session-idle-ttl-secs",
        env = "SESSION_IDLE_TTL_SECS",
        default_value_t = 3600
    )]
    pub idle_ttl_secs: u64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl From<Args> for PantryChefConfig {
    fn from(args: Args) -> Self {
        PantryChefConfig {
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_base_url,
                request_timeout_secs: args.llm.timeout_secs,
            },
            session: SessionConfig {
                idle_ttl_secs: args.session.idle_ttl_secs,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["pantrychef-api", "--gemini-api-key", "secret"]);

        assert_eq!(args.server.port, 3333);
        assert_eq!(args.server.root_path, "");
        assert_eq!(args.llm.gemini_model, DEFAULT_GEMINI_MODEL);

        let config = PantryChefConfig::from(args);
        assert_eq!(config.llm.gemini_api_key, "secret");
        assert_eq!(config.llm.request_timeout_secs, 60);
        assert_eq!(config.session.idle_ttl_secs, 3600);
    }

    #[test]
    fn test_allowed_origins_are_comma_separated() {
        let args = Args::parse_from([
            "pantrychef-api",
            "--gemini-api-key",
            "secret",
            "--allowed-origins",
            "http://a.test,http://b.test",
        ]);

        assert_eq!(
            args.server.allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }
}
