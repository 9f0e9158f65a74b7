use clap::{ArgAction, Parser};

pub const SESSION_COOKIE: &str = "sms_session";
pub const SESSION_EXPIRED_TIME: i64 = 86400i64;

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env)]
    pub jwt_secret: String,

    #[clap(long, env, default_value_t = SESSION_EXPIRED_TIME)]
    pub session_ttl_seconds: i64,

    #[clap(long, env, default_value_t = false, action = ArgAction::Set)]
    pub cookie_secure: bool,

    #[clap(long, env, default_value_t = bcrypt::DEFAULT_COST)]
    pub bcrypt_cost: u32,

    #[clap(long, env)]
    pub admin_username: Option<String>,

    #[clap(long, env)]
    pub admin_password: Option<String>,

    #[clap(long, env, default_value_t = true, action = ArgAction::Set)]
    pub run_migrations: bool,

    #[clap(long, env, default_value_t = true, action = ArgAction::Set)]
    pub openapi_enabled: bool,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,
}

/// The part of [`Config`] request handlers need, shared through the router state.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub jwt_secret: String,
    pub session_ttl_seconds: i64,
    pub cookie_secure: bool,
    pub bcrypt_cost: u32,
    pub openapi_enabled: bool,
    pub cors_allowed_origins: String,
    pub app_env: String,
}

impl From<&Config> for AppSettings {
    fn from(config: &Config) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            session_ttl_seconds: config.session_ttl_seconds,
            cookie_secure: config.cookie_secure,
            bcrypt_cost: config.bcrypt_cost,
            openapi_enabled: config.openapi_enabled,
            cors_allowed_origins: config.cors_allowed_origins.clone(),
            app_env: config.app_env.clone(),
        }
    }
}
