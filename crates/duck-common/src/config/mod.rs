//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    LeaderboardConfig, NotifierConfig, RateLimitConfig, ServerConfig,
};
