pub mod app_env;
pub mod cache_config;
pub mod database_config;
