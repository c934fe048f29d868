pub mod email_config;
pub mod secret;
pub mod settings;
