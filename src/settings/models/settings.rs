use crate::settings::{
    enums::{app_env::AppEnv, cache_config::CacheConfig, database_config::DatabaseConfig},
    models::{email_config::EmailConfig, secret::Secret},
};

// Built once at bootstrap and passed to consumers; nothing re-reads the
// process environment after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub environment: AppEnv,
    pub jwt_secret: Secret,
    pub fernet_key: Secret,
    pub openai_api_key: Option<Secret>,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub email: Option<EmailConfig>,
    pub allowed_origins: Vec<String>,
    pub alembic_database_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secrets() {
        let settings = Settings {
            environment: AppEnv::Production,
            jwt_secret: Secret::new("jwt-secret-value"),
            fernet_key: Secret::new("fernet-key-value"),
            openai_api_key: Some(Secret::new("sk-openai-value")),
            database: DatabaseConfig::Postgres {
                url: "postgresql://localhost/hyphaeos".to_string(),
            },
            cache: CacheConfig::InProcess,
            email: Some(EmailConfig {
                from: "noreply@hyphaeos.dev".to_string(),
                password: Secret::new("mail-password"),
                smtp_server: "smtp.hyphaeos.dev".to_string(),
                smtp_port: 587,
            }),
            allowed_origins: vec!["http://localhost:3000".to_string()],
            alembic_database_url: None,
        };

        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("jwt-secret-value"));
        assert!(!rendered.contains("fernet-key-value"));
        assert!(!rendered.contains("sk-openai-value"));
        assert!(!rendered.contains("mail-password"));
    }
}
