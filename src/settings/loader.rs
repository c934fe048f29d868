use std::collections::BTreeMap;

use serde::Deserialize;

use crate::settings::{
    enums::{app_env::AppEnv, cache_config::CacheConfig, database_config::DatabaseConfig},
    env::Env,
    errors::{ConfigError, ConfigurationError},
    models::{email_config::EmailConfig, secret::Secret, settings::Settings},
};

pub const DEFAULT_SMTP_PORT: u16 = 587;

const POSTGRES_URL_VAR: &str = "${POSTGRES_URL}";

#[derive(Debug, Deserialize)]
struct RawEnv {
    environment: Option<String>,
    jwt_secret: Option<String>,
    fernet_key: Option<String>,
    openai_api_key: Option<String>,
    db_engine: Option<String>,
    postgres_url: Option<String>,
    sqlite_url: Option<String>,
    redis_url: Option<String>,
    memory_mode: Option<String>,
    email_from: Option<String>,
    email_password: Option<String>,
    smtp_server: Option<String>,
    smtp_port: Option<String>,
    allowed_origins: Option<String>,
    alembic_database_url: Option<String>,
}

impl RawEnv {
    // Dotenv files ship `KEY=` lines; a blank value is the same as unset.
    fn normalized(mut self) -> Self {
        for value in [
            &mut self.environment,
            &mut self.jwt_secret,
            &mut self.fernet_key,
            &mut self.openai_api_key,
            &mut self.db_engine,
            &mut self.postgres_url,
            &mut self.sqlite_url,
            &mut self.redis_url,
            &mut self.memory_mode,
            &mut self.email_from,
            &mut self.email_password,
            &mut self.smtp_server,
            &mut self.smtp_port,
            &mut self.allowed_origins,
            &mut self.alembic_database_url,
        ] {
            if let Some(s) = value {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    *value = None;
                } else if trimmed.len() != s.len() {
                    *s = trimmed.to_string();
                }
            }
        }
        self
    }
}

pub fn load() -> Result<Settings, ConfigurationError> {
    load_from(snapshot())
}

pub fn load_from<I>(vars: I) -> Result<Settings, ConfigurationError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let raw: RawEnv = match envy::from_iter(vars) {
        Ok(raw) => raw,
        Err(e) => {
            return Err(ConfigurationError::new(vec![ConfigError::InvalidType {
                key: "environment snapshot".to_string(),
                message: e.to_string(),
            }]))
        }
    };

    validate(raw.normalized())
}

// Process env wins; dotenv files only fill in keys that are not already set.
fn snapshot() -> BTreeMap<String, String> {
    let mut vars: BTreeMap<String, String> = std::env::vars().collect();

    let app_env = vars
        .get(Env::ENVIRONMENT)
        .cloned()
        .unwrap_or("development".to_string());

    for filename in [format!(".env.{}", app_env), ".env".to_string()] {
        if let Ok(iter) = dotenvy::from_filename_iter(&filename) {
            for (key, value) in iter.flatten() {
                vars.entry(key).or_insert(value);
            }
        }
    }

    vars
}

fn validate(raw: RawEnv) -> Result<Settings, ConfigurationError> {
    let mut errors: Vec<ConfigError> = Vec::new();

    let environment = match &raw.environment {
        Some(value) => match AppEnv::from_value(value) {
            Some(environment) => Some(environment),
            None => {
                errors.push(ConfigError::InvalidEnumValue {
                    key: Env::ENVIRONMENT.to_string(),
                    value: value.clone(),
                    expected: "development, staging, production",
                });
                None
            }
        },
        None => {
            errors.push(ConfigError::MissingKey {
                key: Env::ENVIRONMENT.to_string(),
            });
            None
        }
    };

    // Placeholders from the template are tolerated only in development.
    let strict_secrets = environment.map_or(true, |environment| !environment.is_development());

    let jwt_secret = required_secret(
        Env::JWT_SECRET,
        raw.jwt_secret.clone(),
        strict_secrets,
        &mut errors,
    );
    let fernet_key = required_secret(
        Env::FERNET_KEY,
        raw.fernet_key.clone(),
        strict_secrets,
        &mut errors,
    );
    let openai_api_key = optional_secret(
        Env::OPENAI_API_KEY,
        raw.openai_api_key.clone(),
        strict_secrets,
        &mut errors,
    );

    let database = match &raw.db_engine {
        Some(engine) => match engine.as_str() {
            "postgres" => match raw.postgres_url.clone() {
                Some(url) => Some(DatabaseConfig::Postgres { url }),
                None => {
                    errors.push(ConfigError::CrossFieldConstraintViolation {
                        key: Env::POSTGRES_URL.to_string(),
                        message: "required when DB_ENGINE=postgres".to_string(),
                    });
                    None
                }
            },
            "sqlite" => match raw.sqlite_url.clone() {
                Some(url) => Some(DatabaseConfig::Sqlite { url }),
                None => {
                    errors.push(ConfigError::CrossFieldConstraintViolation {
                        key: Env::SQLITE_URL.to_string(),
                        message: "required when DB_ENGINE=sqlite".to_string(),
                    });
                    None
                }
            },
            other => {
                errors.push(ConfigError::InvalidEnumValue {
                    key: Env::DB_ENGINE.to_string(),
                    value: other.to_string(),
                    expected: "postgres, sqlite",
                });
                None
            }
        },
        None => {
            errors.push(ConfigError::MissingKey {
                key: Env::DB_ENGINE.to_string(),
            });
            None
        }
    };

    let cache = match &raw.memory_mode {
        Some(mode) => match mode.as_str() {
            "redis" => match raw.redis_url.clone() {
                Some(url) => Some(CacheConfig::Redis { url }),
                None => {
                    errors.push(ConfigError::CrossFieldConstraintViolation {
                        key: Env::REDIS_URL.to_string(),
                        message: "required when MEMORY_MODE=redis".to_string(),
                    });
                    None
                }
            },
            "in-process" => Some(CacheConfig::InProcess),
            other => {
                errors.push(ConfigError::InvalidEnumValue {
                    key: Env::MEMORY_MODE.to_string(),
                    value: other.to_string(),
                    expected: "redis, in-process",
                });
                None
            }
        },
        None => {
            errors.push(ConfigError::MissingKey {
                key: Env::MEMORY_MODE.to_string(),
            });
            None
        }
    };

    let email = validate_email_config(&raw, strict_secrets, &mut errors);
    let allowed_origins = validate_allowed_origins(&raw, &mut errors);

    let alembic_database_url = match raw.alembic_database_url.clone() {
        Some(value) => {
            if value.contains(POSTGRES_URL_VAR) {
                match &raw.postgres_url {
                    Some(url) => Some(value.replace(POSTGRES_URL_VAR, url)),
                    None => {
                        errors.push(ConfigError::CrossFieldConstraintViolation {
                            key: Env::ALEMBIC_DATABASE_URL.to_string(),
                            message: "references ${POSTGRES_URL}, which is not set".to_string(),
                        });
                        None
                    }
                }
            } else {
                Some(value)
            }
        }
        None => raw.postgres_url.clone(),
    };

    let settings = match (
        environment,
        jwt_secret,
        fernet_key,
        database,
        cache,
        allowed_origins,
    ) {
        (
            Some(environment),
            Some(jwt_secret),
            Some(fernet_key),
            Some(database),
            Some(cache),
            Some(allowed_origins),
        ) if errors.is_empty() => Settings {
            environment,
            jwt_secret,
            fernet_key,
            openai_api_key,
            database,
            cache,
            email,
            allowed_origins,
            alembic_database_url,
        },
        _ => return Err(ConfigurationError::new(errors)),
    };

    tracing::debug!(
        environment = %settings.environment.value(),
        database = %settings.database.engine(),
        cache = %settings.cache.mode(),
        "settings loaded"
    );

    Ok(settings)
}

// Email features are enabled by presence: setting any email key makes the
// required ones mandatory.
fn validate_email_config(
    raw: &RawEnv,
    strict_secrets: bool,
    errors: &mut Vec<ConfigError>,
) -> Option<EmailConfig> {
    let enabled = raw.email_from.is_some()
        || raw.email_password.is_some()
        || raw.smtp_server.is_some()
        || raw.smtp_port.is_some();
    if !enabled {
        return None;
    }

    let from = match raw.email_from.clone() {
        Some(from) => {
            if validator::validate_email(from.as_str()) {
                Some(from)
            } else {
                errors.push(ConfigError::InvalidType {
                    key: Env::EMAIL_FROM.to_string(),
                    message: "must be a well-formed email address".to_string(),
                });
                None
            }
        }
        None => {
            errors.push(ConfigError::MissingKey {
                key: Env::EMAIL_FROM.to_string(),
            });
            None
        }
    };

    let password = required_secret(
        Env::EMAIL_PASSWORD,
        raw.email_password.clone(),
        strict_secrets,
        errors,
    );

    let smtp_server = match raw.smtp_server.clone() {
        Some(server) => Some(server),
        None => {
            errors.push(ConfigError::MissingKey {
                key: Env::SMTP_SERVER.to_string(),
            });
            None
        }
    };

    let smtp_port = match &raw.smtp_port {
        Some(value) => match value.parse::<u16>() {
            Ok(port) if port >= 1 => Some(port),
            _ => {
                errors.push(ConfigError::InvalidType {
                    key: Env::SMTP_PORT.to_string(),
                    message: "must be an integer between 1 and 65535".to_string(),
                });
                None
            }
        },
        None => Some(DEFAULT_SMTP_PORT),
    };

    match (from, password, smtp_server, smtp_port) {
        (Some(from), Some(password), Some(smtp_server), Some(smtp_port)) => Some(EmailConfig {
            from,
            password,
            smtp_server,
            smtp_port,
        }),
        _ => None,
    }
}

fn validate_allowed_origins(raw: &RawEnv, errors: &mut Vec<ConfigError>) -> Option<Vec<String>> {
    let value = match &raw.allowed_origins {
        Some(value) => value,
        None => {
            errors.push(ConfigError::MissingKey {
                key: Env::ALLOWED_ORIGINS.to_string(),
            });
            return None;
        }
    };

    let mut origins: Vec<String> = Vec::new();
    let mut invalid = false;
    for origin in value.split(',').map(str::trim) {
        if origin.is_empty() {
            continue;
        }
        if !is_well_formed_origin(origin) {
            errors.push(ConfigError::InvalidType {
                key: Env::ALLOWED_ORIGINS.to_string(),
                message: format!("\"{}\" is not a well-formed origin", origin),
            });
            invalid = true;
        } else if !origins.iter().any(|o| o == origin) {
            origins.push(origin.to_string());
        }
    }

    if origins.is_empty() {
        if !invalid {
            errors.push(ConfigError::InvalidType {
                key: Env::ALLOWED_ORIGINS.to_string(),
                message: "must contain at least one origin".to_string(),
            });
        }
        return None;
    }

    Some(origins)
}

// An origin is scheme://host[:port], no path.
fn is_well_formed_origin(origin: &str) -> bool {
    let rest = match origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"))
    {
        Some(rest) => rest,
        None => return false,
    };

    !rest.is_empty() && !rest.contains('/') && !rest.contains(' ')
}

fn required_secret(
    key: &'static str,
    value: Option<String>,
    strict_secrets: bool,
    errors: &mut Vec<ConfigError>,
) -> Option<Secret> {
    match value {
        Some(value) => {
            if strict_secrets && value == placeholder_for(key) {
                errors.push(ConfigError::PlaceholderSecretDetected {
                    key: key.to_string(),
                });
                None
            } else {
                Some(Secret::new(value))
            }
        }
        None => {
            errors.push(ConfigError::MissingKey {
                key: key.to_string(),
            });
            None
        }
    }
}

fn optional_secret(
    key: &'static str,
    value: Option<String>,
    strict_secrets: bool,
    errors: &mut Vec<ConfigError>,
) -> Option<Secret> {
    match value {
        Some(value) => {
            if strict_secrets && value == placeholder_for(key) {
                errors.push(ConfigError::PlaceholderSecretDetected {
                    key: key.to_string(),
                });
                None
            } else {
                Some(Secret::new(value))
            }
        }
        None => None,
    }
}

// JWT_SECRET -> your_jwt_secret, matching the shipped .env.example values.
fn placeholder_for(key: &str) -> String {
    format!("your_{}", key.to_ascii_lowercase())
}
