use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key}: required key is not set")]
    MissingKey { key: String },

    #[error("{key}: {message}")]
    InvalidType { key: String, message: String },

    #[error("{key}: unrecognized value \"{value}\", expected one of: {expected}")]
    InvalidEnumValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("{key}: {message}")]
    CrossFieldConstraintViolation { key: String, message: String },

    #[error("{key}: placeholder value must be replaced outside development")]
    PlaceholderSecretDetected { key: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationError {
    pub errors: Vec<ConfigError>,
}

impl ConfigurationError {
    pub fn new(errors: Vec<ConfigError>) -> Self {
        Self { errors }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid configuration ({} violations)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigurationError {}
