#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Staging,
    Production,
}

impl AppEnv {
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "development" => Some(Self::Development),
            "staging" => Some(Self::Staging),
            "production" => Some(Self::Production),
            _ => None,
        }
    }

    pub fn value(&self) -> String {
        match *self {
            Self::Development => "development".to_string(),
            Self::Staging => "staging".to_string(),
            Self::Production => "production".to_string(),
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(*self, Self::Development)
    }
}
