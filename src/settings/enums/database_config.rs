#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    Postgres { url: String },
    Sqlite { url: String },
}

impl DatabaseConfig {
    pub fn engine(&self) -> String {
        match *self {
            Self::Postgres { .. } => "postgres".to_string(),
            Self::Sqlite { .. } => "sqlite".to_string(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Postgres { url } => url,
            Self::Sqlite { url } => url,
        }
    }
}
