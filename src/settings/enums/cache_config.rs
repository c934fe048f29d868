#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheConfig {
    Redis { url: String },
    InProcess,
}

impl CacheConfig {
    pub fn mode(&self) -> String {
        match *self {
            Self::Redis { .. } => "redis".to_string(),
            Self::InProcess => "in-process".to_string(),
        }
    }

    pub fn redis_url(&self) -> Option<&str> {
        match self {
            Self::Redis { url } => Some(url),
            Self::InProcess => None,
        }
    }
}
