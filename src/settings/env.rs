pub struct Env;

impl Env {
    pub const ENVIRONMENT: &'static str = "ENVIRONMENT";

    pub const JWT_SECRET: &'static str = "JWT_SECRET";
    pub const FERNET_KEY: &'static str = "FERNET_KEY";

    pub const OPENAI_API_KEY: &'static str = "OPENAI_API_KEY";

    pub const DB_ENGINE: &'static str = "DB_ENGINE";
    pub const POSTGRES_URL: &'static str = "POSTGRES_URL";
    pub const SQLITE_URL: &'static str = "SQLITE_URL";

    pub const REDIS_URL: &'static str = "REDIS_URL";
    pub const MEMORY_MODE: &'static str = "MEMORY_MODE";

    pub const EMAIL_FROM: &'static str = "EMAIL_FROM";
    pub const EMAIL_PASSWORD: &'static str = "EMAIL_PASSWORD";
    pub const SMTP_SERVER: &'static str = "SMTP_SERVER";
    pub const SMTP_PORT: &'static str = "SMTP_PORT";

    pub const ALLOWED_ORIGINS: &'static str = "ALLOWED_ORIGINS";

    pub const ALEMBIC_DATABASE_URL: &'static str = "ALEMBIC_DATABASE_URL";
}
