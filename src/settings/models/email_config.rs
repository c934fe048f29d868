use crate::settings::models::secret::Secret;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub from: String,
    pub password: Secret,
    pub smtp_server: String,
    pub smtp_port: u16,
}
