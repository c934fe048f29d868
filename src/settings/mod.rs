pub mod env;
pub mod enums;
pub mod errors;
pub mod loader;
pub mod models;

pub use errors::{ConfigError, ConfigurationError};
pub use loader::{load, load_from};
pub use models::settings::Settings;
