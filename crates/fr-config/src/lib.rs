pub mod check;
pub mod logging;
pub mod validate;
pub mod validation;

pub use check::CheckConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use validation::ValidationConfig;
