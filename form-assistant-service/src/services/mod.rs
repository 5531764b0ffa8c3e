pub mod assistant;
pub mod form_schema;
pub mod jwt;
pub mod metrics;
pub mod providers;

pub use assistant::FormAssistant;
pub use jwt::{TokenClaims, TokenValidator};
