// Completion service abstraction

pub mod provider;
pub mod google;

pub use provider::*;
pub use google::GeminiClient;
