pub mod advice;
pub mod ai;
pub mod config;
pub mod error;
pub mod inventory;
pub mod provider;
pub mod state;

// Re-export main types for convenience
pub use advice::AdviceCoordinator;
pub use ai::GeminiClient;
pub use config::Config;
pub use error::AiError;
pub use inventory::Inventory;
pub use provider::{CompletionProvider, CompletionRequest};
pub use state::AdviceState;
