//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod dashboard;
pub mod manage_users;
pub mod sign_in;
pub mod sign_up;

// Re-exports
pub use config::AuthConfig;
pub use dashboard::DashboardUseCase;
pub use manage_users::{ManageUsersUseCase, UpdateUserInput};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
