// Services layer - Business logic and orchestration
pub mod auth_service;
pub mod crypto;
pub mod record_mirror;
pub mod token_service;
pub mod totp;
pub mod validation;

pub use auth_service::{AuthService, LoginOutcome};
pub use crypto::PasswordService;
pub use record_mirror::{MirrorWrite, RecordMirror};
pub use token_service::TokenService;
pub use totp::TotpService;
