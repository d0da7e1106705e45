//! UseCase layer.
//!
//! Business operations invoked by the UI layer; each usecase works against
//! the domain layer's repository trait.

pub mod broadcast_time;
pub mod confirm_secret;
pub mod deregister_session;
pub mod error;
pub mod register_session;

pub use broadcast_time::BroadcastTimeUseCase;
pub use confirm_secret::ConfirmSecretUseCase;
pub use deregister_session::DeregisterSessionUseCase;
pub use error::{ConfirmError, DeregisterError, RegisterError};
pub use register_session::RegisterSessionUseCase;
