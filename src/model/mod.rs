//! Domain model types (pure).
//!
//! Plain data shared between the sheet core and the terminal host.

pub mod error;
pub mod key_action;
pub mod keyboard;
pub mod snap;

// Re-export for convenience
pub use error::AppError;
pub use key_action::KeyAction;
pub use keyboard::{KeyboardEventKind, KeyboardNotification, DID_PAIR_DURATION};
pub use snap::{SnapPoint, SnapTargets};
