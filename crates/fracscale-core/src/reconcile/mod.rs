pub mod errors;
mod handler;
pub mod types;

pub use errors::{StateError, ToggleError};
pub use handler::{PrimaryOutput, Reconciler, locate_primary};
pub use types::{DisplayStatus, ToggleOptions, ToggleOutcome};
