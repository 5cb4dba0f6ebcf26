pub use campus_core::app::App;
pub use campus_types::error::{CaResult, Error};
pub use campus_types::types::Timestamp;

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
