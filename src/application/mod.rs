// Application layer - use cases and orchestration.
// Validation and date assignment live here; the repository persists
// whatever it is handed.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
