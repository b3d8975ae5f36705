//! Small helpers shared by the commands.
//!
//! - [`paths`]: tilde expansion and printable entry paths
//! - [`thread_pool`]: the rayon pool used to walk several roots at once

/// Path manipulation and rendering
pub mod paths;
/// Thread pool configuration for parallel walks
pub mod thread_pool;

pub use paths::{display_entry, expand_tilde};
