//! Filesystem-facing components
//!
//! - `session`: explicit comparison context owning both roots and the options
//! - `workspace`: read access to one compared root

pub mod session;
pub mod workspace;
