//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod footer;
pub mod header;
pub mod metrics;
pub mod notices;
pub mod sidebar;
