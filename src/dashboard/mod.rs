//! Dashboard pipeline
//!
//! load → global range → selection → date filter → summary. Each user
//! interaction runs one full pass; nothing here holds state between passes
//! except the loader cache and the selection itself.

pub mod error;
pub mod filter;
pub mod pass;
pub mod presenter;
pub mod range;
pub mod selection;

pub use pass::{DashboardPass, run_pass};
pub use selection::{DateSelection, PickerField};
