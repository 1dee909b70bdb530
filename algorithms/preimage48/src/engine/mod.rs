//! Search Engine
//!
//! Birthday tables, trial budgets and parallel search dispatch.

pub mod parallel;
pub mod search;
pub mod table;

pub use parallel::available_workers;
