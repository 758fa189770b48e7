//! Presentation of operation outcomes to the editor plugin.

pub mod border;
pub mod report;
pub mod table;

pub use border::{Border, BorderStyle};
pub use report::present;
