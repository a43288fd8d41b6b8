pub mod compose;
pub mod constants;
pub mod layout;
mod options;
mod plan;
mod select;
mod types;

pub use compose::{CollageReport, compose, plan_files};
pub use options::*;
pub use plan::plan_layout;
pub use select::*;
pub use types::*;
