pub mod archive;
pub use archive::*;

pub mod domain;
pub use domain::*;

pub mod triage;
pub use triage::*;
