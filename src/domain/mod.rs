pub mod category;
pub use category::*;

pub mod record;
pub use record::{Record, Records, DEFAULT_SUBJECT_PLACEHOLDER};

pub mod view;
pub use view::*;
