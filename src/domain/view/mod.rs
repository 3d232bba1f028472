pub mod formatter;
pub mod view;

pub use self::formatter::*;
pub use self::view::*;
