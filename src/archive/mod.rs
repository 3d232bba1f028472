pub mod archive;
pub mod entry;

pub use self::archive::*;
pub use self::entry::*;
