pub mod category;
pub mod rule;
pub mod ruleset;

pub use self::category::*;
pub use self::rule::*;
pub use self::ruleset::*;
