pub mod action;
pub mod icon;
pub mod plugin;
pub mod query_output;
pub mod result_item;

pub use self::action::*;
pub use self::icon::*;
pub use self::plugin::*;
pub use self::query_output::*;
pub use self::result_item::*;
