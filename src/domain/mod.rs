mod item;
mod money;
mod order;
mod report;
mod user;

pub use item::*;
pub use money::*;
pub use order::*;
pub use report::*;
pub use user::*;
