// Application layer - use cases over the data-access facade.

pub mod error;
pub mod order_service;
pub mod ports;
pub mod report_service;

#[cfg(test)]
pub(crate) mod testing;

pub use error::*;
pub use order_service::*;
pub use ports::*;
pub use report_service::*;
