pub mod datetime;
pub mod error;

pub use datetime::*;
pub use error::*;
