pub mod imc;
pub mod user;

pub use imc::*;
pub use user::*;
