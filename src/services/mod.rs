pub mod migration_service;

pub use migration_service::*;
