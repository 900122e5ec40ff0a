pub mod error;
pub mod profile;
pub mod store;
