pub mod errors;
pub mod models;
pub mod sanitize;
pub mod types;
