pub mod catalog_usecases;
pub mod ports;
pub mod render;
