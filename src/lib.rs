pub mod backend;
pub mod configuration;
pub mod configuration_handler;
pub mod error;
pub mod file_storage;
pub mod http;
pub mod reservation_store;
pub mod session_storage;
pub mod slot_generator;
#[cfg(test)]
mod testutils;
pub mod types;
