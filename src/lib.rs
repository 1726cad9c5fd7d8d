pub mod auth;
pub mod backend;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod scheduling;
pub mod templates_structs;
pub mod upload;
pub mod validate;
pub mod wizard;
