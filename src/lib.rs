pub mod backend;
pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;
pub mod views;
