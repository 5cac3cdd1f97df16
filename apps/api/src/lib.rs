pub mod config;
pub mod db;
pub mod errors;
pub mod generation;
pub mod llm_client;
pub mod models;
pub mod profiles;
pub mod resources;
pub mod routes;
pub mod state;
