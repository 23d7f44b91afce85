pub mod config;
pub mod db;
pub mod errors;
pub mod files;
pub mod llm_client;
pub mod models;
pub mod profile;
pub mod qa;
pub mod render;
pub mod resume;
pub mod routes;
pub mod search;
pub mod state;
pub mod telemetry;
