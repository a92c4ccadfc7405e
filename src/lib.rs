pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod fixtures;
pub mod forms;
pub mod models;
pub mod state;
