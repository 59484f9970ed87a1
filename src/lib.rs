pub mod error;
pub mod validation;
pub mod config;
pub mod model;
pub mod membership;
pub mod state;
pub mod api;
pub mod db;
pub mod ops;
pub mod queries;
pub mod cli;
