pub mod aggregates;
pub mod api;
pub mod auth;
pub mod browser;
pub mod charts;
pub mod components;
pub mod config;
pub mod error;
pub mod format;
pub mod forms;
pub mod logging;
pub mod models;
pub mod notify;
pub mod view_model;
