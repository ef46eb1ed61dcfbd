pub mod app;
pub mod config;
pub mod logging;
pub mod mvi;
pub mod store;
