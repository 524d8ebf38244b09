pub mod app;
pub mod config;
pub mod engine;
pub mod event;
pub mod generator;
pub mod logging;
pub mod mode;
pub mod session;
pub mod ui;
