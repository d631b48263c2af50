//! Application service layer - config, manifest export, capture sessions

pub mod app;
pub mod config;
pub mod repository;
