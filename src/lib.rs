//! Music search with locally persisted favorites.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod favorites;
pub mod storage;
