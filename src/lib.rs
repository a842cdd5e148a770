//! ClickLens - a URL shortener with per-click analytics
//!
//! This library provides the core functionality for the ClickLens service:
//! short link storage, the redirect-and-capture path, and click aggregation.
//!
//! # Architecture
//! - `analytics`: Click event capture, buffering and flush to storage
//! - `api`: HTTP services (shorten, redirect, analytics)
//! - `config`: Configuration management
//! - `services`: Business logic shared by HTTP handlers and tests
//! - `storage`: SeaORM storage backend and data access
//! - `system`: Logging and process-level utilities

pub mod analytics;
pub mod api;
pub mod config;
pub mod errors;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
