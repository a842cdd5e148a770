//! Business logic services
//!
//! Thin service layer between HTTP handlers and the storage backend.

pub mod analytics_service;
pub mod link_service;

pub use analytics_service::{AnalyticsService, BrowserCount, LinkSummary};
pub use link_service::LinkService;
