pub mod analytics;
pub mod redirect;
pub mod shorten;

pub use analytics::analytics_routes;
pub use redirect::{RedirectService, redirect_routes};
pub use shorten::{ShortenService, api_routes};
