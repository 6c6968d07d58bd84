//! Downstream artifacts rendered from the canonical registry.
//!
//! - `route_module`: React Router module for routes not yet wired
//! - `sitemap`: per-category XML sitemaps plus an index

pub mod route_module;
pub mod sitemap;

pub use route_module::{RouteModule, RouteModuleOptions, new_routes, render_route_module};
pub use sitemap::{SitemapDocument, SitemapSet, SitemapUrl, generate_sitemaps};
