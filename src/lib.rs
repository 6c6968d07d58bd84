//! Routegen - page route recovery and route/sitemap generation
//!
//! Routegen scans the page directory of a React application, recovers the URL
//! path each page declares, reconciles it with the routes the router already
//! mounts, and generates a route module for unwired pages plus XML sitemaps.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Route recovery, reconciliation and the registry format
//! - `generate`: Route module and sitemap rendering
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod generate;
pub mod utils;
