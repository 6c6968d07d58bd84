pub mod all;
mod command_result;
pub mod init;
pub mod routes;
pub mod scan;
pub mod sitemap;

pub use command_result::*;
