pub mod config;
pub mod device;
pub mod errors;
pub mod lineup;
pub mod m3u;
pub mod models;
pub mod observability;
pub mod sources;
pub mod utils;
pub mod web;
