pub mod config;
pub mod logging;

pub mod artifacts;
pub mod classify;
pub mod crawl;
pub mod downloader;
pub mod error;
pub mod har;
pub mod harvest;
pub mod http;
pub mod page;
pub mod paths;
pub mod progress;
pub mod url_model;
