// Infrastructure layer - Configuration and output adapters
pub mod config;
pub mod html_page;
pub mod http_response;
