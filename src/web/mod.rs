pub mod server;

pub use server::{routes, webhook_url, WebServer};
