pub mod app;
pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod errors;
pub mod graphql;
pub mod models;
pub mod session;
pub mod views;

#[cfg(feature = "console")]
pub mod console;

pub use app::{App, Intent, Outcome, Screen};
pub use client::QuizClient;
pub use config::ClientConfig;
pub use errors::{ClientError, ClientResult};
pub use session::Session;
