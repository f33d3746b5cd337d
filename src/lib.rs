pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod forms;
pub mod logging;
pub mod modal;
pub mod models;
pub mod notify;
pub mod session;
pub mod stores;

pub use config::Config;
pub use error::{AdminError, AdminResult};
pub use session::AdminSession;
