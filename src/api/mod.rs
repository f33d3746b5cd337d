pub mod cards;
pub mod changelog;
pub mod client;
pub mod content;
pub mod feedback;
pub mod resource;

pub use client::ApiClient;
pub use resource::{item_path, ListQuery, Resource};
