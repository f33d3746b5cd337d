//! Per-resource state holders.
//!
//! Each store is a plain struct owned by the session; all mutation goes
//! through `&mut self` methods, so there is exactly one writer per store.

pub mod changelog;
pub mod feedback;
pub mod resource;

pub use changelog::ChangelogStore;
pub use feedback::FeedbackStore;
pub use resource::ResourceStore;
