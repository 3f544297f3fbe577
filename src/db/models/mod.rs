// Sub-modules organized by aggregate
pub mod activity_log;
pub mod api;
pub mod assignment;
pub mod auth;
pub mod comment;
pub mod document;
pub mod duty;
pub mod entity_ref;
pub mod milestone;
pub mod notification;
pub mod person;
pub mod project;
pub mod team;
pub mod timeline;

// Re-export so callers can write `use crate::db::models::Project`

// API response structures
pub use api::*;

// Authentication and user models
pub use auth::*;

// People and teams
pub use assignment::*;
pub use person::*;
pub use team::*;

// Projects and their children
pub use document::*;
pub use duty::*;
pub use milestone::*;
pub use project::*;
pub use timeline::*;

// Polymorphic audit tables
pub use activity_log::*;
pub use comment::*;
pub use entity_ref::*;
pub use notification::*;
