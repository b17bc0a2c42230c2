//! Database models and queries

pub mod achievements;
pub mod contacts;
pub mod init;
pub mod models;
pub mod profile;
pub mod projects;
pub mod settings;
pub mod skills;
pub mod users;

pub use init::*;
pub use models::*;

/// Fresh row id (UUID v4, hyphenated)
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
