//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where the
//!   entity is editable

pub mod banner;
pub mod content;
pub mod default_image;
pub mod gallery;
pub mod outbound_email;
pub mod site;
pub mod tag;
pub mod user;
pub mod version;
