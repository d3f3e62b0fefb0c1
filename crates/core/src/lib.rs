//! Domain types and pure rules for the tunobase content layer.
//!
//! Nothing in this crate touches the database or the network; the `db`,
//! `mailer`, and `api` crates build on it.

pub mod content;
pub mod error;
pub mod mail;
pub mod naming;
pub mod navigation;
pub mod pagination;
pub mod roles;
pub mod site;
pub mod state;
pub mod types;
pub mod visibility;
