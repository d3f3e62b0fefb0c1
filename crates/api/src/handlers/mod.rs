//! Request handlers.
//!
//! Each submodule provides async handler functions for one area of the
//! API. Handlers delegate to the repositories in `tunobase_db` and map
//! errors via [`AppError`](crate::error::AppError).

pub mod banners;
pub mod content;
pub mod galleries;
pub mod outbound_email;
pub mod tags;
pub mod tasks;
pub mod versions;
