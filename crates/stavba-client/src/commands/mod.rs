//! Command handlers invoked by the presentation layer.
//!
//! Each sub-module groups related commands by domain.  Commands take the
//! [`SharedState`](crate::state::SharedState), hold its lock for the whole
//! read-modify-write and return display-ready DTOs.

pub mod attendance;
pub mod auth;
pub mod calculators;
pub mod chat;
pub mod projects;
pub mod settings;
