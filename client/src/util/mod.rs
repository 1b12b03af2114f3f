//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` holds the redirect guard; `navigation` abstracts the router so the
//! guard is testable without a UI.

pub mod auth;
pub mod navigation;
