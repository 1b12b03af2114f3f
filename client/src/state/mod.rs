//! Client state modules.
//!
//! DESIGN
//! ======
//! `auth` holds the session data model; `session` owns the provider that
//! publishes it. Screens read state through `watch` receivers and never
//! write it.

pub mod auth;
pub mod session;
