//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own validation and upstream calls so route handlers can
//! stay focused on HTTP translation.

pub mod generate;
