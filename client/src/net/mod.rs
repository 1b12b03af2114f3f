//! Networking modules for the generation proxy.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles the REST call; wire types come from the shared `envelope`
//! crate.

pub mod api;
