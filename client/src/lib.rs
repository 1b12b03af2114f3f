//! Client-side core of the image generator app.
//!
//! SYSTEM CONTEXT
//! ==============
//! `state` owns the session lifecycle, `util::auth` decides which route a user
//! may see, `net` talks to the generation proxy, and `pages` holds screen
//! state driven by those pieces. Nothing here renders; a UI shell subscribes
//! to the state and forwards user input.

pub mod net;
pub mod pages;
pub mod state;
pub mod util;
