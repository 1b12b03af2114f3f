//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration; layout and styling live in the
//! UI shell.

pub mod image_generator;

/// Sign-in screen; the only route reachable while signed out.
pub const LOGIN_ROUTE: &str = "/login";
/// Default route for signed-in users.
pub const HOME_ROUTE: &str = "/";
pub const IMAGE_GENERATOR_ROUTE: &str = "/image-generator";
