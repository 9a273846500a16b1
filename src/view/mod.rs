//! View layer
//!
//! Presentation components. They render from state owned elsewhere and
//! report edits through callbacks or the action bus.

pub mod controls;
pub mod fields_panel;
pub mod sidebar;
pub mod snackbar;
pub mod theme;
