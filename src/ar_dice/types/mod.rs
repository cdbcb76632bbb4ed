//! Type definitions for the AR dice demo
//!
//! This module is organized into submodules:
//! - `die` - Die component, die template, and roll commands
//! - `plane` - Components for detected plane anchors and their visuals
//! - `registry` - Ordered registry of placed dice
//! - `session` - Interaction state and user actions
//! - `settings` - Application settings and persistence
//! - `ui` - UI and camera marker components

pub mod die;
pub mod plane;
pub mod registry;
pub mod session;
pub mod settings;
pub mod ui;

// Re-export all public types for convenient access
pub use die::*;
pub use plane::*;
pub use registry::*;
pub use session::*;
pub use settings::*;
pub use ui::*;
