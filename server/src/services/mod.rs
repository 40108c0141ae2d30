//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own store access, retry and document conversion so route
//! handlers can stay focused on protocol translation.

pub mod document;
pub mod readiness;
pub mod viewer;
