//! Shared test utilities for the gitws workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`] — git repository fixtures
//! - [`home`] — [`home::TestHome`], a throwaway home directory

pub mod git;
pub mod home;
