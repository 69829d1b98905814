//! Test utilities shared across the ghissue workspace
//!
//! This crate provides common testing infrastructure including:
//! - Throwaway `.netrc` files ([`NetrcGuard`])
//! - Throwaway configuration directories ([`ConfigDirGuard`])
//! - JSON payloads shaped like GitHub API responses ([`fixtures`])
//!
//! None of the guards touch the process environment; callers pass the
//! temporary paths to the code under test explicitly.

#![allow(dead_code)]

pub mod config;
pub mod fixtures;
pub mod netrc;

pub use config::ConfigDirGuard;
pub use netrc::NetrcGuard;
