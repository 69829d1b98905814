//! # GitHub API Endpoints
//!
//! Endpoint handlers for the issue tracker. [`issues::Issues`] is scoped to
//! one repository; its operations are split across files by resource
//! (issues, comments, events, milestones, labels), each one building a
//! [`crate::RequestDescriptor`] and handing it to the client.

pub mod comments;
pub mod events;
pub mod issues;
pub mod labels;
pub mod milestones;
pub mod users;
