//! # GitHub Issues API Client
//!
//! Provides typed access to the GitHub Issues REST API: issues, issue
//! comments, issue events, milestones, and labels. Every operation maps to a
//! single [`RequestDescriptor`] that the shared [`GitHubClient`] executes,
//! following `Link` headers for listings so callers always see the complete
//! result sequence.

pub mod auth;
pub mod client;
pub mod completion;
pub mod config;
pub mod consts;
pub mod endpoints;
pub mod error;
mod executor;
pub mod models;
pub mod pagination;
pub mod paths;
pub mod request;

// Re-export the client
pub use auth::{Credential, create_github_client_from_env, discover_credential};
pub use client::GitHubClient;
pub use completion::Completion;
pub use config::{ClientConfig, ConfigDirs, RetryPolicy};
// Re-export endpoint handlers and their parameters
pub use endpoints::comments::CommentBody;
pub use endpoints::issues::{IssueData, IssueListOptions, Issues};
pub use endpoints::labels::{LabelData, LabelListOptions};
pub use endpoints::milestones::{MilestoneData, MilestoneListOptions};
pub use error::ApiError;
// Re-export models
pub use models::{Issue, IssueComment, IssueEvent, Label, Milestone, User};
pub use pagination::Pages;
pub use paths::{ApiPath, RepoId, RepoIdError};
pub use request::RequestDescriptor;
