//! Constants for the ghissue client

/// Base URL for the official SaaS GitHub API
pub const API_BASE_URL: &str = "https://api.github.com";

/// User-Agent header value for the GitHub API client
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Accept header value for the GitHub API
pub const ACCEPT: &str = "application/vnd.github.v3+json";

/// Environment variables checked, in order, for a personal access token
pub const ENV_TOKEN_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Environment variable overriding the configured API base URL
pub const ENV_API_URL: &str = "GHISSUE_API_URL";

/// Environment variable overriding the configured default repository
pub const ENV_REPO: &str = "GHISSUE_REPO";

/// `.netrc` machine names searched for basic credentials, in order
pub const NETRC_MACHINES: [&str; 2] = ["api.github.com", "github.com"];
