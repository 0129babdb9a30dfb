//! Well-known operation claim names.

/// Grants every operation; checked before request-specific roles.
pub const ADMIN: &str = "Admin";

/// Default role for authenticated users.
pub const USER: &str = "User";

/// Moderation operations.
pub const MODERATOR: &str = "Moderator";
