//! Presentation helpers for user profiles.

pub mod gravatar;

pub use gravatar::{escape_html, gravatar_for, gravatar_url, GravatarOptions, Rating};
