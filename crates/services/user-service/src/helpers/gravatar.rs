//! Gravatar avatars for user profiles.
//!
//! Gravatar serves an image for the SHA-256 digest of a normalized email
//! address; nothing is fetched here, only the image reference is built.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::form_urlencoded;

use domain::{normalize_email, User, AVATAR_CSS_CLASS, DEFAULT_AVATAR_SIZE};

const GRAVATAR_BASE_URL: &str = "https://secure.gravatar.com/avatar/";

/// Highest audience rating an avatar may carry to be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    G,
    Pg,
    R,
    X,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Rating::G => "g",
            Rating::Pg => "pg",
            Rating::R => "r",
            Rating::X => "x",
        };
        f.write_str(value)
    }
}

/// Display options for a rendered avatar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GravatarOptions {
    /// Edge length in pixels
    pub size: u32,
    /// Fallback image (URL or Gravatar keyword such as `identicon`)
    pub default_image: Option<String>,
    pub rating: Option<Rating>,
}

impl GravatarOptions {
    pub fn with_size(size: u32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }
}

impl Default for GravatarOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_AVATAR_SIZE,
            default_image: None,
            rating: None,
        }
    }
}

/// Image URL for `email`. Case variants of one address share a URL.
pub fn gravatar_url(email: &str, options: &GravatarOptions) -> String {
    let digest = hex::encode(Sha256::digest(normalize_email(email).as_bytes()));

    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("s", &options.size.to_string());
    if let Some(default_image) = &options.default_image {
        query.append_pair("d", default_image);
    }
    if let Some(rating) = options.rating {
        query.append_pair("r", &rating.to_string());
    }

    format!("{}{}?{}", GRAVATAR_BASE_URL, digest, query.finish())
}

/// `<img>` tag showing the avatar of `user`, with the escaped user name as
/// alt text.
pub fn gravatar_for(user: &User, options: &GravatarOptions) -> String {
    let src = gravatar_url(&user.email, options);
    format!(
        r#"<img alt="{}" class="{}" height="{size}" src="{}" width="{size}" />"#,
        escape_html(&user.name),
        AVATAR_CSS_CLASS,
        escape_html(&src),
        size = options.size,
    )
}

/// Escape characters that are significant in HTML text and attributes.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Password;
    use uuid::Uuid;

    fn user(name: &str, email: &str) -> User {
        User::new(
            Uuid::new_v4(),
            name.to_string(),
            email.to_string(),
            Password::new("foobar").unwrap(),
        )
    }

    #[test]
    fn default_size_is_fifty() {
        assert_eq!(GravatarOptions::default().size, 50);
    }

    #[test]
    fn url_is_keyed_by_lower_cased_email() {
        let options = GravatarOptions::default();
        let lower = gravatar_url("user@example.com", &options);

        assert_eq!(lower, gravatar_url("USER@Example.COM", &options));
        assert_eq!(
            lower,
            "https://secure.gravatar.com/avatar/\
             b4c9a289323b21a01c3e940f150eb9b8c542587f1abfd8f0e1cc1ffc5e475514?s=50"
        );
    }

    #[test]
    fn url_carries_optional_parameters() {
        let options = GravatarOptions {
            size: 80,
            default_image: Some("https://example.com/a b.png".to_string()),
            rating: Some(Rating::Pg),
        };
        let url = gravatar_url("user@example.com", &options);

        assert!(url.ends_with("?s=80&d=https%3A%2F%2Fexample.com%2Fa+b.png&r=pg"));
    }

    #[test]
    fn image_tag_escapes_alt_text() {
        let tag = gravatar_for(
            &user("<b>Tom & \"Jerry\"</b>", "user@example.com"),
            &GravatarOptions::default(),
        );

        assert!(tag.contains(r#"alt="&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;""#));
        assert!(!tag.contains("<b>"));
    }

    #[test]
    fn image_tag_has_class_and_source() {
        let options = GravatarOptions::with_size(30);
        let user = user("Example User", "user@example.com");
        let tag = gravatar_for(&user, &options);

        assert!(tag.starts_with("<img "));
        assert!(tag.contains(r#"class="gravatar""#));
        assert!(tag.contains(r#"width="30""#));
        assert!(tag.contains(&format!(r#"src="{}""#, gravatar_url(&user.email, &options))));
    }

    #[test]
    fn source_ampersands_are_escaped() {
        let options = GravatarOptions {
            rating: Some(Rating::G),
            ..GravatarOptions::default()
        };
        let tag = gravatar_for(&user("Example User", "user@example.com"), &options);

        assert!(tag.contains("?s=50&amp;r=g"));
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        assert_eq!(escape_html("Example User"), "Example User");
        assert_eq!(escape_html("O'Brien"), "O&#39;Brien");
    }
}
