//! Image URL resolution.

/// Image CDN base URL.
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Default size token when none is requested.
const DEFAULT_SIZE: &str = "original";

/// Resolves an image path to a fully-qualified CDN URL.
///
/// Pure, total function: an empty `image_id` degrades to the bare size URL
/// rather than failing. `size` falls back to `original` when `None`
/// (other common tokens: `w500`, `w300`).
#[must_use]
pub fn image_url(image_id: &str, size: Option<&str>) -> String {
    let size = size.unwrap_or(DEFAULT_SIZE);
    let path = image_id.trim_start_matches('/');
    format!("{IMAGE_BASE_URL}/{size}/{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_size_is_original() {
        // Arrange & Act
        let url = image_url("/abc123.jpg", None);

        // Assert
        assert_eq!(url, "https://image.tmdb.org/t/p/original/abc123.jpg");
    }

    #[test]
    fn test_explicit_size_token() {
        // Arrange & Act
        let url = image_url("/abc123.jpg", Some("w500"));

        // Assert
        assert_eq!(url, "https://image.tmdb.org/t/p/w500/abc123.jpg");
    }

    #[test]
    fn test_empty_id_degrades_to_passthrough() {
        // Arrange & Act
        let url = image_url("", None);

        // Assert
        assert_eq!(url, "https://image.tmdb.org/t/p/original/");
    }

    #[test]
    fn test_leading_slash_not_doubled() {
        // Arrange & Act
        let with_slash = image_url("/abc.jpg", Some("w300"));
        let without_slash = image_url("abc.jpg", Some("w300"));

        // Assert
        assert_eq!(with_slash, without_slash);
    }
}
