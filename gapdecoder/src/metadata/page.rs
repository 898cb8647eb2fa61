//! Asset page scraping.

use std::sync::OnceLock;

use percent_encoding::percent_decode_str;
use regex::bytes::Regex;
use url::Url;

use super::MetadataError;

/// Tokens embedded in an asset page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTokens {
    /// Scheme-less image base URL, e.g. `//lh3.googleusercontent.com/<path>`
    pub base_url: String,
    /// Image path token on the tile server
    pub path_token: String,
    /// Per-image signing token, empty when the page carries none
    pub auth_token: String,
}

impl PageTokens {
    /// URL of the image pyramid description.
    pub fn pyramid_url(&self) -> String {
        format!("https:{}=g", self.base_url)
    }
}

/// `]` newline `,"//host/<path>",` then the quoted auth token or `null`.
fn token_pattern() -> Result<&'static Regex, MetadataError> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r#"\]\n,"(//[^"/]+/([^"/]+))",(?:"([^"]+)"|null)"#))
        .as_ref()
        .map_err(|e| MetadataError::Pattern(e.to_string()))
}

/// Finds the image base URL and tokens in raw page source.
pub fn extract_tokens(page_source: &[u8]) -> Result<PageTokens, MetadataError> {
    let captures = token_pattern()?
        .captures(page_source)
        .ok_or(MetadataError::TokenNotFound)?;

    let text = |i: usize| -> Result<String, MetadataError> {
        captures
            .get(i)
            .map(|m| {
                std::str::from_utf8(m.as_bytes())
                    .map(str::to_owned)
                    .map_err(|_| MetadataError::TokenNotFound)
            })
            .unwrap_or_else(|| Ok(String::new()))
    };

    Ok(PageTokens {
        base_url: text(1)?,
        path_token: text(2)?,
        auth_token: text(3)?,
    })
}

/// Builds a human readable image name from an asset page URL.
///
/// Uses the last two path segments (`…/<slug>/<id>`): the slug's words are
/// capitalised and joined with the id, e.g. `The Starry Night - bgEuwDxel93-Pg`.
pub fn image_name_from_url(page_url: &str) -> Result<String, MetadataError> {
    let invalid = |reason: &str| MetadataError::InvalidUrl {
        url: page_url.to_string(),
        reason: reason.to_string(),
    };

    let parsed = Url::parse(page_url).map_err(|e| invalid(&e.to_string()))?;
    let plus_decoded = parsed.path().replace('+', " ");
    let path = percent_decode_str(&plus_decoded)
        .decode_utf8()
        .map_err(|e| invalid(&e.to_string()))?;

    let mut segments = path.trim_end_matches('/').rsplit('/');
    let (Some(id), Some(slug)) = (segments.next(), segments.next()) else {
        return Err(invalid("expected a path ending in /<name>/<id>"));
    };
    if id.is_empty() || slug.is_empty() {
        return Err(invalid("expected a path ending in /<name>/<id>"));
    }

    Ok(format!("{} - {}", capitalize_words(&slug.replace('-', " ")), id))
}

fn capitalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_pattern_compiles() {
        assert!(token_pattern().is_ok());
    }

    const PAGE: &[u8] = b"<script>window.INIT_data=[[1,2]\n,\"//lh3.googleusercontent.com/wGcDNN8L-2COcm9toX5BTp6HPxpMPPPuxrMU-ZL-W-nDHW8I_L4R5vlBJ6ITtlmONQ\",\"KwCgJ1QIfgprHn0a93x7Q-HhJ04\",null]</script>";

    #[test]
    fn test_extract_tokens() {
        let tokens = extract_tokens(PAGE).unwrap();
        assert_eq!(
            tokens.path_token,
            "wGcDNN8L-2COcm9toX5BTp6HPxpMPPPuxrMU-ZL-W-nDHW8I_L4R5vlBJ6ITtlmONQ"
        );
        assert_eq!(tokens.auth_token, "KwCgJ1QIfgprHn0a93x7Q-HhJ04");
        assert_eq!(
            tokens.pyramid_url(),
            "https://lh3.googleusercontent.com/wGcDNN8L-2COcm9toX5BTp6HPxpMPPPuxrMU-ZL-W-nDHW8I_L4R5vlBJ6ITtlmONQ=g"
        );
    }

    #[test]
    fn test_extract_tokens_without_auth_token() {
        let page = b"x]\n,\"//lh5.example.com/abc\",null,1";
        let tokens = extract_tokens(page).unwrap();
        assert_eq!(tokens.base_url, "//lh5.example.com/abc");
        assert_eq!(tokens.path_token, "abc");
        assert_eq!(tokens.auth_token, "");
    }

    #[test]
    fn test_extract_tokens_missing() {
        assert!(matches!(
            extract_tokens(b"<html>nothing here</html>"),
            Err(MetadataError::TokenNotFound)
        ));
    }

    #[test]
    fn test_image_name() {
        assert_eq!(
            image_name_from_url("https://artsandculture.google.com/asset/the-starry-night/bgEuwDxel93-Pg")
                .unwrap(),
            "The Starry Night - bgEuwDxel93-Pg"
        );
    }

    #[test]
    fn test_image_name_decodes_and_trims() {
        assert_eq!(
            image_name_from_url("https://artsandculture.google.com/asset/caf%C3%A9+TERRACE-at-night/XYZ/?hl=en")
                .unwrap(),
            "Café Terrace At Night - XYZ"
        );
    }

    #[test]
    fn test_image_name_rejects_short_paths() {
        assert!(matches!(
            image_name_from_url("https://example.com/"),
            Err(MetadataError::InvalidUrl { .. })
        ));
        assert!(image_name_from_url("not a url").is_err());
    }
}
