//! ID prefixes and identifier sanity checks.
//!
//! Identifiers are opaque: any non-empty token is accepted except the
//! placeholder forms that leak out of unexpanded URL templates
//! (`/applications/{uuid}`, `/applications/<id>`, `undefined` from a client
//! that lost its state). Those are rejected before the store is touched.

use crate::errors::CoreError;

pub const PREFIX_APPLICATION: &str = "app";
pub const PREFIX_UNIVERSITY: &str = "uni";

/// Literal tokens that are never real identifiers.
pub const PLACEHOLDER_TOKENS: &[&str] = &["undefined", "null", "{uuid}", "{id}", "[id]", ":id"];

/// Leading characters of template parameters that were never substituted.
const TEMPLATE_OPENERS: &[char] = &['<', '{', '[', ':'];

/// Validate an identifier before dispatching it to the store.
///
/// # Errors
///
/// Returns `CoreError::InvalidIdentifier` if `id` is empty, a placeholder
/// token, starts like a template parameter, or contains whitespace or `/`.
pub fn validate_id(id: &str) -> Result<&str, CoreError> {
    let invalid = id.is_empty()
        || PLACEHOLDER_TOKENS.contains(&id)
        || id.starts_with(TEMPLATE_OPENERS)
        || id.chars().any(|c| c.is_whitespace() || c == '/');

    if invalid {
        return Err(CoreError::InvalidIdentifier(id.to_string()));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("undefined")]
    #[case("null")]
    #[case("{uuid}")]
    #[case("<id>")]
    #[case("<uuid>")]
    #[case("{id}")]
    #[case("[id]")]
    #[case(":id")]
    #[case("app 1")]
    #[case("app/1")]
    fn rejects_placeholders_and_malformed(#[case] id: &str) {
        assert!(matches!(
            validate_id(id),
            Err(CoreError::InvalidIdentifier(_))
        ));
    }

    #[rstest]
    #[case("app-3f9a0c1e7b2d4a66")]
    #[case("9b2f6c9e-3c55-4d6b-9a3e-0f1e2d3c4b5a")]
    #[case("42")]
    fn accepts_opaque_tokens(#[case] id: &str) {
        assert_eq!(validate_id(id).unwrap(), id);
    }
}
