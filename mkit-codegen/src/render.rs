//! Placeholder substitution for blueprints.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unresolved placeholder '{{{{{0}}}}}' in blueprint")]
    Unresolved(String),
}

/// Substitute `{{name}}` placeholders in a blueprint.
///
/// Every placeholder in the blueprint must be covered by a binding; a
/// leftover `{{` after substitution is fatal.
pub fn expand(blueprint: &str, bindings: &[(&str, &str)]) -> Result<String, TemplateError> {
    let mut out = blueprint.to_string();
    for (name, value) in bindings {
        out = out.replace(&format!("{{{{{name}}}}}"), value);
    }

    if let Some(start) = out.find("{{") {
        let rest = &out[start + 2..];
        let name = rest
            .split("}}")
            .next()
            .unwrap_or(rest)
            .chars()
            .take_while(|c| !c.is_whitespace())
            .collect::<String>();
        return Err(TemplateError::Unresolved(name));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_substitutes_all_occurrences() {
        let out = expand("{{a}} and {{a}} and {{b}}", &[("a", "x"), ("b", "y")]).unwrap();
        assert_eq!(out, "x and x and y");
    }

    #[test]
    fn test_expand_without_placeholders_is_identity() {
        let out = expand("plain text", &[("a", "x")]).unwrap();
        assert_eq!(out, "plain text");
    }

    #[test]
    fn test_unresolved_placeholder_is_fatal() {
        let err = expand("hello {{who}}", &[("a", "x")]).unwrap_err();
        assert_eq!(err, TemplateError::Unresolved("who".to_string()));
    }
}
