//! Inline `style="..."` declaration splitting.

use std::collections::HashMap;

/// Property → value mapping of one inline style attribute.
pub type Declarations = HashMap<String, String>;

/// Split an inline style into declarations.
///
/// Segments are separated by `;`, property and value by the first `:`; both
/// sides are trimmed. Empty segments are ignored and a segment without a colon
/// is skipped. A repeated property keeps its last value.
pub fn parse_declarations(raw: Option<&str>) -> Declarations {
    let mut declarations = Declarations::new();
    let Some(raw) = raw else {
        return declarations;
    };

    for segment in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        match split_declaration(segment) {
            Some((property, value)) => {
                declarations.insert(property, value);
            }
            None => log::debug!("skipping malformed CSS declaration {:?}", segment),
        }
    }

    declarations
}

fn split_declaration(segment: &str) -> Option<(String, String)> {
    let (property, value) = segment.split_once(':')?;
    Some((property.trim().to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declarations() {
        let decl = parse_declarations(Some(
            "border: 1px solid black; text-align: center; font-weight: bold",
        ));
        assert_eq!(decl.len(), 3);
        assert_eq!(decl["border"], "1px solid black");
        assert_eq!(decl["text-align"], "center");
        assert_eq!(decl["font-weight"], "bold");
    }

    #[test]
    fn test_parse_empty_and_missing() {
        assert!(parse_declarations(Some("")).is_empty());
        assert!(parse_declarations(None).is_empty());
        assert!(parse_declarations(Some(" ; ;")).is_empty());
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let decl = parse_declarations(Some("background: url(http://x/y.png)"));
        assert_eq!(decl["background"], "url(http://x/y.png)");
    }

    #[test]
    fn test_trailing_semicolon_and_whitespace() {
        let decl = parse_declarations(Some("  text-align :  right ;  "));
        assert_eq!(decl.len(), 1);
        assert_eq!(decl["text-align"], "right");
    }

    #[test]
    fn test_malformed_segment_is_skipped() {
        let decl = parse_declarations(Some("bogus; font-weight: bold"));
        assert_eq!(decl.len(), 1);
        assert_eq!(decl["font-weight"], "bold");
    }

    #[test]
    fn test_repeated_property_last_wins() {
        let decl = parse_declarations(Some("text-align: left; text-align: right"));
        assert_eq!(decl["text-align"], "right");
    }
}
