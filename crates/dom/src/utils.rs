//! Utility functions for DOM processing

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::{NodeId, NodeType};

/// Cap text length for log previews, respecting char boundaries
pub fn cap_text_length(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

/// Concatenated data of every text node under `node_id`, in tree order
pub fn get_text_content(arena: &DomArena, node_id: NodeId) -> Result<String> {
    let mut text = String::new();

    arena.traverse_df(node_id, |node| {
        if node.node_type == NodeType::Text {
            text.push_str(&node.node_value);
        }
        Ok(())
    })?;

    Ok(text)
}

/// Split a class string into its tokens
pub fn split_class_tokens(classes: &str) -> Vec<&str> {
    classes.split_ascii_whitespace().collect()
}

/// Normalize a style property name to its CSS form
///
/// `backgroundColor` → `background-color`, `cssFloat` → `float`,
/// `WebkitTransform` → `-webkit-transform`, `msTransform` → `-ms-transform`.
/// Custom properties (`--x`) are kept verbatim.
pub fn style_property_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("--") {
        return name.to_string();
    }
    if name == "cssFloat" {
        return "float".to_string();
    }
    if name.contains('-') {
        return name.to_ascii_lowercase();
    }

    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    if out.starts_with("ms-") {
        out.insert(0, '-');
    }
    out
}

/// Element/attribute name check: non-empty, no whitespace or markup chars
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| !c.is_whitespace() && !matches!(c, '<' | '>' | '"' | '\'' | '/' | '='))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_text_length() {
        assert_eq!(cap_text_length("hello", 10), "hello");
        assert_eq!(cap_text_length("hello world", 5), "hello...");
        assert_eq!(cap_text_length("héllo", 2), "hé...");
    }

    #[test]
    fn test_style_property_name() {
        assert_eq!(style_property_name("color"), "color");
        assert_eq!(style_property_name("backgroundColor"), "background-color");
        assert_eq!(style_property_name("border-Top"), "border-top");
        assert_eq!(style_property_name("cssFloat"), "float");
        assert_eq!(style_property_name("WebkitTransform"), "-webkit-transform");
        assert_eq!(style_property_name("msTransform"), "-ms-transform");
        assert_eq!(style_property_name("--Accent"), "--Accent");
    }

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("div"));
        assert!(is_valid_name("svg:rect"));
        assert!(is_valid_name("data-x"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("1div"));
        assert!(!is_valid_name("a b"));
        assert!(!is_valid_name("<p>"));
    }

    #[test]
    fn test_split_class_tokens() {
        assert_eq!(split_class_tokens("  a b\tc "), vec!["a", "b", "c"]);
        assert!(split_class_tokens("   ").is_empty());
    }
}
