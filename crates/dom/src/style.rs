//! Inline style property bag
//!
//! Mirrors an element's `style` object: declarations keep insertion order,
//! property names are stored in CSS form (`background-color`) and the
//! `style` attribute is the serialized declaration block.

use crate::utils::style_property_name;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDeclaration {
    declarations: Vec<(String, String)>,
    /// Set once the `style` attribute exists, even if it is now empty
    present: bool,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a property by CSS or camelCase name
    pub fn get_property(&self, name: &str) -> Option<&str> {
        let name = style_property_name(name);
        self.declarations
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a property; an empty value removes it, as the host style bag does
    pub fn set_property(&mut self, name: &str, value: &str) {
        let name = style_property_name(name);
        if name.is_empty() {
            return;
        }
        self.present = true;

        let value = value.trim();
        if value.is_empty() {
            self.remove_property(&name);
            return;
        }

        match self.declarations.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.declarations.push((name, value.to_string())),
        }
    }

    /// Remove a property, returning its old value
    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        let name = style_property_name(name);
        let pos = self.declarations.iter().position(|(k, _)| *k == name)?;
        Some(self.declarations.remove(pos).1)
    }

    /// Serialized form, e.g. `color: red; margin-top: 4px;`
    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(k, v)| format!("{}: {};", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Replace every declaration by parsing a declaration block
    pub fn set_css_text(&mut self, text: &str) {
        self.declarations.clear();
        self.present = true;

        for declaration in split_declarations(text) {
            if let Some((name, value)) = declaration.split_once(':') {
                self.set_property(name.trim(), value);
            }
        }
    }

    /// Whether the element carries a `style` attribute at all
    pub fn is_present(&self) -> bool {
        self.present
    }

    pub(crate) fn clear(&mut self) {
        self.declarations.clear();
        self.present = false;
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Split a declaration block on `;`, ignoring semicolons inside
/// parentheses or quoted strings (`url(data:image/png;base64,...)`)
fn split_declarations(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
