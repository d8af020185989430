//! Element attributes, the class-name property and the inline style bag
//!
//! The `style` attribute is backed by the element's [`StyleDeclaration`]:
//! writing the attribute parses it, reading it serializes the declarations.

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::style::StyleDeclaration;
use crate::types::{Attribute, DomNode, NodeId};
use crate::utils;
use tracing::trace;

impl DomArena {
    /// HTML elements of an HTML document match attribute names case-insensitively
    fn attribute_name(&self, node: &DomNode, name: &str) -> String {
        if self.is_html() && node.is_html_element() {
            name.to_ascii_lowercase()
        } else {
            name.to_string()
        }
    }

    /// `element.getAttribute`
    pub fn get_attribute(&self, element: NodeId, name: &str) -> Result<Option<String>> {
        let node = self.element(element)?;
        let name = self.attribute_name(node, name);

        if name == "style" {
            return Ok(node.style.is_present().then(|| node.style.css_text()));
        }
        Ok(node.attr(&name).map(String::from))
    }

    /// `element.setAttribute`
    pub fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> Result<()> {
        if !utils::is_valid_name(name) {
            return Err(DomError::InvalidCharacter(name.to_string()));
        }
        let name = self.attribute_name(self.element(element)?, name);
        let node = self.element_mut(element)?;

        if name == "style" {
            node.style.set_css_text(value);
        } else {
            match node.attributes.iter_mut().find(|a| a.name == name) {
                Some(existing) => existing.value = value.to_string(),
                None => node.attributes.push(Attribute {
                    name: name.clone(),
                    value: value.to_string(),
                }),
            }
        }

        trace!(element = %element, name = %name, value, "set attribute");
        Ok(())
    }

    /// `element.removeAttribute`, returning the old value
    pub fn remove_attribute(&mut self, element: NodeId, name: &str) -> Result<Option<String>> {
        let name = self.attribute_name(self.element(element)?, name);
        let node = self.element_mut(element)?;

        if name == "style" {
            let old = node.style.is_present().then(|| node.style.css_text());
            node.style.clear();
            return Ok(old);
        }

        let old = node
            .attributes
            .iter()
            .position(|a| a.name == name)
            .map(|pos| node.attributes.remove(pos).value);
        Ok(old)
    }

    pub fn has_attribute(&self, element: NodeId, name: &str) -> Result<bool> {
        Ok(self.get_attribute(element, name)?.is_some())
    }

    /// `element.className`: the `class` attribute, empty when unset
    pub fn class_name(&self, element: NodeId) -> Result<String> {
        Ok(self.get_attribute(element, "class")?.unwrap_or_default())
    }

    /// `element.className = value`
    pub fn set_class_name(&mut self, element: NodeId, value: &str) -> Result<()> {
        self.set_attribute(element, "class", value)
    }

    /// `element.style`
    pub fn style(&self, element: NodeId) -> Result<&StyleDeclaration> {
        Ok(&self.element(element)?.style)
    }

    /// `element.style`, for writing properties
    pub fn style_mut(&mut self, element: NodeId) -> Result<&mut StyleDeclaration> {
        Ok(&mut self.element_mut(element)?.style)
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::{ArenaConfig, DomArena};
    use crate::error::DomError;

    #[test]
    fn test_get_set_attribute() {
        let mut arena = DomArena::new();
        let div = arena.create_element("div").unwrap();

        assert_eq!(arena.get_attribute(div, "title").unwrap(), None);
        arena.set_attribute(div, "title", "hello").unwrap();
        arena.set_attribute(div, "TITLE", "again").unwrap();

        assert_eq!(arena.get_attribute(div, "title").unwrap().as_deref(), Some("again"));
        assert_eq!(arena.get(div).unwrap().attributes().len(), 1);
    }

    #[test]
    fn test_case_sensitive_outside_html() {
        let mut arena = DomArena::with_config(ArenaConfig {
            html: false,
            ..ArenaConfig::default()
        });
        let el = arena.create_element("Item").unwrap();
        arena.set_attribute(el, "Key", "1").unwrap();

        assert_eq!(arena.get(el).unwrap().node_name, "Item");
        assert_eq!(arena.get_attribute(el, "key").unwrap(), None);
        assert_eq!(arena.get_attribute(el, "Key").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_class_name_property() {
        let mut arena = DomArena::new();
        let div = arena.create_element("div").unwrap();

        assert_eq!(arena.class_name(div).unwrap(), "");
        arena.set_class_name(div, "a b").unwrap();
        assert_eq!(arena.get_attribute(div, "class").unwrap().as_deref(), Some("a b"));
        assert_eq!(arena.get(div).unwrap().class_list().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_style_attribute_sync() {
        let mut arena = DomArena::new();
        let div = arena.create_element("div").unwrap();

        assert_eq!(arena.get_attribute(div, "style").unwrap(), None);
        arena.style_mut(div).unwrap().set_property("marginTop", "4px");
        assert_eq!(
            arena.get_attribute(div, "style").unwrap().as_deref(),
            Some("margin-top: 4px;")
        );

        arena.set_attribute(div, "style", "color: red").unwrap();
        assert_eq!(arena.style(div).unwrap().get_property("color"), Some("red"));
        assert_eq!(arena.style(div).unwrap().get_property("margin-top"), None);

        assert_eq!(
            arena.remove_attribute(div, "style").unwrap().as_deref(),
            Some("color: red;")
        );
        assert!(!arena.has_attribute(div, "style").unwrap());
    }

    #[test]
    fn test_attributes_on_text_node() {
        let mut arena = DomArena::new();
        let text = arena.create_text_node("hi");

        assert!(matches!(
            arena.set_attribute(text, "id", "x"),
            Err(DomError::InvalidNodeType { .. })
        ));
    }

    #[test]
    fn test_invalid_attribute_name() {
        let mut arena = DomArena::new();
        let div = arena.create_element("div").unwrap();

        assert!(matches!(
            arena.set_attribute(div, "a b", "x"),
            Err(DomError::InvalidCharacter(_))
        ));
    }
}
