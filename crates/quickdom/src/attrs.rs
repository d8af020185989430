//! Attribute and inline style setters

use crate::error::{Error, Result};
use crate::{require_node, Document};
use qd_dom::NodeId;
use serde_json::{Number, Value};
use tracing::debug;

/// Read or write one attribute.
///
/// With `value == None` this is a read: the current value, or `None` when
/// the attribute is unset. With a value it is a write and returns `None`.
/// `className` writes the class-name property; every other name goes
/// through the generic attribute setter.
pub fn attr(
    doc: &mut Document,
    elem: impl Into<Option<NodeId>>,
    name: &str,
    value: Option<&str>,
) -> Result<Option<String>> {
    if name.is_empty() {
        return Err(Error::MissingAttribute("No attribute provided to attr"));
    }
    let elem = require_node(doc, elem.into(), "No element provided to attr")?;

    let value = match value {
        None => return Ok(doc.get_attribute(elem, name)?),
        Some(value) => value,
    };

    if name == "className" {
        doc.set_class_name(elem, value)?;
    } else {
        doc.set_attribute(elem, name, value)?;
    }
    Ok(None)
}

/// Apply a mapping of style properties to the element's inline style.
///
/// Property names may be camelCase or CSS form. A `null` entry clears that
/// property. A non-object mapping is ignored.
pub fn css(doc: &mut Document, elem: impl Into<Option<NodeId>>, styles: &Value) -> Result<()> {
    if styles.is_null() {
        return Err(Error::MissingAttribute("No attributes provided to css"));
    }
    let elem = require_node(doc, elem.into(), "No element provided to css")?;

    let Some(map) = styles.as_object() else {
        debug!(element = %elem, "css called with a non-object mapping, ignoring");
        return Ok(());
    };

    let style = doc.style_mut(elem)?;
    for (property, value) in map {
        match value {
            Value::Null => style.set_property(property, ""),
            other => match stringify(other) {
                Some(text) => style.set_property(property, &text),
                None => debug!(property = %property, "skipping non-scalar style value"),
            },
        }
    }
    Ok(())
}

/// Attribute text for a loosely typed value, as a host would stringify it.
/// `null` and objects have no attribute form.
pub(crate) fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Object(_) => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(number_text(n)),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| stringify(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
    }
}

/// Integral floats print without a fraction (`10.0` → `10`, `-0.0` → `0`)
fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}
