//! Live DOM document for QuickDOM
//!
//! An arena-backed document tree exposing the host primitives a DOM
//! convenience layer needs: element and text creation (with namespaces),
//! attributes, the class-name property, the inline style bag, id/class/tag
//! queries returning live collections, and tree mutation.
//!
//! ## Core Design
//!
//! ```text
//! DomArena: Vec<DomNode>  ← NodeId (u32) handles
//!     ├─ tree.rs        append_child / insert_before / remove_child
//!     ├─ attributes.rs  get/set attribute, className, style
//!     ├─ query.rs       by id / class / tag → LiveCollection
//!     └─ serializer.rs  markup + JSON snapshot ↔ loader.rs
//! ```

pub mod arena;
pub mod attributes;
pub mod error;
pub mod loader;
pub mod query;
pub mod serializer;
pub mod style;
pub mod tree;
pub mod types;
pub mod utils;

pub use arena::{ArenaConfig, DomArena};
pub use error::{DomError, Result};
pub use query::{CollectionFilter, LiveCollection};
pub use serializer::{DomSerializer, SerializerConfig};
pub use style::StyleDeclaration;
pub use types::*;
