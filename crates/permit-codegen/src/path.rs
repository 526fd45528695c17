// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Persistent access paths.
//!
//! An [`AccessPath`] is the chain of field accesses from a root binding
//! (`request`, `resource` or a loop variable) to a target value. Paths are
//! immutable: [`AccessPath::append`] and [`AccessPath::rewrite_root`] return
//! new values sharing the existing prefix, so branch-local extension during a
//! depth-first search never copies or aliases.
//!
//! ```text
//! request ─► items (repeated) ─► meta (optional) ─► resource
//!    root      Segment{Repeated}   Segment{Optional}   Segment{Optional}
//! ```

use std::{fmt, sync::Arc};

use crate::schema::{FieldDef, FieldType};

/// How a segment reaches its field from the enclosing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hop {
    /// Plain field access.
    Field,

    /// Field with explicit presence (`Option<T>` in Rust).
    Optional,

    /// Each element of a repeated field.
    Repeated,

    /// Each value of a map field.
    Mapped
}

impl Hop {
    /// Check if the hop fans out over a collection.
    #[must_use]
    pub const fn crosses_collection(self) -> bool {
        matches!(self, Self::Repeated | Self::Mapped)
    }

    /// Check if the hop needs a nullability guard.
    #[must_use]
    pub const fn is_nullable(self) -> bool {
        matches!(self, Self::Optional)
    }
}

/// One field access of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    name: String,
    hop:  Hop,
    ty:   FieldType
}

impl Segment {
    /// Segment that passes through `field`: collections fan out to their
    /// elements, explicit-presence fields are guarded.
    #[must_use]
    pub fn traverse(field: &FieldDef) -> Self {
        let hop = match &field.ty {
            FieldType::List(_) => Hop::Repeated,
            FieldType::Map(..) => Hop::Mapped,
            FieldType::Single(_) if field.presence => Hop::Optional,
            FieldType::Single(_) => Hop::Field
        };
        Self::with_hop(field, hop)
    }

    /// Segment that reads `field` as a whole value, collections included.
    #[must_use]
    pub fn read(field: &FieldDef) -> Self {
        let hop = if field.presence && !field.ty.is_collection() {
            Hop::Optional
        } else {
            Hop::Field
        };
        Self::with_hop(field, hop)
    }

    fn with_hop(field: &FieldDef, hop: Hop) -> Self {
        Self {
            name: field.name.clone(),
            hop,
            ty: field.ty.clone()
        }
    }

    /// Field name as declared in the schema.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How the field is reached.
    #[must_use]
    pub const fn hop(&self) -> Hop {
        self.hop
    }

    /// Declared field type.
    #[must_use]
    pub const fn ty(&self) -> &FieldType {
        &self.ty
    }

    /// Type of the value produced by the hop: the element type when the hop
    /// fans out, the declared type otherwise.
    #[must_use]
    pub fn value_type(&self) -> FieldType {
        if self.hop.crosses_collection() {
            FieldType::Single(self.ty.value_kind().clone())
        } else {
            self.ty.clone()
        }
    }
}

#[derive(Debug)]
struct Node {
    segment: Segment,
    parent:  Option<Arc<Node>>
}

/// Immutable chain of segments below a root label.
///
/// # Example
///
/// ```rust
/// use permit_codegen::path::{AccessPath, Segment};
/// use permit_codegen::schema::{FieldDef, Scalar};
///
/// let request = AccessPath::root("request");
/// let id = request.append(Segment::traverse(&FieldDef::scalar("id", Scalar::String)));
///
/// assert_eq!(request.render(), "request");
/// assert_eq!(id.render(), "request.id");
/// assert_eq!(id.rewrite_root("v1").render(), "v1.id");
/// ```
#[derive(Clone)]
pub struct AccessPath {
    root: Arc<str>,
    tail: Option<Arc<Node>>,
    len:  usize
}

impl AccessPath {
    /// Path consisting of the root label only.
    #[must_use]
    pub fn root(label: &str) -> Self {
        Self {
            root: Arc::from(label),
            tail: None,
            len:  0
        }
    }

    /// New path with one more segment. The receiver is left untouched.
    #[must_use]
    pub fn append(&self, segment: Segment) -> Self {
        Self {
            root: Arc::clone(&self.root),
            tail: Some(Arc::new(Node {
                segment,
                parent: self.tail.clone()
            })),
            len:  self.len + 1
        }
    }

    /// Same segments below a different root label.
    #[must_use]
    pub fn rewrite_root(&self, label: &str) -> Self {
        Self {
            root: Arc::from(label),
            tail: self.tail.clone(),
            len:  self.len
        }
    }

    /// Root label.
    #[must_use]
    pub fn root_label(&self) -> &str {
        &self.root
    }

    /// Number of segments below the root.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if the path is the root alone.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.len == 0
    }

    /// Last segment.
    #[must_use]
    pub fn last(&self) -> Option<&Segment> {
        self.tail.as_deref().map(|node| &node.segment)
    }

    /// Segments from the root outwards.
    #[must_use]
    pub fn segments(&self) -> Vec<&Segment> {
        let mut segments = Vec::with_capacity(self.len);
        let mut node = self.tail.as_deref();
        while let Some(current) = node {
            segments.push(&current.segment);
            node = current.parent.as_deref();
        }
        segments.reverse();
        segments
    }

    /// Path of the segments following `index`, rooted at `label`.
    ///
    /// Used when the value at `index` is bound to a loop variable and the
    /// rest of the path continues from it.
    #[must_use]
    pub fn after(&self, index: usize, label: &str) -> Self {
        self.segments()
            .into_iter()
            .skip(index + 1)
            .fold(Self::root(label), |path, segment| path.append(segment.clone()))
    }

    /// Check if any segment fans out over a collection.
    #[must_use]
    pub fn crosses_collection(&self) -> bool {
        self.segments()
            .iter()
            .any(|segment| segment.hop().crosses_collection())
    }

    /// Number of segments fanning out over a collection.
    #[must_use]
    pub fn collection_depth(&self) -> usize {
        self.segments()
            .iter()
            .filter(|segment| segment.hop().crosses_collection())
            .count()
    }

    /// Kind of the value the path ends at, element kind for a fanned-out
    /// last segment. `None` for a root path.
    #[must_use]
    pub fn leaf_type(&self) -> Option<FieldType> {
        self.last().map(Segment::value_type)
    }

    /// Check if the leaf is a single value of an id kind.
    #[must_use]
    pub fn ends_at_id_kind(&self) -> bool {
        matches!(self.leaf_type(), Some(FieldType::Single(kind)) if kind.is_id())
    }

    /// Dotted textual form, e.g. `request.items.resource.id`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut rendered = self.root.to_string();
        for segment in self.segments() {
            rendered.push('.');
            rendered.push_str(segment.name());
        }
        rendered
    }
}

impl PartialEq for AccessPath {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.segments() == other.segments()
    }
}

impl Eq for AccessPath {}

impl fmt::Debug for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessPath").field(&self.render()).finish()
    }
}

impl fmt::Display for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
