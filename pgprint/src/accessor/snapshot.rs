// Copyright (c) 2025 pgprint Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory process snapshot
//!
//! A [`Snapshot`] is a captured image of the backend objects reachable from a
//! few named symbols. It is stored as JSON:
//!
//! ```json
//! {
//!   "symbols": { "plan": 4096 },
//!   "objects": {
//!     "4096": { "struct": "SeqScan", "fields": { "type": { "enum": "T_SeqScan" } } }
//!   },
//!   "strings": { "8192": "id" },
//!   "arrays": { "12288": [0, 4096] }
//! }
//! ```

use super::traits::{LinkedCells, MemoryAccessor};
use super::types::{AccessError, AccessResult, FieldValue, Handle, TaggedNode};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One struct instance in the snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotObject {
    /// C struct name the object was captured as
    #[serde(rename = "struct")]
    pub type_name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

/// Captured image of the inspected process
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub symbols: BTreeMap<String, Handle>,
    #[serde(default)]
    pub objects: BTreeMap<Handle, SnapshotObject>,
    #[serde(default)]
    pub strings: BTreeMap<Handle, String>,
    #[serde(default)]
    pub arrays: BTreeMap<Handle, Vec<Handle>>,
}

impl Snapshot {
    /// Parse a snapshot from its JSON form
    pub fn from_json(json: &str) -> AccessResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot file
    pub fn load<P: AsRef<Path>>(path: P) -> AccessResult<Self> {
        let path = path.as_ref();
        debug!("Loading snapshot from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&json)?;
        debug!(
            "Snapshot has {} objects, {} symbols",
            snapshot.objects.len(),
            snapshot.symbols.len()
        );
        Ok(snapshot)
    }

    /// Serialize the snapshot as pretty-printed JSON
    pub fn to_json(&self) -> AccessResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up the object stored at `handle`
    pub fn object(&self, handle: Handle) -> Option<&SnapshotObject> {
        self.objects.get(&handle)
    }

    fn object_at(&self, handle: Handle) -> AccessResult<&SnapshotObject> {
        self.objects
            .get(&handle)
            .ok_or(AccessError::InvalidAddress(handle))
    }
}

impl MemoryAccessor for Snapshot {
    fn has_field(&self, handle: Handle, field: &str) -> bool {
        self.objects
            .get(&handle)
            .is_some_and(|object| object.fields.contains_key(field))
    }

    fn cast_to(&self, handle: Handle, type_name: &str) -> AccessResult<TaggedNode> {
        self.object_at(handle)?;
        Ok(TaggedNode::new(handle, type_name))
    }

    fn read_field(&self, node: &TaggedNode, field: &str) -> AccessResult<FieldValue> {
        let object = self.object_at(node.handle())?;
        let value = object
            .fields
            .get(field)
            .cloned()
            .ok_or_else(|| AccessError::MissingField {
                type_name: node.type_name().to_string(),
                field: field.to_string(),
            })?;
        trace!("{}->{} = {}", node.handle(), field, value);
        Ok(value)
    }

    fn dereference_string(&self, handle: Handle) -> AccessResult<Option<String>> {
        if handle.is_null() {
            return Ok(None);
        }
        self.strings
            .get(&handle)
            .cloned()
            .map(Some)
            .ok_or(AccessError::InvalidAddress(handle))
    }

    fn read_array_element(&self, array: Handle, index: usize) -> AccessResult<Handle> {
        let elements = self
            .arrays
            .get(&array)
            .ok_or(AccessError::InvalidAddress(array))?;
        elements
            .get(index)
            .copied()
            .ok_or(AccessError::IndexOutOfBounds { array, index })
    }

    fn evaluate(&self, expr: &str) -> AccessResult<Handle> {
        let expr = expr.trim();
        if expr == "NULL" {
            return Ok(Handle::NULL);
        }
        if let Some(handle) = Handle::parse_literal(expr) {
            return Ok(handle);
        }
        self.symbols
            .get(expr)
            .copied()
            .ok_or_else(|| AccessError::UnknownSymbol(expr.to_string()))
    }

    fn list_cells(
        &self,
        list: Handle,
    ) -> AccessResult<Box<dyn Iterator<Item = AccessResult<TaggedNode>> + '_>> {
        Ok(Box::new(LinkedCells::from_list(self, list)?))
    }
}

const BASE_ADDRESS: u64 = 0x1000;
const OBJECT_STRIDE: u64 = 0x40;

/// Incrementally assembles a [`Snapshot`], handing out fresh addresses
pub struct SnapshotBuilder {
    snapshot: Snapshot,
    next_address: u64,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self {
            snapshot: Snapshot::default(),
            next_address: BASE_ADDRESS,
        }
    }

    fn allocate(&mut self) -> Handle {
        let handle = Handle(self.next_address);
        self.next_address += OBJECT_STRIDE;
        handle
    }

    /// Add a plain struct (no node tag)
    pub fn object<'a, I>(&mut self, type_name: &str, fields: I) -> Handle
    where
        I: IntoIterator<Item = (&'a str, FieldValue)>,
    {
        let handle = self.allocate();
        let fields = fields
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        self.snapshot.objects.insert(
            handle,
            SnapshotObject {
                type_name: type_name.to_string(),
                fields,
            },
        );
        handle
    }

    /// Add a node: a struct whose `type` field holds the tag `tag`
    pub fn node<'a, I>(&mut self, type_name: &str, tag: &str, fields: I) -> Handle
    where
        I: IntoIterator<Item = (&'a str, FieldValue)>,
    {
        let tagged = std::iter::once(("type", FieldValue::label(tag))).chain(fields);
        self.object(type_name, tagged)
    }

    /// Add a NUL-terminated string
    pub fn string(&mut self, value: &str) -> Handle {
        let handle = self.allocate();
        self.snapshot.strings.insert(handle, value.to_string());
        handle
    }

    /// Add an array of pointers
    pub fn array<I: IntoIterator<Item = Handle>>(&mut self, elements: I) -> Handle {
        let handle = self.allocate();
        self.snapshot
            .arrays
            .insert(handle, elements.into_iter().collect());
        handle
    }

    /// Add a `T_IntList`; an empty list is `NIL`
    pub fn int_list(&mut self, values: &[i64]) -> Handle {
        let payload = values.iter().map(|v| FieldValue::Int(*v)).collect();
        self.list("T_IntList", "int_value", payload)
    }

    /// Add a `T_OidList`; an empty list is `NIL`
    pub fn oid_list(&mut self, values: &[i64]) -> Handle {
        let payload = values.iter().map(|v| FieldValue::Int(*v)).collect();
        self.list("T_OidList", "oid_value", payload)
    }

    /// Add a `T_List` of node pointers; an empty list is `NIL`
    pub fn node_list(&mut self, nodes: &[Handle]) -> Handle {
        let payload = nodes.iter().map(|h| FieldValue::Ptr(*h)).collect();
        self.list("T_List", "ptr_value", payload)
    }

    fn list(&mut self, tag: &str, payload_field: &str, values: Vec<FieldValue>) -> Handle {
        if values.is_empty() {
            return Handle::NULL;
        }

        let length = values.len() as i64;
        let mut next = Handle::NULL;
        let mut tail = Handle::NULL;
        for value in values.into_iter().rev() {
            next = self.object(
                "ListCell",
                [(payload_field, value), ("next", FieldValue::Ptr(next))],
            );
            if tail.is_null() {
                tail = next;
            }
        }

        self.node(
            "List",
            tag,
            [
                ("length", FieldValue::Int(length)),
                ("head", FieldValue::Ptr(next)),
                ("tail", FieldValue::Ptr(tail)),
            ],
        )
    }

    /// Bind a symbol name to a handle
    pub fn symbol(&mut self, name: &str, handle: Handle) -> &mut Self {
        self.snapshot.symbols.insert(name.to_string(), handle);
        self
    }

    pub fn build(self) -> Snapshot {
        self.snapshot
    }
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}
