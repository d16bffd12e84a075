// Copyright (c) 2025 pgprint Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Memory accessor trait
//!
//! This module defines the capability interface the renderer needs from the
//! inspected process. Implementations only have to provide the primitive
//! reads; the typed helpers are built on top of [`MemoryAccessor::read_field`].

use super::types::{AccessError, AccessResult, FieldValue, Handle, TaggedNode};
use log::trace;

/// Read-only view into the memory of the inspected process
pub trait MemoryAccessor {
    /// Check whether a handle is the null pointer
    fn is_null(&self, handle: Handle) -> bool {
        handle.is_null()
    }

    /// Probe whether the object behind `handle` has a field named `field`.
    ///
    /// This never fails: unreadable memory simply reports `false`.
    fn has_field(&self, handle: Handle, field: &str) -> bool;

    /// Reinterpret `handle` as a pointer to the struct `type_name`
    fn cast_to(&self, handle: Handle, type_name: &str) -> AccessResult<TaggedNode>;

    /// Read one field of a struct
    fn read_field(&self, node: &TaggedNode, field: &str) -> AccessResult<FieldValue>;

    /// Read the NUL-terminated string at `handle`; `None` for a null pointer
    fn dereference_string(&self, handle: Handle) -> AccessResult<Option<String>>;

    /// Read element `index` of an array of pointers
    fn read_array_element(&self, array: Handle, index: usize) -> AccessResult<Handle>;

    /// Evaluate an expression (symbol name or address literal) to a handle
    fn evaluate(&self, expr: &str) -> AccessResult<Handle>;

    /// Iterate over the cells of the `List` at `list`, head first
    fn list_cells(
        &self,
        list: Handle,
    ) -> AccessResult<Box<dyn Iterator<Item = AccessResult<TaggedNode>> + '_>>;

    /// Read an integer field
    fn read_int(&self, node: &TaggedNode, field: &str) -> AccessResult<i64> {
        let value = self.read_field(node, field)?;
        value.as_int().ok_or_else(|| mismatch(field, "integer", &value))
    }

    /// Read a floating point field
    fn read_float(&self, node: &TaggedNode, field: &str) -> AccessResult<f64> {
        let value = self.read_field(node, field)?;
        value.as_float().ok_or_else(|| mismatch(field, "float", &value))
    }

    /// Read a C boolean (`value == 1`)
    fn read_flag(&self, node: &TaggedNode, field: &str) -> AccessResult<bool> {
        let value = self.read_field(node, field)?;
        value.as_flag().ok_or_else(|| mismatch(field, "boolean", &value))
    }

    /// Read a `char` field as a single character
    fn read_char(&self, node: &TaggedNode, field: &str) -> AccessResult<char> {
        let value = self.read_field(node, field)?;
        value.as_char().ok_or_else(|| mismatch(field, "char", &value))
    }

    /// Read an enum field as its constant name
    fn read_label(&self, node: &TaggedNode, field: &str) -> AccessResult<String> {
        let value = self.read_field(node, field)?;
        value
            .as_label()
            .map(str::to_string)
            .ok_or_else(|| mismatch(field, "enum", &value))
    }

    /// Read a pointer field
    fn read_handle(&self, node: &TaggedNode, field: &str) -> AccessResult<Handle> {
        let value = self.read_field(node, field)?;
        value.as_handle().ok_or_else(|| mismatch(field, "pointer", &value))
    }

    /// Read a `char *` field and dereference it
    fn read_string(&self, node: &TaggedNode, field: &str) -> AccessResult<Option<String>> {
        let pointer = self.read_handle(node, field)?;
        self.dereference_string(pointer)
    }
}

fn mismatch(field: &str, expected: &'static str, found: &FieldValue) -> AccessError {
    AccessError::TypeMismatch {
        field: field.to_string(),
        expected,
        found: found.kind(),
    }
}

/// Iterator over the cells of a singly linked `List`.
///
/// Follows `head` on the list header and then `next` on each `ListCell`
/// until a null pointer is reached. After the first error it stops.
pub struct LinkedCells<'a, A: MemoryAccessor + ?Sized> {
    accessor: &'a A,
    current: Handle,
    failed: bool,
}

impl<'a, A: MemoryAccessor + ?Sized> LinkedCells<'a, A> {
    /// Start a walk at the header of the list at `list`
    pub fn from_list(accessor: &'a A, list: Handle) -> AccessResult<Self> {
        let current = if accessor.is_null(list) {
            Handle::NULL
        } else {
            let header = accessor.cast_to(list, "List")?;
            accessor.read_handle(&header, "head")?
        };

        Ok(Self {
            accessor,
            current,
            failed: false,
        })
    }

    fn advance(&mut self) -> AccessResult<TaggedNode> {
        let cell = self.accessor.cast_to(self.current, "ListCell")?;
        self.current = self.accessor.read_handle(&cell, "next")?;
        trace!("list cell {} -> {}", cell.handle(), self.current);
        Ok(cell)
    }
}

impl<A: MemoryAccessor + ?Sized> Iterator for LinkedCells<'_, A> {
    type Item = AccessResult<TaggedNode>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.accessor.is_null(self.current) {
            return None;
        }

        let cell = self.advance();
        if cell.is_err() {
            self.failed = true;
        }
        Some(cell)
    }
}
