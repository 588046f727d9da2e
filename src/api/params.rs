//
//  billplz
//  api/params.rs
//

//! # Parameter Encoder
//!
//! Billplz accepts request bodies as either `application/x-www-form-urlencoded`
//! pairs or `multipart/form-data` fields. In both encodings, nested parameter
//! objects are flattened into the gateway's bracketed-key convention: the root
//! key is unchanged and each deeper level is appended as `[child]`, so
//! `{ split_payment: { email: ... } }` becomes `split_payment[email]`.
//!
//! This module provides the types for building those bodies:
//!
//! - [`ParamValue`]: a tagged value — a primitive string, a nested tree, or a
//!   file reference. The caller decides the variant at construction time; the
//!   encoder never inspects runtime types.
//! - [`ParamTree`]: an insertion-ordered mapping of unique keys to values.
//! - [`FormField`]: one flattened multipart field, either text or file
//!   content.
//!
//! Flattening is a depth-first, pre-order traversal in insertion order, so
//! encoding the same tree twice yields byte-identical output.
//!
//! # The null contract
//!
//! The gateway distinguishes a field explicitly set to null (sent as the
//! literal string `"null"`) from an omitted field. `From<Option<T>>` and
//! [`ParamValue::null`] produce that literal; the encoder never drops an
//! entry. Omitting a field is the caller's decision, made by not inserting it.
//!
//! # Example
//!
//! ```rust
//! use billplz::api::params::{ParamTree, ParamValue};
//!
//! let tree = ParamTree::new().with("title", "My Store").with(
//!     "split_payment",
//!     ParamTree::new()
//!         .with("email", "verified@example.com")
//!         .with("fixed_cut", Option::<i64>::None)
//!         .with("split_header", true),
//! );
//!
//! assert_eq!(
//!     tree.to_pairs(),
//!     vec![
//!         ("title".to_string(), "My Store".to_string()),
//!         ("split_payment[email]".to_string(), "verified@example.com".to_string()),
//!         ("split_payment[fixed_cut]".to_string(), "null".to_string()),
//!         ("split_payment[split_header]".to_string(), "true".to_string()),
//!     ]
//! );
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use super::common::ApiError;

/// A single value in a parameter tree.
///
/// The variant is chosen by the caller when the tree is built:
///
/// - `Primitive` holds the final string rendering of a scalar. Booleans
///   render as `"true"`/`"false"` and unset optionals as `"null"` via the
///   `From` conversions.
/// - `Tree` nests another level of bracketed keys. Only leaves produce
///   output; a tree node itself emits nothing.
/// - `File` references an image on disk, consumed by multipart encoding when
///   its top-level key is declared file-capable.
///
/// List values have no variant of their own: the gateway's accepted format
/// for repeated keys (`key[]=a&key[]=b`) is unconfirmed, so a list-typed
/// value must be passed pre-rendered as a single `Primitive` string.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// A scalar, already rendered to its wire string.
    Primitive(String),

    /// A nested parameter tree (one more `[child]` level per entry).
    Tree(ParamTree),

    /// A reference to a file on disk, for image-upload fields.
    File(PathBuf),
}

impl ParamValue {
    /// The explicit-null value, rendered as the literal string `"null"`.
    ///
    /// Billplz reads `"null"` as "this optional field is intentionally
    /// unset" (e.g. a split-payment cut that does not apply), which is not
    /// the same as omitting the field.
    #[must_use]
    pub fn null() -> Self {
        ParamValue::Primitive("null".to_string())
    }

    /// Renders this value as a plain string leaf.
    ///
    /// Trees have no string rendering and never reach this; a `File` renders
    /// as its path string, which is what the URL-encoded mode sends for
    /// file-typed fields (no file content is ever read outside multipart
    /// encoding).
    fn render(&self) -> String {
        match self {
            ParamValue::Primitive(s) => s.clone(),
            ParamValue::File(path) => path.display().to_string(),
            ParamValue::Tree(_) => String::new(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Primitive(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Primitive(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Primitive(value.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Primitive(value.to_string())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::Primitive(value.to_string())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Primitive(value.to_string())
    }
}

impl From<ParamTree> for ParamValue {
    fn from(value: ParamTree) -> Self {
        ParamValue::Tree(value)
    }
}

impl From<PathBuf> for ParamValue {
    fn from(value: PathBuf) -> Self {
        ParamValue::File(value)
    }
}

impl From<&Path> for ParamValue {
    fn from(value: &Path) -> Self {
        ParamValue::File(value.to_path_buf())
    }
}

impl<T> From<Option<T>> for ParamValue
where
    T: Into<ParamValue>,
{
    /// `None` becomes the explicit `"null"` literal, not an omitted field.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => ParamValue::null(),
        }
    }
}

/// One field of a flattened multipart body.
#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    /// A plain text field.
    Text {
        /// The flattened (bracketed) field name.
        name: String,
        /// The rendered value.
        value: String,
    },

    /// A file field carrying image content.
    File {
        /// The flattened field name (always a top-level key).
        name: String,
        /// The filename sent to the gateway: the path string exactly as the
        /// caller supplied it, not reduced to a basename.
        filename: String,
        /// Content type derived from the path extension as `image/<ext>`.
        content_type: String,
        /// The full file content, read before any network I/O.
        data: Vec<u8>,
    },
}

/// An insertion-ordered parameter tree.
///
/// Keys within one level are unique: [`insert`](Self::insert) replaces the
/// value of an existing key in place, keeping its original position.
/// Encoding walks entries in insertion order, which is the only ordering the
/// gateway's bracketed-key format relies on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamTree {
    entries: Vec<(String, ParamValue)>,
}

impl ParamTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value under `key`.
    ///
    /// If `key` is already present its value is replaced in place; the key
    /// keeps its original position in the ordering.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the number of entries at this level.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if this level has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flattens the tree into ordered `(key, value)` string pairs for an
    /// URL-encoded body.
    ///
    /// Nested trees contribute their leaves under bracketed keys; no pair is
    /// emitted for an intermediate node itself.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        flatten_pairs(&self.entries, "", &mut pairs);
        pairs
    }

    /// Flattens the tree into ordered multipart [`FormField`]s.
    ///
    /// `file_fields` declares which top-level keys carry image uploads; the
    /// resource layer passes its own set (`logo` for collections, `photo`
    /// for open collections). A declared key is only honored at the top
    /// level — a same-named key nested deeper is a plain text field. For
    /// each file field the content is read from disk in full here, so an
    /// unreadable path fails with [`ApiError::FileRead`] before any request
    /// is made.
    ///
    /// The content type is derived from the path's extension as
    /// `image/<extension>`, and the filename sent is the path string exactly
    /// as supplied.
    pub fn to_form_fields(&self, file_fields: &[&str]) -> Result<Vec<FormField>, ApiError> {
        let mut fields = Vec::new();
        flatten_form_fields(&self.entries, "", file_fields, &mut fields)?;
        Ok(fields)
    }
}

fn flatten_pairs(entries: &[(String, ParamValue)], prefix: &str, out: &mut Vec<(String, String)>) {
    for (key, value) in entries {
        let flat_key = flattened_key(prefix, key);
        match value {
            ParamValue::Tree(tree) => flatten_pairs(&tree.entries, &flat_key, out),
            leaf => out.push((flat_key, leaf.render())),
        }
    }
}

fn flatten_form_fields(
    entries: &[(String, ParamValue)],
    prefix: &str,
    file_fields: &[&str],
    out: &mut Vec<FormField>,
) -> Result<(), ApiError> {
    for (key, value) in entries {
        let flat_key = flattened_key(prefix, key);
        // File handling applies to top-level declared keys only; nested keys
        // carry brackets and never match.
        if prefix.is_empty() && file_fields.contains(&flat_key.as_str()) {
            out.push(read_file_field(flat_key, &value.render())?);
        } else if let ParamValue::Tree(tree) = value {
            flatten_form_fields(&tree.entries, &flat_key, file_fields, out)?;
        } else {
            out.push(FormField::Text {
                name: flat_key,
                value: value.render(),
            });
        }
    }
    Ok(())
}

fn flattened_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}[{key}]")
    }
}

fn read_file_field(name: String, path: &str) -> Result<FormField, ApiError> {
    let data = fs::read(path).map_err(|source| ApiError::FileRead {
        path: path.to_string(),
        source,
    })?;
    // `rsplit('.').next()` yields the whole string when there is no dot,
    // mirroring the gateway client convention of `image/<extension>`.
    let extension = path.rsplit('.').next().unwrap_or_default();
    Ok(FormField::File {
        name,
        filename: path.to_string(),
        content_type: format!("image/{extension}"),
        data,
    })
}
