//! Image catalog: uploaded image data keyed by a stable id.
//!
//! Append-only. Records are never modified or removed during a session,
//! even when no placement references them any more.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::error::{EditorError, Result};

/// Opaque, cheaply clonable image identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageId(Arc<str>);

impl ImageId {
    /// Create an id from any string.
    pub fn new(id: &str) -> Self {
        Self(Arc::from(id))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ImageId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One uploaded image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRecord {
    /// Stable identifier.
    pub id: ImageId,
    /// Raw image bytes, never inspected.
    pub data: Vec<u8>,
}

/// All images uploaded in this session, in upload order.
#[derive(Clone, Debug, Default)]
pub struct ImageCatalog {
    records: Vec<ImageRecord>,
    index: BTreeMap<ImageId, usize>,
    next_seq: u64,
}

impl ImageCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image under a freshly generated `img-<n>` id.
    pub fn add(&mut self, data: Vec<u8>) -> ImageId {
        let id = self.fresh_id();
        self.push(id.clone(), data);
        id
    }

    /// Add an image under a caller-chosen id.
    pub fn insert(&mut self, id: ImageId, data: Vec<u8>) -> Result<()> {
        if self.index.contains_key(&id) {
            return Err(EditorError::DuplicateImage { id });
        }
        self.push(id, data);
        Ok(())
    }

    /// Add a batch of images under caller-chosen ids.
    ///
    /// All-or-nothing: if any id is already taken, or repeats within the
    /// batch, nothing is added.
    pub fn insert_batch(&mut self, batch: Vec<(ImageId, Vec<u8>)>) -> Result<Vec<ImageId>> {
        let mut seen = BTreeSet::new();
        for (id, _) in &batch {
            if self.index.contains_key(id) || !seen.insert(id) {
                return Err(EditorError::DuplicateImage { id: id.clone() });
            }
        }
        Ok(batch
            .into_iter()
            .map(|(id, data)| {
                self.push(id.clone(), data);
                id
            })
            .collect())
    }

    /// Look up a record.
    pub fn get(&self, id: &ImageId) -> Option<&ImageRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    /// Image bytes for `id`.
    pub fn data(&self, id: &ImageId) -> Option<&[u8]> {
        self.get(id).map(|r| r.data.as_slice())
    }

    /// Whether `id` has been uploaded.
    pub fn contains(&self, id: &ImageId) -> bool {
        self.index.contains_key(id)
    }

    /// Number of uploaded images.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been uploaded yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in upload order.
    pub fn iter(&self) -> impl Iterator<Item = &ImageRecord> {
        self.records.iter()
    }

    fn push(&mut self, id: ImageId, data: Vec<u8>) {
        self.index.insert(id.clone(), self.records.len());
        self.records.push(ImageRecord { id, data });
    }

    /// Next `img-<n>` not already taken by a caller-chosen id.
    fn fresh_id(&mut self) -> ImageId {
        loop {
            self.next_seq += 1;
            let id = ImageId::from(format!("img-{}", self.next_seq));
            if !self.index.contains_key(&id) {
                return id;
            }
        }
    }
}
