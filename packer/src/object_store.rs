//! Object store helpers. Contains [ObjectStore], deduplicating collection of
//! [ContentObject], and [ObjectTable], its result after being written.

use crate::{
    common::{NOT_FOUND_PATH, range::ObjectRange},
    error::{IoResultExt, Result},
    object::{ContentObject, IdentityKey},
};
use std::{
    collections::{HashMap, hash_map},
    io::Write,
    path::{Path, PathBuf},
};

/// Handle to object registered in [ObjectStore]. Registering the same physical
/// file twice yields the same handle.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ObjectId(usize);

/// Collects [ContentObject]s, storing each physical file once.
///
/// Objects are identified by [IdentityKey], so two uris resolved to the same
/// path, or to hard links of the same file, share one stored copy. After all
/// objects are added, store is consumed by [ObjectStore::write].
#[derive(Debug)]
pub struct ObjectStore {
    not_found_path: PathBuf,

    // indexed by ObjectId, in registration order
    objects: Vec<ContentObject>,
    ids_by_identity: HashMap<IdentityKey, ObjectId>,
}
impl ObjectStore {
    /// Creates empty [self], using [NOT_FOUND_PATH] for unresolved uris.
    pub fn new() -> Self {
        Self::with_not_found_path(PathBuf::from(NOT_FOUND_PATH))
    }

    /// Creates empty [self], using `not_found_path` for unresolved uris.
    pub fn with_not_found_path(not_found_path: PathBuf) -> Self {
        Self {
            not_found_path,
            objects: Vec::new(),
            ids_by_identity: HashMap::new(),
        }
    }

    /// Path of the object stored for uris that were not resolved.
    pub fn not_found_path(&self) -> &Path {
        &self.not_found_path
    }

    /// Registers file at `path` (or the not-found object if [None]) and
    /// returns its handle.
    ///
    /// If file with the same identity was already added, handle of the
    /// existing object is returned and first registered path is kept.
    pub fn add(
        &mut self,
        path: Option<&Path>,
    ) -> Result<ObjectId> {
        let path = path.unwrap_or(self.not_found_path.as_path());

        let candidate = ContentObject::from_path(path)?;

        let entry = match self.ids_by_identity.entry(candidate.identity().clone()) {
            hash_map::Entry::Occupied(entry) => {
                let id = *entry.get();
                log::debug!(
                    "{} is already stored as {}",
                    path.display(),
                    self.objects[id.0].path().display()
                );
                return Ok(id);
            }
            hash_map::Entry::Vacant(entry) => entry,
        };

        let id = ObjectId(self.objects.len());
        log::debug!(
            "storing {} ({} bytes) as {:?}",
            path.display(),
            candidate.size(),
            id
        );
        entry.insert(id);
        self.objects.push(candidate);

        Ok(id)
    }

    /// Returns object registered under `id`.
    pub fn get(
        &self,
        id: ObjectId,
    ) -> &ContentObject {
        &self.objects[id.0]
    }

    /// Number of unique objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether no object was added yet.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Total size of all unique objects, as seen at registration. This is the
    /// expected size of the object blob.
    pub fn total_size(&self) -> u64 {
        self.objects.iter().map(ContentObject::size).sum()
    }

    /// Handles of all objects in the order they are written to the blob:
    /// ascending by registered size, equal sizes in registration order.
    pub fn write_order(&self) -> Vec<ObjectId> {
        let mut ids = (0..self.objects.len()).map(ObjectId).collect::<Vec<_>>();
        ids.sort_by_key(|id| (self.objects[id.0].size(), *id));
        ids
    }

    /// Streams all objects into `writer` as a single blob, returning their
    /// ranges.
    ///
    /// Objects are written in [Self::write_order], back to back, without any
    /// headers or padding. `writer_path` is only used to describe write
    /// errors. Any error (including a file replaced or modified since it was
    /// added) aborts writing, leaving `writer` with partial content.
    pub fn write(
        self,
        mut writer: impl Write,
        writer_path: &Path,
    ) -> Result<ObjectTable> {
        let write_order = self.write_order();

        // every slot is overwritten, as write_order is a permutation of ids
        let mut ranges = vec![
            ObjectRange {
                offset: 0,
                length: 0,
            };
            self.objects.len()
        ];

        let mut offset: u64 = 0;
        for id in write_order {
            let object = &self.objects[id.0];

            let length = object.copy_into(&mut writer, writer_path)?;
            let range = ObjectRange { offset, length };
            log::debug!(
                "written {} at {}..{}",
                object.path().display(),
                range.offset,
                range.end()
            );

            ranges[id.0] = range;
            offset = range.end();
        }

        writer.flush().with_path(writer_path)?;

        Ok(ObjectTable {
            ranges: ranges.into_boxed_slice(),
        })
    }
}

/// Ranges of all objects of a written [ObjectStore], addressed by [ObjectId].
#[derive(Debug)]
pub struct ObjectTable {
    ranges: Box<[ObjectRange]>,
}
impl ObjectTable {
    /// Range of object `id` in the blob.
    pub fn range(
        &self,
        id: ObjectId,
    ) -> ObjectRange {
        self.ranges[id.0]
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Whether the blob is empty of objects.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Total length of the written blob.
    pub fn blob_length(&self) -> u64 {
        self.ranges.iter().map(|range| range.length).sum()
    }
}
