//! Name index helpers. Contains [NameIndex], mapping uris to stored objects,
//! and [IndexFormat] describing how it is emitted.

use crate::{
    common::{
        name_entry::{ENTRY_STRUCT_NAME, NameEntry},
        uri::{self, Uri},
    },
    error::{IoResultExt, Result},
    object_store::{ObjectId, ObjectTable},
};
use std::{
    collections::HashMap,
    io::{BufWriter, Write},
    path::Path,
};

/// Settings for [NameIndex::write].
///
/// If not sure what to set here, use [Default].
#[derive(Default, Debug)]
pub struct IndexFormat {
    /// If set, entries are wrapped in a `static const struct webroot_name
    /// <array_name>[]` definition. Otherwise bare list of initializers is
    /// emitted, to be included inside an array definition by the consumer.
    pub array_name: Option<String>,
}

/// Maps each registered [Uri] to object stored in
/// [ObjectStore](crate::object_store::ObjectStore).
///
/// Objects are referenced by [ObjectId], their ranges are known only after
/// store is written, so index is written last.
#[derive(Debug)]
pub struct NameIndex {
    objects_by_uri: HashMap<Uri, ObjectId>,
}
impl NameIndex {
    /// Creates empty [self].
    pub fn new() -> Self {
        Self {
            objects_by_uri: HashMap::new(),
        }
    }

    /// Maps `uri` to `object`. Registering the same uri again overwrites the
    /// previous mapping, which is returned.
    pub fn register(
        &mut self,
        uri: Uri,
        object: ObjectId,
    ) -> Option<ObjectId> {
        self.objects_by_uri.insert(uri, object)
    }

    /// Returns object registered for `uri`.
    pub fn get(
        &self,
        uri: &str,
    ) -> Option<ObjectId> {
        self.objects_by_uri.get(uri).copied()
    }

    /// Number of registered uris.
    pub fn len(&self) -> usize {
        self.objects_by_uri.len()
    }

    /// Whether no uri was registered yet.
    pub fn is_empty(&self) -> bool {
        self.objects_by_uri.is_empty()
    }

    /// Registered uris with their objects, ordered by [uri::sort_key].
    pub fn ordered(&self) -> Vec<(&Uri, ObjectId)> {
        let mut ordered = self
            .objects_by_uri
            .iter()
            .map(|(uri, object)| (uri, *object))
            .collect::<Vec<_>>();
        ordered.sort_by(|(a, _), (b, _)| uri::compare(a, b));
        ordered
    }

    /// Builds index records, in the order they are written.
    pub fn entries(
        &self,
        objects: &ObjectTable,
    ) -> Vec<NameEntry> {
        self.ordered()
            .into_iter()
            .map(|(uri, object)| NameEntry {
                uri: uri.clone(),
                range: objects.range(object),
            })
            .collect()
    }

    /// Writes the index as C source into `writer`.
    ///
    /// `objects` must come from the store all registered objects were added
    /// to. `writer_path` is only used to describe write errors.
    pub fn write(
        &self,
        objects: &ObjectTable,
        format: &IndexFormat,
        writer: impl Write,
        writer_path: &Path,
    ) -> Result<()> {
        let mut writer = BufWriter::new(writer);

        if let Some(array_name) = &format.array_name {
            writeln!(
                writer,
                "static const struct {} {}[] = {{",
                ENTRY_STRUCT_NAME, array_name
            )
            .with_path(writer_path)?;
        }

        for entry in self.entries(objects) {
            write!(writer, "{}", entry).with_path(writer_path)?;
        }

        if format.array_name.is_some() {
            writeln!(writer, "}};").with_path(writer_path)?;
        }

        writer.flush().with_path(writer_path)?;

        Ok(())
    }
}
