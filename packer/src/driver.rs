//! Driver helpers. Contains [Driver], running the whole build: registering
//! uris, then writing object blob and name index.

use crate::{
    common::uri::Uri,
    error::{IoResultExt, Result},
    name_index::{IndexFormat, NameIndex},
    object_store::{ObjectId, ObjectStore},
    output::{OutputPaths, StagedFile},
    resolve::PathResolver,
};
use std::{
    io::{BufRead, BufWriter},
    path::Path,
};

/// Numbers describing finished build.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BuildSummary {
    /// Number of entries in the name index.
    pub uri_count: usize,
    /// Number of unique objects in the blob.
    pub object_count: usize,
    /// Size of the blob in bytes.
    pub blob_length: u64,
}

/// Runs a build in two phases: first all uris are registered with
/// [Driver::register] (or one of its batch variants), then
/// [Driver::finish] writes both artifacts.
#[derive(Debug)]
pub struct Driver {
    resolver: PathResolver,
    store: ObjectStore,
    index: NameIndex,
}
impl Driver {
    /// Creates [self] from its parts. `store` and `index` are usually empty.
    pub fn new(
        resolver: PathResolver,
        store: ObjectStore,
        index: NameIndex,
    ) -> Self {
        Self {
            resolver,
            store,
            index,
        }
    }

    /// Resolver used for registered uris.
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Objects registered so far.
    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    /// Names registered so far.
    pub fn index(&self) -> &NameIndex {
        &self.index
    }

    /// Registers a single `uri`, returning object it now points at.
    ///
    /// Uri that can't be resolved is mapped to the not-found object. Uri
    /// registered again is resolved again and points at the latest object.
    /// Fails only if the object can't be stat'ed.
    pub fn register(
        &mut self,
        uri: &str,
    ) -> Result<ObjectId> {
        let uri_path = uri.strip_prefix('/').unwrap_or(uri);
        let path = self.resolver.resolve(uri_path);

        let object = self.store.add(path.as_deref())?;
        log::debug!("{} -> {:?}", uri, object);

        self.index.register(Uri::from_string(uri.to_owned()), object);

        Ok(object)
    }

    /// Registers all `uris`.
    pub fn register_all<'u>(
        &mut self,
        uris: impl IntoIterator<Item = &'u str>,
    ) -> Result<()> {
        uris.into_iter()
            .try_for_each(|uri| self.register(uri).map(|_| ()))
    }

    /// Registers uris read from `input`, one per line. Line terminators (`\n`
    /// or `\r\n`) are not part of the uri. Returns number of lines read.
    ///
    /// `input_path` is only used to describe read errors.
    pub fn register_lines(
        &mut self,
        input: impl BufRead,
        input_path: &Path,
    ) -> Result<usize> {
        let mut count = 0;
        for line in input.lines() {
            let line = line.with_path(input_path)?;
            self.register(line.trim_end_matches('\r'))?;
            count += 1;
        }
        Ok(count)
    }

    /// Writes object blob, then name index referencing it, and moves both
    /// into `outputs` paths.
    ///
    /// Both artifacts are staged in temporary files and published only when
    /// both are complete, so on error no partial artifact is left behind.
    pub fn finish(
        self,
        outputs: &OutputPaths,
        format: &IndexFormat,
    ) -> Result<BuildSummary> {
        let Self { store, index, .. } = self;

        let mut object_db = StagedFile::create(&outputs.object_db)?;
        log::info!("writing object db: {}", outputs.object_db.display());
        let objects = store.write(BufWriter::new(object_db.file()), &outputs.object_db)?;

        let mut name_db = StagedFile::create(&outputs.name_db)?;
        log::info!("writing name db: {}", outputs.name_db.display());
        index.write(&objects, format, name_db.file(), &outputs.name_db)?;

        object_db.persist()?;
        name_db.persist()?;

        let summary = BuildSummary {
            uri_count: index.len(),
            object_count: objects.len(),
            blob_length: objects.blob_length(),
        };
        log::info!(
            "packed {} uris into {} objects, {} bytes",
            summary.uri_count,
            summary.object_count,
            summary.blob_length
        );

        Ok(summary)
    }
}
