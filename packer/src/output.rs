//! Output helpers. Contains [OutputPaths] naming build artifacts and
//! [StagedFile], used to replace them atomically.

use crate::{
    common::{NAME_DB_FILE_NAME, OBJECT_DB_FILE_NAME},
    error::{IoResultExt, Result},
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

/// Paths of build artifacts.
///
/// If not sure what to set here, use [Default].
#[derive(Debug)]
pub struct OutputPaths {
    /// Object blob.
    pub object_db: PathBuf,
    /// Name index (C source).
    pub name_db: PathBuf,
}
impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            object_db: PathBuf::from(OBJECT_DB_FILE_NAME),
            name_db: PathBuf::from(NAME_DB_FILE_NAME),
        }
    }
}

/// Artifact being written under a temporary name in its target directory.
///
/// Nothing is visible at `path` until [StagedFile::persist] is called. If
/// [StagedFile] is dropped before that (eg. build failed), the temporary file
/// is removed and previous artifact, if any, stays untouched.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    file: NamedTempFile,
}
impl StagedFile {
    /// Creates temporary file next to `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut builder = tempfile::Builder::new();
        builder.prefix(".webroot-pack").suffix(".tmp");
        // same as a file created with fs::File::create, temporary files default
        // to owner only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o644));
        }
        let file = builder.tempfile_in(directory).with_path(path)?;

        Ok(Self {
            path: path.to_owned(),
            file,
        })
    }

    /// Final path of the artifact.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The temporary file to write artifact content into.
    pub fn file(&mut self) -> &mut fs::File {
        self.file.as_file_mut()
    }

    /// Syncs content to disk and moves it to the final path, replacing
    /// previous artifact.
    pub fn persist(self) -> Result<()> {
        self.file.as_file().sync_all().with_path(&self.path)?;
        self.file
            .persist(&self.path)
            .map_err(|error| error.error)
            .with_path(&self.path)?;

        Ok(())
    }
}
