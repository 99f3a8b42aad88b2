//! Object helpers. Contains [ContentObject], a single physical file stored in
//! the object blob, and [IdentityKey] distinguishing physical files.

use crate::error::{Error, IoResultExt, Result};
use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

/// Size of a single chunk streamed from source file into the blob.
pub const COPY_CHUNK_SIZE: usize = 8 << 10;

/// Identity of a physical file, independent of the path used to reach it.
///
/// On unix this is `(device, inode)`, so hard links and different spellings
/// of the same path collapse into the same key.
#[cfg(unix)]
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct IdentityKey {
    /// Device id of the file system holding the file.
    pub device: u64,
    /// Inode number within the device.
    pub inode: u64,
}

/// Identity of a physical file, independent of the path used to reach it.
///
/// Without stable inode numbers, canonical absolute path is used instead. This
/// still merges different spellings of the same path and symlinks, but hard
/// links are seen as separate files.
#[cfg(not(unix))]
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct IdentityKey {
    /// Canonical absolute path of the file.
    pub canonical_path: PathBuf,
}

impl IdentityKey {
    #[cfg(unix)]
    fn from_metadata(
        _path: &Path,
        metadata: &fs::Metadata,
    ) -> io::Result<Self> {
        use std::os::unix::fs::MetadataExt;

        Ok(Self {
            device: metadata.dev(),
            inode: metadata.ino(),
        })
    }

    #[cfg(not(unix))]
    fn from_metadata(
        path: &Path,
        _metadata: &fs::Metadata,
    ) -> io::Result<Self> {
        Ok(Self {
            canonical_path: fs::canonicalize(path)?,
        })
    }
}

/// One physical file, to be stored once in the object blob no matter how many
/// uris point at it.
///
/// Identity and size are captured when the object is created (registration)
/// and never change. The size is used for ordering objects in the blob.
#[derive(Debug)]
pub struct ContentObject {
    path: PathBuf,
    identity: IdentityKey,
    size: u64,
}
impl ContentObject {
    /// Creates [self] by stat'ing file at `path`. Links are followed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let stat_error = |source| Error::Stat {
            path: path.to_owned(),
            source,
        };

        let metadata = fs::metadata(path).map_err(stat_error)?;
        let identity = IdentityKey::from_metadata(path, &metadata).map_err(stat_error)?;

        Ok(Self {
            path: path.to_owned(),
            identity,
            size: metadata.len(),
        })
    }

    /// Path this object was first registered with.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Identity captured at registration.
    pub fn identity(&self) -> &IdentityKey {
        &self.identity
    }

    /// Size in bytes captured at registration.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Streams file contents into `writer`, returning number of bytes written.
    ///
    /// The opened file is checked against identity captured at registration,
    /// failing with [Error::IdentityMismatch] if the path now points at a
    /// different file. If number of copied bytes does not match registered
    /// size, [Error::SizeChanged] is returned. `writer_path` is only used to
    /// describe write errors.
    pub fn copy_into(
        &self,
        writer: &mut impl Write,
        writer_path: &Path,
    ) -> Result<u64> {
        let mut file = fs::File::open(&self.path).with_path(&self.path)?;

        let metadata = file.metadata().with_path(&self.path)?;
        let identity = IdentityKey::from_metadata(&self.path, &metadata).with_path(&self.path)?;
        if identity != self.identity {
            return Err(Error::IdentityMismatch {
                path: self.path.clone(),
            });
        }

        let mut chunk = [0u8; COPY_CHUNK_SIZE];
        let mut copied: u64 = 0;
        loop {
            let chunk_length = match file.read(&mut chunk) {
                Ok(0) => break,
                Ok(chunk_length) => chunk_length,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) => {
                    return Err(Error::Io {
                        path: self.path.clone(),
                        source: error,
                    });
                }
            };
            writer
                .write_all(&chunk[..chunk_length])
                .with_path(writer_path)?;
            copied += chunk_length as u64;
        }

        if copied != self.size {
            return Err(Error::SizeChanged {
                path: self.path.clone(),
                expected: self.size,
                actual: copied,
            });
        }

        Ok(copied)
    }
}
