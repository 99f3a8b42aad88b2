//! Resolve helpers. Contains [PathResolver], mapping request uris to files
//! under web root.

use crate::common::INDEX_DOCUMENT;
use std::{
    fs,
    path::{Path, PathBuf, is_separator},
};

/// Settings for [PathResolver].
///
/// If not sure what to set here, use [Default].
#[derive(Debug)]
pub struct ResolveOptions {
    /// Documents tried, in order, when uri resolves to a directory. First
    /// existing one wins.
    pub index_documents: Vec<String>,
}
impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            index_documents: vec![INDEX_DOCUMENT.to_owned()],
        }
    }
}

/// Maps request uris to file system paths under `web_root`.
///
/// Inputs are trusted build time data, no protection against `..` or symlinks
/// leading outside of web root is performed.
#[derive(Debug)]
pub struct PathResolver {
    web_root: PathBuf,
    options: ResolveOptions,
}
impl PathResolver {
    /// Creates [self] resolving against `web_root`.
    pub fn new(
        web_root: PathBuf,
        options: ResolveOptions,
    ) -> Self {
        Self { web_root, options }
    }

    /// Web root all uris are resolved against.
    pub fn web_root(&self) -> &Path {
        &self.web_root
    }

    /// Resolves `uri_path` (eg. `img/logo.png`) to a path of existing file.
    ///
    /// Leading separators are ignored, so the path is always joined below web
    /// root. Directories resolve to the first existing index document, there
    /// is never a directory listing. Returns [None] (and logs the attempted
    /// path) if nothing suitable exists.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use std::path::PathBuf;
    /// # use webroot_pack_packer::resolve::{PathResolver, ResolveOptions};
    /// #
    /// let resolver = PathResolver::new(PathBuf::from("public"), ResolveOptions::default());
    ///
    /// // public/docs/ is a directory containing index.html
    /// assert_eq!(
    ///     resolver.resolve("docs"),
    ///     Some(PathBuf::from("public/docs/index.html"))
    /// );
    /// ```
    pub fn resolve(
        &self,
        uri_path: &str,
    ) -> Option<PathBuf> {
        let path = self.web_root.join(uri_path.trim_start_matches(is_separator));

        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(error) => {
                log::warn!("{} - 404 ({})", path.display(), error);
                return None;
            }
        };

        if !metadata.is_dir() {
            return Some(path);
        }

        let index_path = self
            .options
            .index_documents
            .iter()
            .map(|index_document| path.join(index_document))
            .find(|index_path| fs::metadata(index_path).is_ok());
        if index_path.is_none() {
            log::warn!("{} - 404 (directory without index document)", path.display());
        }
        index_path
    }
}
