//! Scan helpers. Contains [search] function, used to gather uris of all files
//! inside web root, when they are not provided explicitly.

use crate::error::{Error, Result};
use std::{
    io, iter,
    path::{Component, Path},
};
use walkdir::{DirEntry, WalkDir};

/// Settings for [search] function.
///
/// If not sure what to set here, use [Default].
#[derive(Debug)]
pub struct SearchOptions {
    /// Whether to follow links while traversing directories.
    pub follow_links: bool,
    /// Whether to include files and directories starting with `.`.
    pub include_hidden: bool,
}
impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            follow_links: true,
            include_hidden: false,
        }
    }
}

/// Searches `web_root` recursively and builds uri for every file found.
///
/// Returned list starts with `/` (the web root itself), followed by `/`
/// separated relative path of each regular file, in file name order.
/// Directories are not listed, they are reachable only through their index
/// document.
pub fn search(
    web_root: &Path,
    options: &SearchOptions,
) -> Result<Vec<String>> {
    let include_hidden = options.include_hidden;

    let file_uris = WalkDir::new(web_root)
        .follow_links(options.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| include_hidden || entry.depth() == 0 || !is_hidden(entry))
        .map(|entry| -> Result<Option<String>> {
            // detect search errors
            let entry = entry.map_err(|error| Error::Io {
                path: error.path().unwrap_or(web_root).to_owned(),
                source: io::Error::from(error),
            })?;

            // we are interested in files only
            // if follow_links is true, this will be resolved as link target
            if !entry.file_type().is_file() {
                return Ok(None);
            }

            // strip prefix, so entry path is relative to web root
            let relative_path = entry
                .path()
                .strip_prefix(web_root)
                .unwrap_or(entry.path());

            let uri = uri_from_relative_path(relative_path).ok_or_else(|| {
                Error::NonUnicodePath {
                    path: entry.path().to_owned(),
                }
            })?;

            Ok(Some(uri))
        })
        .filter_map(|entry_result| entry_result.transpose()) // strips Ok(None)
        .collect::<Result<Vec<_>>>()?;

    let uris = iter::once("/".to_owned()).chain(file_uris).collect();

    Ok(uris)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|file_name| file_name.starts_with('.'))
}

/// Creates uri (eg. "/dir1/dir2/file.html") from relative fs path (eg.
/// "dir1\\dir2\\file.html").
///
/// Returns [None] if any component is not valid unicode or is not a plain
/// name (like `..` or root).
fn uri_from_relative_path(relative_path: &Path) -> Option<String> {
    // list of path components, eg. ["dir1", "dir2", "file.bin"]
    let components = relative_path
        .components()
        .map(|component| match component {
            Component::Normal(component) => component.to_str(),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;

    // we add empty element at the beginning to have uri starting with /
    let uri = itertools::join(iter::once("").chain(components), "/");

    Some(uri)
}
