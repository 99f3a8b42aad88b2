#![doc(hidden)]

use anyhow::{Context, Error, anyhow, bail, ensure};
use std::{
    fs,
    path::PathBuf,
    sync::Once,
};
use tempfile::TempDir;
use webroot_pack_common::{
    name_entry::{
        FIELD_OBJECT_LENGTH, FIELD_OBJECT_OFFSET, FIELD_URI_LEN, FIELD_URI_PTR, NameEntry,
    },
    range::ObjectRange,
    uri::{self, Uri},
};
use webroot_pack_packer::{
    driver::{BuildSummary, Driver},
    name_index::{IndexFormat, NameIndex},
    object_store::ObjectStore,
    output::OutputPaths,
    resolve::{PathResolver, ResolveOptions},
};

pub const NOT_FOUND_CONTENT: &[u8] = b"<html>404 Not Found</html>";

// logs go to test output, captured unless test fails
pub fn init_logger() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = simple_logger::SimpleLogger::new()
            .with_level(log::LevelFilter::Debug)
            .init();
    });
}

// temporary web root with a not-found document (outside of it, like
// `./404.html` next to a web root directory) and a directory for artifacts
pub struct Fixture {
    directory: TempDir,
}
impl Fixture {
    pub fn new() -> Result<Self, Error> {
        init_logger();

        let directory = TempDir::new()?;
        fs::create_dir(directory.path().join("webroot"))?;
        fs::create_dir(directory.path().join("out"))?;
        fs::write(directory.path().join("404.html"), NOT_FOUND_CONTENT)?;

        Ok(Self { directory })
    }

    pub fn web_root(&self) -> PathBuf {
        self.directory.path().join("webroot")
    }
    pub fn not_found_path(&self) -> PathBuf {
        self.directory.path().join("404.html")
    }
    pub fn outputs(&self) -> OutputPaths {
        OutputPaths {
            object_db: self.directory.path().join("out").join("webroot.objdb"),
            name_db: self.directory.path().join("out").join("webroot.h"),
        }
    }
    pub fn output_directory(&self) -> PathBuf {
        self.directory.path().join("out")
    }

    // writes file relative to web root, creating directories
    pub fn write(
        &self,
        relative_path: &str,
        content: &[u8],
    ) -> Result<PathBuf, Error> {
        let path = self.web_root().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    #[cfg(unix)]
    pub fn hard_link(
        &self,
        original: &str,
        link: &str,
    ) -> Result<(), Error> {
        fs::hard_link(self.web_root().join(original), self.web_root().join(link))?;
        Ok(())
    }

    pub fn driver(&self) -> Driver {
        Driver::new(
            PathResolver::new(self.web_root(), ResolveOptions::default()),
            ObjectStore::with_not_found_path(self.not_found_path()),
            NameIndex::new(),
        )
    }

    // runs full build of `uris`, reading artifacts back
    pub fn build(
        &self,
        uris: &[&str],
    ) -> Result<Artifacts, Error> {
        let mut driver = self.driver();
        driver.register_all(uris.iter().copied())?;
        let summary = driver.finish(&self.outputs(), &IndexFormat::default())?;

        let artifacts = Artifacts::read(&self.outputs(), summary)?;
        Ok(artifacts)
    }
}

pub struct Artifacts {
    pub summary: BuildSummary,
    pub blob: Vec<u8>,
    pub entries: Vec<NameEntry>,
}
impl Artifacts {
    pub fn read(
        outputs: &OutputPaths,
        summary: BuildSummary,
    ) -> Result<Self, Error> {
        let blob = fs::read(&outputs.object_db).context("object db")?;
        let name_db = fs::read_to_string(&outputs.name_db).context("name db")?;
        let entries = parse_name_db(&name_db).context("parse name db")?;

        Ok(Self {
            summary,
            blob,
            entries,
        })
    }

    // looks uri up the way native consumer does, with binary search
    pub fn lookup(
        &self,
        uri: &str,
    ) -> Option<&[u8]> {
        let index = self
            .entries
            .binary_search_by(|entry| uri::compare(&entry.uri, uri))
            .ok()?;
        self.entries[index].range.slice(&self.blob)
    }

    pub fn entry(
        &self,
        uri: &str,
    ) -> Option<&NameEntry> {
        self.entries.iter().find(|entry| &*entry.uri == uri)
    }
}

// parses bare list of initializers, as emitted with default IndexFormat
pub fn parse_name_db(name_db: &str) -> Result<Vec<NameEntry>, Error> {
    let mut entries = Vec::new();
    let mut rest = name_db;

    while let Some(start) = rest.find(&format!(".{} = ", FIELD_URI_PTR)) {
        rest = &rest[start + FIELD_URI_PTR.len() + 4..];

        let (uri, after) = parse_c_string_literal(rest)?;
        rest = after;
        let (uri_length, after) = parse_field(rest, FIELD_URI_LEN)?;
        rest = after;
        let (offset, after) = parse_field(rest, FIELD_OBJECT_OFFSET)?;
        rest = after;
        let (length, after) = parse_field(rest, FIELD_OBJECT_LENGTH)?;
        rest = after;

        ensure!(
            uri.len() as u64 == uri_length,
            "uri length mismatch for {:?}",
            uri
        );
        entries.push(NameEntry {
            uri: Uri::from_string(String::from_utf8(uri)?),
            range: ObjectRange { offset, length },
        });
    }

    Ok(entries)
}

fn parse_field<'s>(
    text: &'s str,
    name: &str,
) -> Result<(u64, &'s str), Error> {
    let prefix = format!(".{} = ", name);
    let start = text
        .find(&prefix)
        .ok_or_else(|| anyhow!("missing field {}", name))?
        + prefix.len();
    let text = &text[start..];
    let end = text
        .find(|character: char| !character.is_ascii_digit())
        .unwrap_or(text.len());
    let value = text[..end].parse().with_context(|| name.to_owned())?;
    Ok((value, &text[end..]))
}

fn parse_c_string_literal(text: &str) -> Result<(Vec<u8>, &str), Error> {
    let bytes = text.as_bytes();
    ensure!(bytes.first() == Some(&b'"'), "expected string literal");

    let mut value = Vec::new();
    let mut position = 1;
    loop {
        match bytes.get(position) {
            None => bail!("unterminated string literal"),
            Some(b'"') => break,
            Some(b'\\') => {
                match bytes.get(position + 1) {
                    Some(b'0'..=b'7') => {
                        let digits = bytes
                            .get(position + 1..position + 4)
                            .ok_or_else(|| anyhow!("short octal escape"))?;
                        ensure!(digits.iter().all(|d| (b'0'..=b'7').contains(d)));
                        value.push(u8::from_str_radix(std::str::from_utf8(digits)?, 8)?);
                        position += 4;
                    }
                    Some(escaped @ (b'"' | b'\\' | b'?')) => {
                        value.push(*escaped);
                        position += 2;
                    }
                    other => bail!("unsupported escape {:?}", other),
                }
            }
            Some(byte) => {
                value.push(*byte);
                position += 1;
            }
        }
    }

    Ok((value, &text[position + 1..]))
}
