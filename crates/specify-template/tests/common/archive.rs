//! Zip archive construction for tests

use std::io::{Cursor, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

enum Entry {
    Dir(String),
    File(String, Vec<u8>),
}

/// Builder for small in-memory zip archives
#[derive(Default)]
pub struct ArchiveBuilder {
    entries: Vec<Entry>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an explicit directory entry (`name` should end with `/`)
    pub fn dir(mut self, name: &str) -> Self {
        self.entries.push(Entry::Dir(name.to_string()));
        self
    }

    /// Add a file entry
    pub fn file(mut self, name: &str, content: &str) -> Self {
        self.entries
            .push(Entry::File(name.to_string(), content.as_bytes().to_vec()));
        self
    }

    /// Serialize to zip bytes
    pub fn build(self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .unix_permissions(0o644);

        for entry in self.entries {
            match entry {
                Entry::Dir(name) => zip.add_directory(name, options).unwrap(),
                Entry::File(name, bytes) => {
                    zip.start_file(name, options).unwrap();
                    zip.write_all(&bytes).unwrap();
                }
            }
        }

        zip.finish().unwrap().into_inner()
    }

    /// Serialize to a file on disk
    pub fn write_to(self, path: &Path) {
        std::fs::write(path, self.build()).unwrap();
    }
}

/// Flip one byte of the first occurrence of `needle` in archive bytes
///
/// With stored entries this damages the payload while leaving the headers
/// intact, so the entry fails its checksum when read.
pub fn corrupt_payload(mut bytes: Vec<u8>, needle: &[u8]) -> Vec<u8> {
    let pos = bytes
        .windows(needle.len())
        .position(|w| w == needle)
        .expect("payload not found in archive");
    bytes[pos] ^= 0x20;
    bytes
}

/// `root/{a.txt, scripts/run.sh}` wrapped in a single directory
pub fn wrapped_template() -> ArchiveBuilder {
    ArchiveBuilder::new()
        .dir("root/")
        .file("root/a.txt", "from template")
        .dir("root/scripts/")
        .file("root/scripts/run.sh", "#!/bin/sh\necho run\n")
}

/// The same payload without the wrapping directory
pub fn flat_template() -> ArchiveBuilder {
    ArchiveBuilder::new()
        .file("a.txt", "from template")
        .dir("scripts/")
        .file("scripts/run.sh", "#!/bin/sh\necho run\n")
}
