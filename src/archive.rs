use crate::error::{CompressionError, Result};
use std::collections::HashSet;
use std::io::{Cursor, Write};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// One `Done` item's output, ready for packaging.
#[derive(Debug, Clone)]
pub struct CompletedItem {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// A single downloadable unit: the raw bytes when exactly one item
/// completed, a ZIP archive otherwise.
#[derive(Debug, Clone)]
pub enum Package {
    Single { name: String, bytes: Vec<u8> },
    Archive { bytes: Vec<u8> },
}

pub fn entry_name(original_file_name: &str) -> String {
    format!("compressed-{}", original_file_name)
}

/// Bundles completed outputs.
///
/// Entries are named `compressed-<originalFileName>` in item order. Name
/// collisions get a numeric suffix before the extension (`compressed-a.jpg`,
/// `compressed-a-2.jpg`, ...): deterministic, never lossy. Entries are
/// stored uncompressed since the payloads are already compressed images.
pub fn package(items: &[CompletedItem]) -> Result<Package> {
    match items {
        [] => Err(CompressionError::NoCompletedItems),
        [only] => Ok(Package::Single {
            name: entry_name(&only.file_name),
            bytes: only.bytes.clone(),
        }),
        many => {
            let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
            let options = FileOptions::default().compression_method(CompressionMethod::Stored);
            let mut used = HashSet::new();

            for item in many {
                let name = unique_entry_name(&entry_name(&item.file_name), &mut used);
                writer.start_file(name, options)?;
                writer.write_all(&item.bytes)?;
            }

            let cursor = writer.finish()?;
            Ok(Package::Archive {
                bytes: cursor.into_inner(),
            })
        }
    }
}

fn unique_entry_name(base: &str, used: &mut HashSet<String>) -> String {
    if used.insert(base.to_string()) {
        return base.to_string();
    }

    let (stem, ext) = match base.rfind('.') {
        Some(idx) => (&base[..idx], &base[idx..]),
        None => (base, ""),
    };
    let mut n = 2u32;
    loop {
        let candidate = format!("{}-{}{}", stem, n, ext);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zip::ZipArchive;

    fn item(name: &str, bytes: &[u8]) -> CompletedItem {
        CompletedItem {
            file_name: name.to_string(),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn test_package_empty_is_an_error() {
        assert!(matches!(
            package(&[]),
            Err(CompressionError::NoCompletedItems)
        ));
    }

    #[test]
    fn test_package_single_item_is_raw_bytes() {
        let items = vec![item("photo.jpg", b"jpeg-bytes")];
        match package(&items).unwrap() {
            Package::Single { name, bytes } => {
                assert_eq!(name, "compressed-photo.jpg");
                assert_eq!(bytes, b"jpeg-bytes");
            }
            Package::Archive { .. } => panic!("single item must not be archived"),
        }
    }

    #[test]
    fn test_package_multiple_items_builds_archive() {
        let items = vec![
            item("a.jpg", b"aaa"),
            item("b.png", b"bbbb"),
            item("c.jpg", b"c"),
        ];
        let bytes = match package(&items).unwrap() {
            Package::Archive { bytes } => bytes,
            Package::Single { .. } => panic!("expected an archive"),
        };

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 3);

        let mut names = Vec::new();
        for i in 0..archive.len() {
            let entry = archive.by_index(i).unwrap();
            names.push(entry.name().to_string());
        }
        assert_eq!(
            names,
            vec!["compressed-a.jpg", "compressed-b.png", "compressed-c.jpg"]
        );

        let mut content = Vec::new();
        std::io::Read::read_to_end(
            &mut archive.by_name("compressed-b.png").unwrap(),
            &mut content,
        )
        .unwrap();
        assert_eq!(content, b"bbbb");
    }

    #[test]
    fn test_package_resolves_name_collisions_deterministically() {
        let items = vec![
            item("dup.jpg", b"one"),
            item("dup.jpg", b"two"),
            item("dup.jpg", b"three"),
        ];
        let bytes = match package(&items).unwrap() {
            Package::Archive { bytes } => bytes,
            Package::Single { .. } => panic!("expected an archive"),
        };

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut names = Vec::new();
        for i in 0..archive.len() {
            names.push(archive.by_index(i).unwrap().name().to_string());
        }
        assert_eq!(
            names,
            vec![
                "compressed-dup.jpg",
                "compressed-dup-2.jpg",
                "compressed-dup-3.jpg"
            ]
        );
    }

    #[test]
    fn test_unique_entry_name_without_extension() {
        let mut used = HashSet::new();
        assert_eq!(unique_entry_name("compressed-raw", &mut used), "compressed-raw");
        assert_eq!(
            unique_entry_name("compressed-raw", &mut used),
            "compressed-raw-2"
        );
    }
}
