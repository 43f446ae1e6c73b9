use crate::constants::ImageKind;
use crate::error::{CompressionError, Result};
use glob::glob;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension-based acceptance check used before reading any bytes. The
/// declared media type derived here is what the batch validates against.
pub fn is_accepted_file(path: &Path) -> bool {
    kind_of(path).is_some()
}

pub fn kind_of(path: &Path) -> Option<ImageKind> {
    path.extension()
        .and_then(|s| s.to_str())
        .and_then(ImageKind::from_extension)
}

/// Collects candidate image files from a file path, a directory, or a glob
/// pattern. Hidden entries are skipped; non-image files are filtered out
/// silently.
pub fn collect_image_files(input: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut image_files = Vec::new();
    let input_path = Path::new(input);

    if input_path.is_file() {
        if is_accepted_file(input_path) {
            image_files.push(input_path.to_path_buf());
        }
    } else if input_path.is_dir() {
        let walker = if recursive {
            WalkDir::new(input_path).into_iter()
        } else {
            WalkDir::new(input_path).max_depth(1).into_iter()
        };

        for entry in walker.filter_entry(|e| !e.file_name().to_string_lossy().starts_with('.')) {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && is_accepted_file(path) {
                image_files.push(path.to_path_buf());
            }
        }
        image_files.sort();
    } else if let Ok(pattern) = glob(input) {
        for entry in pattern.flatten() {
            if entry.is_file() && is_accepted_file(&entry) {
                image_files.push(entry);
            }
        }
        image_files.sort();
    } else {
        return Err(CompressionError::NoImageFilesFound(input.to_string()));
    }

    Ok(image_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_is_accepted_file() {
        assert!(is_accepted_file(Path::new("test.jpg")));
        assert!(is_accepted_file(Path::new("test.jpeg")));
        assert!(is_accepted_file(Path::new("test.JPG")));
        assert!(is_accepted_file(Path::new("test.png")));

        assert!(!is_accepted_file(Path::new("test.webp")));
        assert!(!is_accepted_file(Path::new("test.gif")));
        assert!(!is_accepted_file(Path::new("test.txt")));
        assert!(!is_accepted_file(Path::new("test")));
    }

    #[test]
    fn test_kind_of() {
        assert_eq!(kind_of(Path::new("a.png")), Some(ImageKind::Png));
        assert_eq!(kind_of(Path::new("a.jpeg")), Some(ImageKind::Jpeg));
        assert_eq!(kind_of(Path::new("a.bmp")), None);
    }

    #[test]
    fn test_collect_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("test.jpg");
        File::create(&file).unwrap().write_all(b"x").unwrap();

        let files = collect_image_files(&file.to_string_lossy(), false).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_collect_directory_filters_non_images() {
        let temp_dir = TempDir::new().unwrap();
        File::create(temp_dir.path().join("a.jpg")).unwrap();
        File::create(temp_dir.path().join("b.png")).unwrap();
        File::create(temp_dir.path().join("c.txt")).unwrap();
        File::create(temp_dir.path().join("d.webp")).unwrap();

        let files = collect_image_files(&temp_dir.path().to_string_lossy(), false).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_collect_recursive_vs_flat() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("sub");
        std::fs::create_dir(&subdir).unwrap();
        File::create(temp_dir.path().join("top.jpg")).unwrap();
        File::create(subdir.join("nested.png")).unwrap();

        let input = temp_dir.path().to_string_lossy().to_string();
        assert_eq!(collect_image_files(&input, false).unwrap().len(), 1);
        assert_eq!(collect_image_files(&input, true).unwrap().len(), 2);
    }

    #[test]
    fn test_collect_glob_pattern() {
        let temp_dir = TempDir::new().unwrap();
        File::create(temp_dir.path().join("one.jpg")).unwrap();
        File::create(temp_dir.path().join("two.png")).unwrap();
        File::create(temp_dir.path().join("three.txt")).unwrap();

        let pattern = format!("{}/*.jpg", temp_dir.path().to_string_lossy());
        let files = collect_image_files(&pattern, false).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_collect_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let files = collect_image_files(&temp_dir.path().to_string_lossy(), false).unwrap();
        assert!(files.is_empty());
    }
}
