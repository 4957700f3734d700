use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

/// Read-only handle on a text file, released when dropped
///
/// Release happens on every exit path out of the owning scope, including `?` returns.
pub struct SourceFile {
    path: PathBuf,
    reader: BufReader<File>,
}

impl SourceFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)
            .with_context(|| format!("Failed to open '{}'", path.display()))?;
        info!("Opened '{}'", path.display());

        Ok(Self {
            path,
            reader: BufReader::new(file),
        })
    }

    /// Read everything left in the file as UTF-8 text
    pub fn read_to_string(&mut self) -> Result<String> {
        let mut contents = String::new();
        self.reader
            .read_to_string(&mut contents)
            .with_context(|| format!("Failed to read '{}'", self.path.display()))?;

        Ok(contents)
    }
}

impl Drop for SourceFile {
    fn drop(&mut self) {
        info!("Released '{}'", self.path.display());
    }
}

/// Open `path`, read it whole and release it before returning
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut file = SourceFile::open(path)?;
    file.read_to_string()
}

#[test]
fn test_read_source() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/src/source.rs");
    let contents = read_source(path).expect("failed to read own source");
    assert_eq!(contents, include_str!("source.rs"));
}

#[test]
fn test_missing_file() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/src/does_not_exist.rs");
    let err = read_source(path).unwrap_err();

    assert!(err.to_string().starts_with("Failed to open '"));
    let io_err = err
        .downcast_ref::<std::io::Error>()
        .expect("root cause not io::Error");
    assert_eq!(io_err.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn test_invalid_utf8() {
    let path = std::env::temp_dir().join(format!("tour-invalid-utf8-{}", std::process::id()));
    std::fs::write(&path, [0x66, 0x6f, 0xff, 0xfe]).expect("failed to write temp file");

    let res = read_source(&path);
    let _ = std::fs::remove_file(&path);

    assert!(res.unwrap_err().to_string().starts_with("Failed to read '"));
}
