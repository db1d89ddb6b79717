//! Capability-based file helpers for the ScatterScore command line.
//!
//! Paths are UTF-8 ([`camino`]) and every operation goes through a
//! [`cap_std`] directory handle opened from the path's parent, so reads and
//! writes stay scoped to that directory.
#![forbid(unsafe_code)]

use std::io::{self, Read};
use std::path::Component;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open a UTF-8 file path for reading.
///
/// # Errors
/// Returns any I/O error raised while opening the file.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Read a whole file into a string.
///
/// # Errors
/// Returns an error when the file cannot be opened or is not valid UTF-8.
pub fn read_utf8_file(path: &Utf8Path) -> io::Result<String> {
    let mut contents = String::new();
    open_utf8_file(path)?.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Write `contents` to `path`, creating missing parent directories.
///
/// An existing file is truncated.
///
/// # Errors
/// Returns an error when a parent directory cannot be created or the file
/// cannot be written.
pub fn write_utf8_file(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_dir_and_file(path)?;
    dir.write(name.as_str(), contents)
}

/// Report whether `path` exists and is a regular file.
///
/// # Errors
/// Returns an error when the parent directory cannot be opened or the
/// metadata lookup fails; a missing file surfaces as
/// [`io::ErrorKind::NotFound`].
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Create the parent directory of `path` if it is missing.
///
/// # Errors
/// Returns any I/O error raised while creating directories.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }
    let (base, relative) = base_dir_and_relative(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base.create_dir_all(&relative)
}

fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Split `parent` into an ambient base directory and the path below it.
///
/// cap-std refuses absolute paths, so absolute parents are opened from their
/// root (or Windows prefix) and the remainder is returned relative to it.
fn base_dir_and_relative(parent: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_parent = parent.as_std_path();
    let base = match std_parent.components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            Utf8PathBuf::from(prefix).join(std::path::MAIN_SEPARATOR_STR)
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR_STR),
        _ => Utf8PathBuf::from("."),
    };
    let relative = if base == "." {
        parent.to_path_buf()
    } else {
        parent
            .strip_prefix(&base)
            .map_err(|_| io::Error::other(format!("cannot strip {base} from {parent}")))?
            .to_path_buf()
    };
    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    Ok((dir, relative))
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests should fail fast when temporary files cannot be prepared"
)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("create temporary directory")
    }

    fn utf8_root(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 temp dir")
    }

    #[rstest]
    fn writes_into_missing_directories(temp_dir: TempDir) {
        let path = utf8_root(&temp_dir).join("reports/2024/points.json");
        write_utf8_file(&path, b"[]\n").expect("write report");
        assert_eq!(read_utf8_file(&path).expect("read report"), "[]\n");
        assert!(file_is_file(&path).expect("inspect report"));
    }

    #[rstest]
    fn overwrites_existing_files(temp_dir: TempDir) {
        let path = utf8_root(&temp_dir).join("axis.json");
        write_utf8_file(&path, b"first and longer").expect("first write");
        write_utf8_file(&path, b"second").expect("second write");
        assert_eq!(read_utf8_file(&path).expect("read back"), "second");
    }

    #[rstest]
    fn directories_are_not_files(temp_dir: TempDir) {
        let root = utf8_root(&temp_dir);
        let nested = root.join("nested");
        ensure_parent_dir(&nested.join("file.json")).expect("create nested");
        assert!(!file_is_file(&nested).expect("inspect directory"));
    }

    #[rstest]
    fn missing_files_report_not_found(temp_dir: TempDir) {
        let path = utf8_root(&temp_dir).join("absent.json");
        let err = file_is_file(&path).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn bare_file_names_need_no_parent() {
        ensure_parent_dir(Utf8Path::new("report.json")).expect("no parent to create");
    }
}
