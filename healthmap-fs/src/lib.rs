//! Read-only UTF-8 filesystem helpers built on `cap-std` and `camino`.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io::{self, Read};

/// Open a UTF-8 file path using ambient authority.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Resolve an ambient directory for the given path and return the directory with the file name.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("target should include a file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Return whether a path exists and is a regular file using capability-based IO.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Read a whole UTF-8 text file.
pub fn read_utf8_to_string(path: &Utf8Path) -> io::Result<String> {
    let mut file = open_utf8_file(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Join a resource identifier onto `base`.
///
/// Leading `/` separators are stripped so web-root style identifiers such as
/// `/geojson/us-states.json` resolve inside `base` rather than at the
/// filesystem root.
pub fn resolve_under(base: &Utf8Path, identifier: &str) -> Utf8PathBuf {
    base.join(identifier.trim_start_matches('/'))
}
