//! Defines the file unit that flows through a pipeline.
//!
//! A `FileUnit` is built upstream (by discovery or by a caller), passed through
//! the stages, and consumed downstream. Stages mutate it in place: the contents
//! may be replaced and the `is_prettier` flag set.

use serde_json::Value;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tokio::io::AsyncRead;

/// The payload of a file unit. Exactly one variant describes it at any time.
pub enum Contents {
    /// No contents (e.g. a directory entry). Forwarded untouched.
    Null,
    /// Fully materialized contents.
    Buffer(Vec<u8>),
    /// A live byte stream. Legal input, but rejected by the stages.
    Stream(Box<dyn AsyncRead + Send + Unpin>),
}

// Custom Debug implementation, as the stream variant holds a trait object.
impl fmt::Debug for Contents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contents::Null => f.write_str("Null"),
            Contents::Buffer(bytes) => f.debug_tuple("Buffer").field(&bytes.len()).finish(),
            Contents::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl Default for Contents {
    fn default() -> Self {
        Contents::Null
    }
}

/// One file moving through the pipeline.
///
/// # Examples
///
/// ```
/// use prettier_pipe::core_types::{Contents, FileUnit};
///
/// let file = FileUnit::new("/work", "/work/src", "/work/src/app.js")
///     .with_contents(Contents::Buffer(b"let a = 1".to_vec()));
///
/// assert!(file.is_buffer());
/// assert_eq!(file.relative().to_str(), Some("app.js"));
/// assert!(!file.is_prettier);
/// ```
#[derive(Debug, Default)]
pub struct FileUnit {
    /// Working directory the unit was created under.
    pub cwd: PathBuf,
    /// Base directory; `relative()` is computed against it.
    pub base: PathBuf,
    /// Absolute path of the file.
    pub path: PathBuf,
    /// The payload.
    pub contents: Contents,
    /// Source map attached by an earlier stage, if any.
    pub source_map: Option<Value>,
    /// Set to `true` when the formatter changed the contents.
    pub is_prettier: bool,
}

impl FileUnit {
    /// Creates a unit with no contents.
    pub fn new(
        cwd: impl Into<PathBuf>,
        base: impl Into<PathBuf>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            cwd: cwd.into(),
            base: base.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_contents(mut self, contents: Contents) -> Self {
        self.contents = contents;
        self
    }

    pub fn with_source_map(mut self, source_map: Value) -> Self {
        self.source_map = Some(source_map);
        self
    }

    pub fn is_null(&self) -> bool {
        matches!(self.contents, Contents::Null)
    }

    pub fn is_buffer(&self) -> bool {
        matches!(self.contents, Contents::Buffer(_))
    }

    pub fn is_stream(&self) -> bool {
        matches!(self.contents, Contents::Stream(_))
    }

    /// The buffered bytes, if the contents are a buffer.
    pub fn buffer(&self) -> Option<&[u8]> {
        match &self.contents {
            Contents::Buffer(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Path relative to `base`. Falls back to the full path when it is not under `base`.
    pub fn relative(&self) -> PathBuf {
        self.path
            .strip_prefix(&self.base)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| self.path.clone())
    }
}

/// Computes `to` relative to `from`, climbing with `..` where needed.
///
/// Both paths are expected to be absolute (or both relative to the same root).
///
/// ```
/// use prettier_pipe::core_types::relative_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(relative_path(Path::new("/a/b"), Path::new("/a/b/c/d.js")), PathBuf::from("c/d.js"));
/// assert_eq!(relative_path(Path::new("/a/b"), Path::new("/a/x/d.js")), PathBuf::from("../x/d.js"));
/// ```
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component> = from
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let to: Vec<Component> = to
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let shared = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in shared..from.len() {
        relative.push("..");
    }
    for component in &to[shared..] {
        relative.push(component.as_os_str());
    }
    relative
}

/// Renders a path with `/` separators regardless of the host convention.
///
/// Only the host's own separator is rewritten; on Unix a backslash is part of
/// the file name.
pub fn to_slash(path: &Path) -> String {
    let rendered = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        rendered.into_owned()
    } else {
        rendered.replace(std::path::MAIN_SEPARATOR, "/")
    }
}
