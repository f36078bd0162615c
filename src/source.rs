//! Where template text comes from, and the optional `<body>` unwrap.

use regex::Regex;
use std::{
    borrow::Cow,
    fs, io,
    path::PathBuf,
    sync::LazyLock,
};
use tracing::debug;

/// Supplies raw template text for a source identifier.
pub trait TemplateSource: Send + Sync {
    fn read(&self, id: &str) -> io::Result<String>;
}

/// Reads templates from the filesystem, treating the id as a path.
#[derive(Clone, Debug, Default)]
pub struct FileSource {
    root: Option<PathBuf>,
}

impl FileSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative ids against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, id: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(id),
            None => PathBuf::from(id),
        }
    }
}

impl TemplateSource for FileSource {
    fn read(&self, id: &str) -> io::Result<String> {
        let path = self.resolve(id);
        debug!(path = %path.display(), "reading template");
        fs::read_to_string(&path)
    }
}

static BODY_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^.*?<body[^>]*>\s*").expect("body open pattern compiles"));
static BODY_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\s*</\s*body>.*$").expect("body close pattern compiles"));
static HTML_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^.*?<html[^>]*>\s*").expect("html open pattern compiles"));
static HTML_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\s*</\s*html>.*$").expect("html close pattern compiles"));

/// Strip an outer `<body>` (or, failing that, `<html>`) wrapper so that
/// fragments can be concatenated into a shared page.
///
/// Text without either tag is returned unchanged.
pub fn extract_body(html: &str) -> Cow<'_, str> {
    let (open, close) = if html.contains("<body") {
        (&*BODY_OPEN, &*BODY_CLOSE)
    } else if html.contains("<html") {
        (&*HTML_OPEN, &*HTML_CLOSE)
    } else {
        return Cow::Borrowed(html);
    };

    let sans_open = open.replace(html, "");
    let inner = close.replace(&sans_open, "").into_owned();
    debug!(before = html.len(), after = inner.len(), "extracted template body");
    Cow::Owned(inner)
}
