//! The host-facing entry point: source lookup, caching and rendering.

use crate::{
    cache::TemplateCache,
    error::{Error, Result},
    render::{ParentheticalHandler, Template},
    source::{FileSource, TemplateSource, extract_body},
    value::Context,
};

/// Engine settings.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Strip an outer `<body>`/`<html>` wrapper before compiling.
    pub extract_body: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { extract_body: true }
    }
}

/// Renders templates by source id, compiling each source once.
pub struct Engine<S: TemplateSource = FileSource> {
    source: S,
    config: EngineConfig,
    handler: Option<Box<dyn ParentheticalHandler>>,
    cache: TemplateCache,
}

impl Engine<FileSource> {
    /// An engine reading templates from the filesystem.
    pub fn new() -> Self {
        Self::with_source(FileSource::new())
    }
}

impl Default for Engine<FileSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TemplateSource> Engine<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            config: EngineConfig::default(),
            handler: None,
            cache: TemplateCache::new(),
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Install the handler for modifiers other than `(html)`.
    pub fn handler(mut self, handler: impl ParentheticalHandler + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    #[inline]
    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    /// Render the template identified by `id` against `ctx`.
    ///
    /// The source is read and compiled on the first call for `id` only.
    pub fn render(&self, id: &str, ctx: &Context) -> Result<String> {
        let template = self.cache.get_or_compile(id, || {
            let raw = self
                .source
                .read(id)
                .map_err(|source| Error::TemplateSourceUnavailable {
                    id: id.to_owned(),
                    source,
                })?;
            Ok::<_, Error>(self.prepare(raw))
        })?;

        Ok(template.render(ctx, self.handler.as_deref()))
    }

    /// Compile and render `src` directly, bypassing the cache.
    pub fn render_str(&self, src: &str, ctx: &Context) -> String {
        Template::compile(&self.prepare(src.to_owned())).render(ctx, self.handler.as_deref())
    }

    fn prepare(&self, raw: String) -> String {
        if self.config.extract_body {
            extract_body(&raw).into_owned()
        } else {
            raw
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use pretty_assertions::assert_eq;
    use std::{
        collections::HashMap,
        fs, io,
        sync::atomic::{AtomicUsize, Ordering},
    };

    /// In-memory source that counts reads.
    #[derive(Default)]
    struct MemSource {
        files: HashMap<String, String>,
        reads: AtomicUsize,
    }

    impl MemSource {
        fn with(files: &[(&str, &str)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                    .collect(),
                reads: AtomicUsize::new(0),
            }
        }
    }

    impl TemplateSource for MemSource {
        fn read(&self, id: &str) -> io::Result<String> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.files
                .get(id)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, id.to_owned()))
        }
    }

    fn ctx(pairs: &[(&str, &str)]) -> Context {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), Value::from(*v)))
            .collect()
    }

    #[test]
    fn renders_by_id() {
        let engine = Engine::with_source(MemSource::with(&[("t.html", "<h2> Put title here </h2>")]));
        assert_eq!(
            engine.render("t.html", &ctx(&[("title", "Hello World!")])).unwrap(),
            "<h2> Hello World! </h2>"
        );
    }

    #[test]
    fn source_is_read_once_across_contexts() {
        let engine = Engine::with_source(MemSource::with(&[("t.html", "Put title here")]));

        assert_eq!(engine.render("t.html", &ctx(&[("title", "A")])).unwrap(), "A");
        assert_eq!(engine.render("t.html", &ctx(&[("title", "B")])).unwrap(), "B");
        assert_eq!(engine.render("t.html", &ctx(&[])).unwrap(), "");

        assert_eq!(engine.source.reads.load(Ordering::SeqCst), 1);
        assert_eq!(engine.cache().len(), 1);
    }

    #[test]
    fn unreadable_source_is_an_error() {
        let engine = Engine::with_source(MemSource::with(&[]));
        let err = engine.render("nope.html", &ctx(&[])).unwrap_err();

        let Error::TemplateSourceUnavailable { id, source } = err;
        assert_eq!(id, "nope.html");
        assert_eq!(source.kind(), io::ErrorKind::NotFound);
        assert!(engine.cache().is_empty());
    }

    #[test]
    fn body_is_extracted_by_default() {
        let page = "<html><body>\n<p>Put body here</p>\n</body></html>";
        let src = MemSource::with(&[("p.html", page)]);
        let engine = Engine::with_source(src);
        assert_eq!(
            engine.render("p.html", &ctx(&[("body", "hi")])).unwrap(),
            "<p>hi</p>"
        );

        let keep = Engine::with_source(MemSource::with(&[("p.html", page)]))
            .config(EngineConfig { extract_body: false });
        assert_eq!(
            keep.render("p.html", &ctx(&[("body", "hi")])).unwrap(),
            "<html><body>\n<p>hi</p>\n</body></html>"
        );
    }

    #[test]
    fn handler_is_consulted_for_custom_modifiers() {
        let engine = Engine::with_source(MemSource::with(&[("d.html", "<i>Put date (short) here</i>")]))
            .handler(|value: &Value, modifier: &str, _: &Context| -> String {
                match (value, modifier) {
                    (Value::Text(s), "short") => s.chars().take(4).collect(),
                    _ => String::new(),
                }
            });

        assert_eq!(
            engine.render("d.html", &ctx(&[("date", "2024-05-01")])).unwrap(),
            "<i>2024</i>"
        );
    }

    #[test]
    fn render_str_does_not_cache() {
        let engine = Engine::with_source(MemSource::default());
        assert_eq!(
            engine.render_str("Put title here", &ctx(&[("title", "Me & You")])),
            "Me &amp; You"
        );
        assert!(engine.cache().is_empty());
    }

    #[test]
    fn file_engine_renders_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "Put body (html) here").unwrap();

        let engine = Engine::new();
        let id = path.to_str().unwrap();
        assert_eq!(
            engine.render(id, &ctx(&[("body", "<b>x</b>")])).unwrap(),
            "<b>x</b>"
        );

        // Cached: later edits are not seen until evicted.
        fs::write(&path, "changed").unwrap();
        assert_eq!(engine.render(id, &ctx(&[])).unwrap(), "");
        engine.cache().evict(id);
        assert_eq!(engine.render(id, &ctx(&[])).unwrap(), "changed");
    }
}
