//! Put Stuff Here: a human-first HTML templating engine.
//!
//! Templates are plain HTML in which authors write phrases like
//! `Put title here` or `insert body (html) here`. Each phrase is replaced by
//! the matching context value, HTML-escaped unless marked `(html)`.
//! There are no loops, conditionals or expressions.
//!
//! ```
//! use put_stuff_here::{Context, Template, Value};
//!
//! let mut ctx = Context::new();
//! ctx.insert("title".into(), Value::from("Me & You"));
//!
//! let out = Template::compile("<h2> Put title here </h2>").render(&ctx, None);
//! assert_eq!(out, "<h2> Me &amp; You </h2>");
//! ```

pub mod cache;
pub mod engine;
pub mod error;
pub mod render;
pub mod source;
pub mod value;

pub use cache::TemplateCache;
pub use engine::{Engine, EngineConfig};
pub use error::{Error, Result};
pub use render::{ParentheticalHandler, RAW_MODIFIER, Template, escape::escape_html, parser::Component};
pub use source::{FileSource, TemplateSource, extract_body};
pub use value::{Context, SKIPPED_SENTINEL, Value, context_from_toml, stringify};
