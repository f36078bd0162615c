//! Compiled templates and the renderer.

pub mod escape;
pub mod parser;

use crate::value::{Context, Value, stringify};
use escape::escape_html;
use parser::Component;

/// Modifier that inserts a value without HTML escaping: `Put body (html) here`.
pub const RAW_MODIFIER: &str = "html";

/// Renders modifiers the engine does not interpret itself, such as
/// `Put date (short) here`.
///
/// The returned string is inserted verbatim; escaping is the handler's job.
pub trait ParentheticalHandler: Send + Sync {
    fn render(&self, value: &Value, modifier: &str, context: &Context) -> String;
}

impl<F> ParentheticalHandler for F
where
    F: Fn(&Value, &str, &Context) -> String + Send + Sync,
{
    fn render(&self, value: &Value, modifier: &str, context: &Context) -> String {
        self(value, modifier, context)
    }
}

/// An immutable, compiled template. Holds no render state, so one instance
/// can serve any number of concurrent renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    components: Vec<Component>,
}

impl Template {
    pub fn compile(src: &str) -> Self {
        Self {
            components: parser::compile(src),
        }
    }

    #[inline]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Render against `ctx`.
    ///
    /// Variables missing from `ctx` render as nothing. Values are escaped
    /// unless marked `(html)` or handed to `handler`.
    pub fn render(&self, ctx: &Context, handler: Option<&dyn ParentheticalHandler>) -> String {
        let capacity: usize = self
            .components
            .iter()
            .map(|c| match c {
                Component::Literal(t) => t.len(),
                Component::Variable { name, .. } => match ctx.get(name) {
                    Some(Value::Text(s)) => s.len(),
                    Some(_) => 8,
                    None => 0,
                },
            })
            .sum();

        let mut out = String::with_capacity(capacity);

        for component in &self.components {
            match component {
                Component::Literal(t) => out.push_str(t),
                Component::Variable { name, modifier } => {
                    let Some(value) = ctx.get(name) else {
                        continue;
                    };
                    match (modifier.as_deref(), handler) {
                        (Some(RAW_MODIFIER), _) => out.push_str(&stringify(value)),
                        (Some(m), Some(h)) => out.push_str(&h.render(value, m, ctx)),
                        // Unknown modifier with nobody to ask: render as plain.
                        (Some(_), None) | (None, _) => {
                            out.push_str(&escape_html(&stringify(value)))
                        }
                    }
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx(pairs: &[(&str, Value)]) -> Context {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    fn render(src: &str, pairs: &[(&str, Value)]) -> String {
        Template::compile(src).render(&ctx(pairs), None)
    }

    #[test]
    fn heading() {
        assert_eq!(
            render("<h2> Put title here </h2>", &[("title", "Hello World!".into())]),
            "<h2> Hello World! </h2>"
        );
    }

    #[test]
    fn html_modifier_is_unescaped() {
        assert_eq!(
            render("Put body (html) here", &[("body", "<b>x</b>".into())]),
            "<b>x</b>"
        );
    }

    #[test]
    fn values_are_escaped_by_default() {
        assert_eq!(
            render("Put title here", &[("title", "Me & You".into())]),
            "Me &amp; You"
        );
    }

    #[test]
    fn missing_variable_renders_empty() {
        assert_eq!(render("Put missing here", &[]), "");
    }

    #[test]
    fn unknown_modifier_without_handler_falls_back() {
        assert_eq!(
            render("Put date (short) here", &[("date", "2024".into())]),
            "2024"
        );
        assert_eq!(
            render("Put name (shout) here", &[("name", "<Ben>".into())]),
            "&lt;Ben&gt;"
        );
    }

    #[test]
    fn literal_only_template_is_unchanged() {
        let src = "<p class=\"x\">No placeholders & no problem</p>";
        assert_eq!(render(src, &[("title", "ignored".into())]), src);
    }

    #[test]
    fn missing_key_removes_only_the_placeholder() {
        assert_eq!(
            render("<p>A Put gone here B</p>", &[]),
            render("<p>A  B</p>", &[])
        );
    }

    #[test]
    fn full_document() {
        let src = "<h2> Put title here </h2>\n<p>\nPut body here\n</p>\n<p>\n– <em>  put author here  </em>\n</p>";
        let out = render(
            src,
            &[
                ("title", "Hello World!".into()),
                ("body", "This is an example.".into()),
                ("author", "Ben Syverson".into()),
            ],
        );
        assert_eq!(
            out,
            "<h2> Hello World! </h2>\n<p>\nThis is an example.\n</p>\n<p>\n– <em>  Ben Syverson  </em>\n</p>"
        );
    }

    #[test]
    fn numbers_booleans_and_opaque_values() {
        assert_eq!(
            render(
                "Put num here / Put ratio here / Put flag here / Put list here",
                &[
                    ("num", 3.into()),
                    ("ratio", 2.5.into()),
                    ("flag", true.into()),
                    ("list", Value::Opaque("array".into())),
                ]
            ),
            "3 / 2.5 / true / <!--[skipped unknown type]-->"
        );
    }

    #[test]
    fn handler_output_is_verbatim() {
        let handler = |value: &Value, modifier: &str, _: &Context| -> String {
            format!("<{modifier}>{}</{modifier}>", stringify(value))
        };
        let out = Template::compile("Put date (short) here").render(
            &ctx(&[("date", "2024 & on".into())]),
            Some(&handler),
        );
        assert_eq!(out, "<short>2024 & on</short>");
    }

    #[test]
    fn handler_sees_full_context() {
        let handler = |value: &Value, _: &str, ctx: &Context| -> String {
            let unit = ctx.get("unit").map(stringify).unwrap_or_default();
            format!("{}{unit}", stringify(value))
        };
        let out = Template::compile("Put price (money) here").render(
            &ctx(&[("price", 12.into()), ("unit", "€".into())]),
            Some(&handler),
        );
        assert_eq!(out, "12€");
    }

    #[test]
    fn handler_is_not_called_for_html_or_missing() {
        let handler = |_: &Value, _: &str, _: &Context| -> String {
            panic!("handler must not run")
        };
        let out = Template::compile("Put raw (html) here, Put gone (x) here").render(
            &ctx(&[("raw", "<i>".into())]),
            Some(&handler),
        );
        assert_eq!(out, "<i>, ");
    }
}
