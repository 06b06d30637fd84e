#![forbid(unsafe_code)]

//! Compiled `{{ field }}` templates.
//!
//! A template is parsed once into alternating literal and field parts and
//! rendered many times against caller-supplied key/value arguments.
//! Rendering never fails: a field with no matching argument re-emits its
//! token, and an unclosed `{{` marker is kept as literal text.

/// Marks the start of a template field; a segment containing this marker
/// compiles as a template, anything else as a literal.
pub(crate) const TEMPLATE_OPEN: &str = "{{";
const TEMPLATE_CLOSE: &str = "}}";

/// A parse-once, render-many template.
#[derive(Debug, Clone)]
pub(crate) struct Template {
    parts: Vec<Part>,
    /// Source length, used as the initial render-buffer capacity.
    src_len: usize,
}

#[derive(Debug, Clone)]
enum Part {
    Literal(String),
    Field(String),
}

impl Template {
    pub(crate) fn parse(source: &str) -> Self {
        let mut parts = Vec::new();
        let mut rest = source;
        while let Some(open) = rest.find(TEMPLATE_OPEN) {
            if open > 0 {
                parts.push(Part::Literal(rest[..open].to_owned()));
            }
            let after = &rest[open + TEMPLATE_OPEN.len()..];
            let Some(close) = after.find(TEMPLATE_CLOSE) else {
                // Unclosed marker: keep the tail verbatim.
                parts.push(Part::Literal(rest[open..].to_owned()));
                rest = "";
                break;
            };
            parts.push(Part::Field(after[..close].trim().to_owned()));
            rest = &after[close + TEMPLATE_CLOSE.len()..];
        }
        if !rest.is_empty() {
            parts.push(Part::Literal(rest.to_owned()));
        }
        Template {
            parts,
            src_len: source.len(),
        }
    }

    /// Substitute each field from `args`; the first matching pair wins.
    pub(crate) fn render(&self, args: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.src_len);
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Field(name) => match args.iter().find(|(n, _)| *n == name.as_str()) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push_str(TEMPLATE_OPEN);
                        out.push_str(name);
                        out.push_str(TEMPLATE_CLOSE);
                    }
                },
            }
        }
        out
    }
}
