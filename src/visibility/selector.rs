use std::str::FromStr;

use crate::foundation::error::{RetrospectError, RetrospectResult};
use crate::visibility::dom::{Document, ElementId};

/// `tag#id.class.class` with every part optional but at least one present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, doc: &Document, el: ElementId) -> bool {
        let Some(e) = doc.get(el) else {
            return false;
        };
        if let Some(tag) = &self.tag
            && tag != e.tag()
        {
            return false;
        }
        if let Some(id) = &self.id
            && Some(id.as_str()) != e.id()
        {
            return false;
        }
        self.classes.iter().all(|c| e.has_class(c))
    }
}

/// A descendant-combinator chain of compound selectors, e.g. `section .child-1`.
///
/// Only type, universal, `#id` and `.class` selectors are understood; anything else is a
/// validation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    chain: Vec<Compound>,
}

impl Selector {
    /// Parse `src`.
    pub fn parse(src: &str) -> RetrospectResult<Self> {
        let chain = src
            .split_ascii_whitespace()
            .map(parse_compound)
            .collect::<RetrospectResult<Vec<_>>>()?;
        if chain.is_empty() {
            return Err(RetrospectError::validation("empty selector"));
        }
        Ok(Self { chain })
    }

    /// Return `true` when `el` matches; ancestors are searched for the leading compounds.
    pub fn matches(&self, doc: &Document, el: ElementId) -> bool {
        let Some((last, rest)) = self.chain.split_last() else {
            return false;
        };
        if !last.matches(doc, el) {
            return false;
        }
        let mut pending = rest.iter().rev().peekable();
        for anc in doc.ancestors(el) {
            let Some(next) = pending.peek() else {
                break;
            };
            if next.matches(doc, anc) {
                pending.next();
            }
        }
        pending.peek().is_none()
    }
}

impl FromStr for Selector {
    type Err = RetrospectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_compound(src: &str) -> RetrospectResult<Compound> {
    let mut out = Compound::default();
    let mut rest = src;

    if let Some(after) = rest.strip_prefix('*') {
        rest = after;
    } else if rest.starts_with(is_ident_start) {
        let (tag, after) = split_ident(rest);
        out.tag = Some(tag.to_ascii_lowercase());
        rest = after;
    }

    while let Some(c) = rest.chars().next() {
        let body = &rest[c.len_utf8()..];
        let (name, after) = split_ident(body);
        if name.is_empty() || !name.starts_with(is_ident_start) {
            return Err(RetrospectError::validation(format!(
                "selector '{src}': expected identifier after '{c}'"
            )));
        }
        match c {
            '.' => out.classes.push(name.to_string()),
            '#' if out.id.is_none() => out.id = Some(name.to_string()),
            '#' => {
                return Err(RetrospectError::validation(format!(
                    "selector '{src}': more than one id"
                )));
            }
            other => {
                return Err(RetrospectError::validation(format!(
                    "selector '{src}': unsupported token '{other}'"
                )));
            }
        }
        rest = after;
    }
    Ok(out)
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

fn split_ident(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !is_ident_char(c)).unwrap_or(s.len());
    s.split_at(end)
}
