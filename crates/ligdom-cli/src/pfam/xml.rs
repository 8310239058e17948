//! Extraction of domain matches from Pfam protein XML documents.
//!
//! Only `<match>` elements and the `<location>` elements inside them are read.
//! The parser works by locating tags in the text rather than building a
//! document tree, so anything outside those two elements is ignored.

use ligdom::engine::annotation::{DomainDocument, DomainHit, HitLocation};
use thiserror::Error;

const MATCH_TAG: &str = "match";
const LOCATION_TAG: &str = "location";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum XmlError {
    #[error("document is not XML markup")]
    NotMarkup,
    #[error("<{tag}> start tag is never terminated")]
    UnterminatedTag { tag: &'static str },
    #[error("<{tag}> element is never closed")]
    UnclosedElement { tag: &'static str },
    #[error("<{tag}> has malformed attributes")]
    BadAttributes { tag: &'static str },
    #[error("<{tag}> is missing the '{attribute}' attribute")]
    MissingAttribute {
        tag: &'static str,
        attribute: &'static str,
    },
}

struct StartTag<'a> {
    name: &'static str,
    attributes: Vec<(&'a str, String)>,
    self_closing: bool,
    end: usize, // byte offset just past '>'
}

impl StartTag<'_> {
    fn require(&self, attribute: &'static str) -> Result<String, XmlError> {
        self.attributes
            .iter()
            .find(|(name, _)| *name == attribute)
            .map(|(_, value)| value.clone())
            .ok_or(XmlError::MissingAttribute {
                tag: self.name,
                attribute,
            })
    }
}

/// Parses the matches of a Pfam protein document, in document order.
///
/// # Errors
///
/// Returns [`XmlError`] if the text is not markup, a `<match>` is never closed,
/// or a match or location lacks one of its required attributes.
pub fn parse_domain_document(xml: &str) -> Result<DomainDocument, XmlError> {
    if !xml.trim_start().starts_with('<') {
        return Err(XmlError::NotMarkup);
    }

    let closing = format!("</{MATCH_TAG}>");
    let mut hits = Vec::new();
    let mut cursor = 0;

    while let Some(tag) = next_start_tag(xml, MATCH_TAG, cursor)? {
        let accession = tag.require("accession")?;
        let id = tag.require("id")?;

        let (body, next) = if tag.self_closing {
            ("", tag.end)
        } else {
            let close = xml[tag.end..]
                .find(&closing)
                .map(|offset| tag.end + offset)
                .ok_or(XmlError::UnclosedElement { tag: MATCH_TAG })?;
            (&xml[tag.end..close], close + closing.len())
        };

        let mut locations = Vec::new();
        let mut body_cursor = 0;
        while let Some(location) = next_start_tag(body, LOCATION_TAG, body_cursor)? {
            locations.push(HitLocation::new(
                location.require("start")?,
                location.require("end")?,
            ));
            body_cursor = location.end;
        }

        hits.push(DomainHit {
            accession,
            id,
            locations,
        });
        cursor = next;
    }

    Ok(DomainDocument { hits })
}

/// Finds the next `<name ...>` start tag at or after `from`. Tags whose name
/// merely starts with `name` (e.g. `<matches>`) are skipped.
fn next_start_tag<'a>(
    xml: &'a str,
    name: &'static str,
    from: usize,
) -> Result<Option<StartTag<'a>>, XmlError> {
    let pattern = format!("<{name}");
    let mut cursor = from;

    while let Some(offset) = xml[cursor..].find(&pattern) {
        let after_name = cursor + offset + pattern.len();
        match xml[after_name..].chars().next() {
            Some(c) if c.is_whitespace() || c == '>' || c == '/' => {}
            _ => {
                cursor = after_name;
                continue;
            }
        }

        let close = find_tag_end(xml, after_name).ok_or(XmlError::UnterminatedTag { tag: name })?;
        let inner = &xml[after_name..close];
        let (inner, self_closing) = match inner.strip_suffix('/') {
            Some(stripped) => (stripped, true),
            None => (inner, false),
        };
        let attributes = parse_attributes(inner).ok_or(XmlError::BadAttributes { tag: name })?;

        return Ok(Some(StartTag {
            name,
            attributes,
            self_closing,
            end: close + 1,
        }));
    }
    Ok(None)
}

/// Offset of the `>` closing a start tag, skipping quoted attribute values.
fn find_tag_end(xml: &str, from: usize) -> Option<usize> {
    let mut quote = None;
    for (i, c) in xml[from..].char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, '>') => return Some(from + i),
            _ => {}
        }
    }
    None
}

fn parse_attributes(mut rest: &str) -> Option<Vec<(&str, String)>> {
    let mut attributes = Vec::new();
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return Some(attributes);
        }
        let eq = rest.find('=')?;
        let name = rest[..eq].trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return None;
        }
        rest = rest[eq + 1..].trim_start();
        let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
        let value_len = rest[1..].find(quote)?;
        attributes.push((name, unescape(&rest[1..1 + value_len])));
        rest = &rest[value_len + 2..];
    }
}

/// Replaces the predefined XML entities and numeric character references.
/// Unknown entities are kept verbatim.
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let Some(semi) = rest.find(';') else {
            break;
        };
        let entity = &rest[1..semi];
        let decoded = match entity {
            "lt" => Some('<'),
            "gt" => Some('>'),
            "amp" => Some('&'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .map(|hex| u32::from_str_radix(hex, 16))
                .or_else(|| entity.strip_prefix('#').map(str::parse::<u32>))
                .and_then(|code| code.ok())
                .and_then(char::from_u32),
        };
        match decoded {
            Some(c) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
