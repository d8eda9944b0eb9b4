//! Built-in vCard reader.
//!
//! Handles vCard 2.1, 3.0 and 4.0 content lines: line folding, group
//! prefixes (`item1.TEL`), quoted parameter values, and bare 2.1-style type
//! parameters (`TEL;WORK;VOICE:...`). Cards nested inside a property (such
//! as `AGENT`) are skipped.

use super::{VCardComponent, VCardProperty, VCardReader};
use crate::{Error, Result};

/// Line-oriented vCard reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineReader;

impl VCardReader for LineReader {
    fn read(&self, text: &str) -> Result<Vec<VCardComponent>> {
        let mut cards = Vec::new();
        let mut current: Option<VCardComponent> = None;
        let mut depth = 0usize;

        for (line_no, line) in unfold(text) {
            let Some(property) = parse_line(&line) else {
                return Err(Error::operation(
                    "parse_vcard",
                    format!("line {line_no}: expected NAME:VALUE"),
                ));
            };

            match property.name.as_str() {
                "BEGIN" if property.value.eq_ignore_ascii_case("VCARD") => {
                    depth += 1;
                    if depth == 1 {
                        current = Some(VCardComponent::new());
                    }
                },
                "END" if property.value.eq_ignore_ascii_case("VCARD") => {
                    if depth == 0 {
                        return Err(Error::operation(
                            "parse_vcard",
                            format!("line {line_no}: END:VCARD without BEGIN:VCARD"),
                        ));
                    }
                    depth -= 1;
                    if depth == 0 {
                        cards.extend(current.take());
                    }
                },
                _ if depth == 1 => {
                    if let Some(card) = current.as_mut() {
                        card.properties.push(property);
                    }
                },
                // Outside any card, or inside a nested one.
                _ => {},
            }
        }

        if depth > 0 {
            return Err(Error::operation(
                "parse_vcard",
                "unterminated vCard (missing END:VCARD)",
            ));
        }

        Ok(cards)
    }
}

/// Joins folded lines and drops blank ones.
///
/// Yields `(first physical line number, logical line)`.
fn unfold(text: &str) -> Vec<(usize, String)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        if let Some(rest) = raw.strip_prefix([' ', '\t']) {
            if let Some((_, last)) = lines.last_mut() {
                last.push_str(rest);
                continue;
            }
        }
        if !raw.trim().is_empty() {
            lines.push((i + 1, raw.to_string()));
        }
    }

    lines
}

/// Parses `[group.]NAME[;PARAM...]:VALUE`.
fn parse_line(line: &str) -> Option<VCardProperty> {
    let colon = find_value_separator(line)?;
    let (head, value) = (&line[..colon], &line[colon + 1..]);

    let mut segments = split_unquoted(head, ';').into_iter();
    let name = segments.next()?.trim();
    let name = name.rsplit_once('.').map_or(name, |(_, n)| n);
    if name.is_empty() {
        return None;
    }

    let mut property = VCardProperty::new(name, value);
    for segment in segments {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        property = match segment.split_once('=') {
            Some((key, values)) => split_unquoted(values, ',')
                .into_iter()
                .map(|v| v.trim().trim_matches('"').to_string())
                .fold(property, |prop, v| prop.with_param(key.trim(), v)),
            // vCard 2.1 bare type parameter.
            None => property.with_param("TYPE", segment),
        };
    }

    Some(property)
}

/// Finds the first `:` that is not inside a quoted parameter value.
fn find_value_separator(line: &str) -> Option<usize> {
    let mut quoted = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ':' if !quoted => return Some(i),
            _ => {},
        }
    }
    None
}

/// Splits on `sep` outside double quotes.
fn split_unquoted(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quoted = false;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if c == '"' {
            quoted = !quoted;
        } else if c == sep && !quoted {
            parts.push(&s[start..i]);
            start = i + c.len_utf8();
        }
    }
    parts.push(&s[start..]);
    parts
}
