//! Inline style declarations (`style="top: 5px; color: red"`)

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Property name -> raw value, in declaration order.
///
/// Keys are case-sensitive as authored. Re-inserting an existing key keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: Vec<(String, String)>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a declaration list.
    ///
    /// Declarations split on `;`, then on the first `:`. Both sides are
    /// trimmed and fragments missing either side are skipped. Separators
    /// inside parentheses or quotes (e.g. `url(data:image/png;base64,...)`)
    /// do not split.
    pub fn parse(declarations: &str) -> Self {
        let mut map = Self::new();
        for fragment in split_top_level(declarations, ';') {
            let Some((property, value)) = split_once_top_level(fragment, ':') else {
                continue;
            };
            let (property, value) = (property.trim(), value.trim());
            if property.is_empty() || value.is_empty() {
                continue;
            }
            map.insert(property, value);
        }
        map
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    /// Upsert; returns the previous value
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let property = property.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == property) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((property, value));
                None
            }
        }
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == property)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write as `prop: value; ` pairs in map order
    pub fn to_declarations(&self) -> String {
        let mut out = String::new();
        for (property, value) in self.iter() {
            out.push_str(property);
            out.push_str(": ");
            out.push_str(value);
            out.push_str("; ");
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for StyleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StyleMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StyleMapVisitor;

        impl<'de> Visitor<'de> for StyleMapVisitor {
            type Value = StyleMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of CSS property names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<StyleMap, A::Error> {
                let mut map = StyleMap::new();
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    map.insert(k, v);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(StyleMapVisitor)
    }
}

/// Read a CSS length the way `parseInt` does: optional sign, then leading
/// decimal digits; anything after them (`px`, `%`, `.5`) is ignored.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Out-of-range values clamp to the i64 bounds
    Some(match digits[..end].parse::<i64>() {
        Ok(n) => sign * n,
        Err(_) if sign < 0 => i64::MIN,
        Err(_) => i64::MAX,
    })
}

/// Raw declarations of a `style` attribute, trimmed, empty ones dropped.
/// Semicolons inside parentheses or quotes do not split.
pub fn raw_declarations(input: &str) -> impl Iterator<Item = &str> {
    split_top_level(input, ';')
        .into_iter()
        .map(str::trim)
        .filter(|decl| !decl.is_empty())
}

fn split_top_level(input: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (i, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, c) if c == separator && depth == 0 => {
                parts.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

fn split_once_top_level(input: &str, separator: char) -> Option<(&str, &str)> {
    let parts = split_top_level(input, separator);
    let first = parts.first()?;
    if parts.len() < 2 {
        return None;
    }
    Some((first, &input[first.len() + separator.len_utf8()..]))
}
