//! The validated element table the Recognizer consults: elements indexed by
//! name and by delimiter, with matcher names already resolved.

use std::collections::HashMap;

use crate::config::ConfigError;
use crate::language::{Element, NodeType};
use crate::matching::{Matcher, Matchers};

use super::scope::counterpart;

/// How a block element was recognized at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Opening<'e> {
    pub(crate) element: &'e Element,
    pub(crate) rank: u32,
    /// bytes of the line taken up by the delimiter
    pub(crate) width: usize,
}

#[derive(Debug, Clone)]
pub struct Elements {
    list: Vec<Element>,
    names: HashMap<String, usize>,
    paragraph: usize,
    blocks: Vec<usize>,
    inlines: HashMap<char, usize>,
    prefixed: Vec<usize>,
    matchers: HashMap<usize, Matcher>,
}

fn doubled(delimiter: &str) -> Option<char> {
    let mut chars = delimiter.chars();
    let first = chars.next()?;
    let second = chars.next()?;
    if first == second && chars.next().is_none() && first.is_ascii_punctuation() {
        Some(first)
    } else {
        None
    }
}

/// A delimiter followed by either nothing or a space.
fn followed_by_space(rest: &str) -> bool {
    rest.is_empty() || rest.starts_with(' ') || rest.starts_with('\t')
}

impl Elements {
    /// Index and validate an element table. Matcher names are resolved
    /// against the supplied registry here, so an unknown one fails now rather
    /// than in the middle of a parse.
    pub fn new(list: Vec<Element>, matchers: &Matchers) -> Result<Elements, ConfigError> {
        let mut names = HashMap::new();
        let mut paragraph = None;
        let mut blocks: Vec<usize> = Vec::new();
        let mut inlines: HashMap<char, usize> = HashMap::new();
        let mut prefixed: Vec<usize> = Vec::new();
        let mut resolved = HashMap::new();

        for (i, element) in list
            .iter()
            .enumerate()
        {
            if names
                .insert(
                    element
                        .name
                        .clone(),
                    i,
                )
                .is_some()
            {
                return Err(ConfigError::DuplicateElement(
                    element
                        .name
                        .clone(),
                ));
            }

            let malformed = || ConfigError::MalformedDelimiter {
                element: element
                    .name
                    .clone(),
                delimiter: element
                    .delimiter
                    .clone(),
            };

            if element
                .separator
                .is_some()
                && element.kind != NodeType::Walled
            {
                return Err(ConfigError::InvalidSeparator(
                    element
                        .name
                        .clone(),
                ));
            }

            match element.kind {
                NodeType::Container | NodeType::Error | NodeType::Text => {
                    return Err(ConfigError::UnsupportedType {
                        element: element
                            .name
                            .clone(),
                        ty: element.kind,
                    });
                }
                NodeType::Leaf
                    if element
                        .delimiter
                        .is_empty() =>
                {
                    if let Some(first) = paragraph {
                        let first: &Element = &list[first];
                        return Err(ConfigError::DuplicateDelimiter {
                            delimiter: String::new(),
                            first: first
                                .name
                                .clone(),
                            second: element
                                .name
                                .clone(),
                        });
                    }
                    paragraph = Some(i);
                }
                NodeType::Walled
                | NodeType::VerbatimWalled
                | NodeType::Hanging
                | NodeType::RankedHanging
                | NodeType::Fenced
                | NodeType::VerbatimLine
                | NodeType::Leaf => {
                    if element
                        .delimiter
                        .trim()
                        .is_empty()
                    {
                        return Err(malformed());
                    }
                    if let Some(first) = blocks
                        .iter()
                        .find(|b| list[**b].delimiter == element.delimiter)
                    {
                        return Err(ConfigError::DuplicateDelimiter {
                            delimiter: element
                                .delimiter
                                .clone(),
                            first: list[*first]
                                .name
                                .clone(),
                            second: element
                                .name
                                .clone(),
                        });
                    }
                    blocks.push(i);
                }
                NodeType::Uniform | NodeType::Escaped => {
                    let c = doubled(&element.delimiter).ok_or_else(malformed)?;
                    if let Some(first) = inlines.insert(c, i) {
                        return Err(ConfigError::DuplicateDelimiter {
                            delimiter: element
                                .delimiter
                                .clone(),
                            first: list[first]
                                .name
                                .clone(),
                            second: element
                                .name
                                .clone(),
                        });
                    }
                }
                NodeType::Prefixed => {
                    if element
                        .delimiter
                        .is_empty()
                        || element
                            .delimiter
                            .contains(char::is_whitespace)
                    {
                        return Err(malformed());
                    }
                    if let Some(first) = prefixed
                        .iter()
                        .find(|p| list[**p].delimiter == element.delimiter)
                    {
                        return Err(ConfigError::DuplicateDelimiter {
                            delimiter: element
                                .delimiter
                                .clone(),
                            first: list[*first]
                                .name
                                .clone(),
                            second: element
                                .name
                                .clone(),
                        });
                    }
                    prefixed.push(i);
                }
            }

            if let Some(name) = &element.matcher {
                let matcher = matchers
                    .get(name)
                    .ok_or_else(|| ConfigError::UnknownMatcher {
                        element: element
                            .name
                            .clone(),
                        matcher: name.clone(),
                    })?;
                resolved.insert(i, matcher);
            }
        }

        let paragraph = paragraph.ok_or(ConfigError::MissingParagraph)?;

        // longest delimiters are tried first
        blocks.sort_by_key(|b| {
            std::cmp::Reverse(
                list[*b]
                    .delimiter
                    .len(),
            )
        });
        prefixed.sort_by_key(|p| {
            std::cmp::Reverse(
                list[*p]
                    .delimiter
                    .len(),
            )
        });

        Ok(Elements {
            list,
            names,
            paragraph,
            blocks,
            inlines,
            prefixed,
            matchers: resolved,
        })
    }

    pub fn get(&self, name: &str) -> Option<&Element> {
        self.names
            .get(name)
            .map(|i| &self.list[*i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.list
            .iter()
    }

    /// The default Leaf element that plain runs of lines become.
    pub fn paragraph(&self) -> &Element {
        &self.list[self.paragraph]
    }

    /// The block element whose delimiter starts this (already de-indented)
    /// line, if any.
    pub(crate) fn block_at(&self, line: &str) -> Option<Opening<'_>> {
        for i in &self.blocks {
            let element = &self.list[*i];
            let delimiter = element
                .delimiter
                .as_str();

            if !line.starts_with(delimiter) {
                continue;
            }

            match element.kind {
                NodeType::RankedHanging => {
                    let mut rank = 0;
                    let mut rest = line;
                    while let Some(remainder) = rest.strip_prefix(delimiter) {
                        rank += 1;
                        rest = remainder;
                    }
                    if followed_by_space(rest) {
                        return Some(Opening {
                            element,
                            rank,
                            width: line.len() - rest.len(),
                        });
                    }
                }
                NodeType::Hanging | NodeType::Leaf => {
                    if followed_by_space(&line[delimiter.len()..]) {
                        return Some(Opening {
                            element,
                            rank: 0,
                            width: delimiter.len(),
                        });
                    }
                }
                _ => {
                    return Some(Opening {
                        element,
                        rank: 0,
                        width: delimiter.len(),
                    })
                }
            }
        }
        None
    }

    /// The Uniform or Escaped element opened by a doubled character.
    pub(crate) fn inline_for(&self, c: char) -> Option<&Element> {
        self.inlines
            .get(&c)
            .map(|i| &self.list[*i])
    }

    /// The Prefixed element whose delimiter starts the input, with its
    /// matcher.
    pub(crate) fn prefixed_at(&self, input: &str) -> Option<(&Element, Option<Matcher>)> {
        self.prefixed
            .iter()
            .find(|i| input.starts_with(self.list[**i].delimiter.as_str()))
            .map(|i| {
                (
                    &self.list[*i],
                    self.matchers
                        .get(i)
                        .copied(),
                )
            })
    }

    /// How many bytes following a backslash are taken literally: one ASCII
    /// punctuation character, or a whole Prefixed delimiter that doesn't
    /// itself start with punctuation. None means the backslash is just a
    /// backslash.
    pub(crate) fn escape_length(&self, input: &str) -> Option<usize> {
        let c = input
            .chars()
            .next()?;
        if c.is_ascii_punctuation() {
            return Some(1);
        }
        self.prefixed
            .iter()
            .map(|i| &self.list[*i].delimiter)
            .find(|delimiter| input.starts_with(delimiter.as_str()))
            .map(|delimiter| delimiter.len())
    }

    /// Whether a character can start an inline delimiter (open or close);
    /// used when writing text back out to know what needs escaping.
    pub(crate) fn is_inline_delimiter(&self, c: char) -> bool {
        self.inlines
            .keys()
            .any(|d| *d == c || counterpart(*d) == c)
    }

    pub(crate) fn prefixed_delimiters(&self) -> impl Iterator<Item = &str> {
        self.prefixed
            .iter()
            .map(|i| {
                self.list[*i]
                    .delimiter
                    .as_str()
            })
    }
}
