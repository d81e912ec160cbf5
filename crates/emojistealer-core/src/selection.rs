//! The interactive selection grammar and state.
//!
//! Each input line is tokenized on whitespace, classified by its tokens, then
//! applied to the current selection:
//!
//! | Input | Effect |
//! |-------|--------|
//! | `all` | select every emoji |
//! | `none` | clear the selection |
//! | `confirm` | leave the selection loop |
//! | `quit` | exit the program |
//! | `<name>`, `emoji:<name>` | select one emoji |
//! | `pack:<name>` | select a whole category |
//! | `unselect <selectors...>` | remove instead of add |
//!
//! The four reserved words only count as the sole token on a line. Mixed
//! into a longer line they are dropped with a warning and the rest of the
//! line is processed normally.

use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::Catalog;
use crate::emoji::{Emoji, PACK_PREFIX};

const EMOJI_PREFIX: &str = "emoji:";
const UNSELECT: &str = "unselect";
const RESERVED_WORDS: [&str; 4] = ["all", "none", "confirm", "quit"];

/// A reference to one emoji or one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Emoji(String),
    Pack(String),
}

impl Selector {
    pub fn parse(token: &str) -> Self {
        if let Some(pack) = token.strip_prefix(PACK_PREFIX) {
            Selector::Pack(pack.to_string())
        } else {
            let shortcode = token.strip_prefix(EMOJI_PREFIX).unwrap_or(token);
            Selector::Emoji(shortcode.to_string())
        }
    }
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line.
    Empty,
    All,
    Clear,
    Confirm,
    Quit,
    Select(Vec<Selector>),
    Unselect(Vec<Selector>),
}

/// Non-fatal problems found while parsing or applying a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    ReservedWordIgnored(String),
    NoSuchEmoji(String),
    NoSuchPack(String),
    NotSelected(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::ReservedWordIgnored(word) => write!(
                f,
                "'{}' is ignored when other emoji/packs are provided. Please input it separately.",
                word
            ),
            Warning::NoSuchEmoji(name) => write!(f, "No such emoji: {}, ignoring", name),
            Warning::NoSuchPack(name) => write!(f, "No such pack: {}, ignoring", name),
            Warning::NotSelected(name) => write!(f, "Not selected: {}, ignoring", name),
        }
    }
}

/// Parse one line of user input.
pub fn parse_line(line: &str) -> (Command, Vec<Warning>) {
    let mut tokens: Vec<&str> = line.split_whitespace().collect();
    let mut warnings = Vec::new();

    let reserved = match tokens.as_slice() {
        [] => Some(Command::Empty),
        ["all"] => Some(Command::All),
        ["none"] => Some(Command::Clear),
        ["confirm"] => Some(Command::Confirm),
        ["quit"] => Some(Command::Quit),
        _ => None,
    };
    if let Some(command) = reserved {
        return (command, warnings);
    }

    if tokens.len() > 1 {
        for word in RESERVED_WORDS {
            if tokens.contains(&word) {
                warnings.push(Warning::ReservedWordIgnored(word.to_string()));
                tokens.retain(|t| *t != word);
            }
        }
    }

    let command = match tokens.split_first() {
        Some((&UNSELECT, rest)) => {
            Command::Unselect(rest.iter().map(|t| Selector::parse(t)).collect())
        }
        _ => Command::Select(tokens.iter().map(|t| Selector::parse(t)).collect()),
    };
    (command, warnings)
}

/// Whether a yes/no answer means yes. Empty input defaults to yes.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.is_empty() || answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// What the prompt loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Confirm,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutcome {
    pub step: Step,
    pub warnings: Vec<Warning>,
    /// False for blank lines, which leave no trace.
    pub report: bool,
}

/// The current selection over a [`Catalog`].
#[derive(Debug)]
pub struct SelectionEngine<'a> {
    catalog: &'a Catalog,
    selected: BTreeMap<String, Emoji>,
}

impl<'a> SelectionEngine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            selected: BTreeMap::new(),
        }
    }

    /// Parse and apply one input line.
    pub fn apply_line(&mut self, line: &str) -> LineOutcome {
        let (command, mut warnings) = parse_line(line);
        let mut outcome = self.apply(command);
        warnings.append(&mut outcome.warnings);
        outcome.warnings = warnings;
        outcome
    }

    pub fn apply(&mut self, command: Command) -> LineOutcome {
        let mut warnings = Vec::new();
        let step = match command {
            Command::Empty => {
                return LineOutcome {
                    step: Step::Continue,
                    warnings,
                    report: false,
                };
            }
            Command::All => {
                self.selected = self
                    .catalog
                    .all()
                    .iter()
                    .map(|e| (e.shortcode.clone(), e.clone()))
                    .collect();
                Step::Continue
            }
            Command::Clear => {
                self.selected.clear();
                Step::Continue
            }
            Command::Confirm => Step::Confirm,
            Command::Quit => Step::Quit,
            Command::Select(selectors) => {
                for selector in &selectors {
                    self.select(selector, &mut warnings);
                }
                Step::Continue
            }
            Command::Unselect(selectors) => {
                for selector in &selectors {
                    self.unselect(selector, &mut warnings);
                }
                Step::Continue
            }
        };
        LineOutcome {
            step,
            warnings,
            report: step == Step::Continue,
        }
    }

    fn select(&mut self, selector: &Selector, warnings: &mut Vec<Warning>) {
        match selector {
            Selector::Emoji(shortcode) => match self.catalog.get(shortcode) {
                Some(emoji) => {
                    self.selected.insert(shortcode.clone(), emoji.clone());
                }
                None => warnings.push(Warning::NoSuchEmoji(shortcode.clone())),
            },
            Selector::Pack(name) => match self.catalog.category(name) {
                Some(pack) => {
                    for emoji in pack {
                        self.selected.insert(emoji.shortcode.clone(), emoji.clone());
                    }
                }
                None => warnings.push(Warning::NoSuchPack(name.clone())),
            },
        }
    }

    fn unselect(&mut self, selector: &Selector, warnings: &mut Vec<Warning>) {
        match selector {
            Selector::Emoji(shortcode) => {
                if self.selected.remove(shortcode).is_none() {
                    warnings.push(Warning::NotSelected(shortcode.clone()));
                }
            }
            Selector::Pack(name) => {
                for emoji in self.catalog.category(name).unwrap_or_default() {
                    self.selected.remove(&emoji.shortcode);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected shortcodes in sorted order.
    pub fn shortcodes(&self) -> impl Iterator<Item = &str> {
        self.selected.keys().map(String::as_str)
    }

    pub fn into_selected(self) -> Vec<Emoji> {
        self.selected.into_values().collect()
    }
}
