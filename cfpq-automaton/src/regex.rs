//! Compiles regular expressions into deterministic automata over edge labels.
//!
//! A label is a maximal run of characters that are neither whitespace nor regex
//! syntax, so `subClassOf*` repeats one label and `a b|c` concatenates two.
//! Classes such as `[a-c]` stand for one-character labels, and `epsilon` stands
//! for the empty word.

use std::collections::BTreeMap;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use log::debug;
use regex_syntax::hir::{Class, Hir, HirKind};
use regex_syntax::Parser;

use crate::automaton::{Automaton, StateId};

/// The largest character class that is expanded into transitions.
pub const MAX_CLASS_SIZE: usize = 256;
/// The largest bound of a counted repetition.
pub const MAX_REPETITION: u32 = 256;
/// The largest number of states of the automaton built before determinization.
pub const MAX_NFA_STATES: usize = 1 << 16;

const EPSILON: [&str; 4] = ["epsilon", "ε", "ϵ", "Є"];

/// Labels are parsed as characters of the supplementary private use area A.
const WORD_BASE: u32 = 0xF_0000;
const MAX_WORDS: usize = 0xFFFE;

/// Represents an error when compiling a regular expression.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RegexError {
    /// The pattern is not a valid regular expression.
    Syntax(String),
    /// The pattern uses a feature that has no meaning for paths, such as
    /// anchors, or it is too large to expand.
    Unsupported(String),
    /// A character class has too many characters to expand.
    ClassTooLarge {
        /// Number of characters in the class.
        size: usize,
        /// The largest allowed class.
        limit: usize,
    },
}

impl fmt::Display for RegexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RegexError::Syntax(reason) => write!(f, "invalid regular expression: {}", reason),
            RegexError::Unsupported(what) => write!(f, "unsupported in path queries: {}", what),
            RegexError::ClassTooLarge { size, limit } => write!(
                f,
                "character class of {} characters exceeds the limit of {}",
                size, limit
            ),
        }
    }
}

impl std::error::Error for RegexError {}

/// The pattern with every label replaced by one placeholder character.
#[derive(Default)]
struct Words {
    pattern: String,
    words: Vec<String>,
    placeholders: BTreeMap<String, char>,
}

impl Words {
    fn split(pattern: &str) -> Result<Self, RegexError> {
        let mut result = Words::default();
        let mut word = String::new();
        let mut chars = pattern.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch.is_whitespace() {
                result.flush(&mut word)?;
                continue;
            }
            match ch {
                '\\' => {
                    result.flush(&mut word)?;
                    result.pattern.push(ch);
                    copy_escape(&mut chars, &mut result.pattern);
                }
                '[' => {
                    result.flush(&mut word)?;
                    result.pattern.push(ch);
                    copy_class(&mut chars, &mut result.pattern);
                }
                '{' => {
                    result.flush(&mut word)?;
                    result.pattern.push(ch);
                    copy_through(&mut chars, &mut result.pattern, &['}']);
                }
                '(' => {
                    result.flush(&mut word)?;
                    result.pattern.push(ch);
                    if chars.peek() == Some(&'?') {
                        copy_through(&mut chars, &mut result.pattern, &[':', ')', '>']);
                    }
                }
                '|' | '*' | '+' | '?' | ')' | '.' | '^' | '$' => {
                    result.flush(&mut word)?;
                    result.pattern.push(ch);
                }
                _ => word.push(ch),
            }
        }
        result.flush(&mut word)?;
        Ok(result)
    }

    fn flush(&mut self, word: &mut String) -> Result<(), RegexError> {
        if word.is_empty() {
            return Ok(());
        }
        if EPSILON.contains(&word.as_str()) {
            self.pattern.push_str("(?:)");
        } else {
            let placeholder = match self.placeholders.get(word.as_str()).copied() {
                Some(placeholder) => placeholder,
                None => {
                    let placeholder = u32::try_from(self.words.len())
                        .ok()
                        .filter(|_| self.words.len() < MAX_WORDS)
                        .and_then(|id| char::from_u32(WORD_BASE + id))
                        .ok_or_else(|| {
                            RegexError::Unsupported(format!("more than {} labels", MAX_WORDS))
                        })?;
                    self.words.push(word.clone());
                    self.placeholders.insert(word.clone(), placeholder);
                    placeholder
                }
            };
            self.pattern.push(placeholder);
        }
        word.clear();
        Ok(())
    }

    /// Returns the label of a literal character of the rewritten pattern.
    fn label(&self, ch: char) -> String {
        let id = (ch as u32).wrapping_sub(WORD_BASE) as usize;
        match self.words.get(id) {
            Some(word) if ch as u32 >= WORD_BASE => word.clone(),
            _ => ch.to_string(),
        }
    }
}

fn copy_through(chars: &mut Peekable<Chars>, out: &mut String, stops: &[char]) {
    for ch in chars.by_ref() {
        out.push(ch);
        if stops.contains(&ch) {
            break;
        }
    }
}

fn copy_escape(chars: &mut Peekable<Chars>, out: &mut String) {
    let ch = match chars.next() {
        Some(ch) => ch,
        None => return,
    };
    out.push(ch);
    let digits = match ch {
        'x' => 2,
        'u' => 4,
        'U' => 8,
        'p' | 'P' => 1,
        _ => return,
    };
    if chars.peek() == Some(&'{') {
        copy_through(chars, out, &['}']);
    } else {
        out.extend(chars.by_ref().take(digits));
    }
}

/// Copies a bracketed class, after its opening `[`, including nested classes.
fn copy_class(chars: &mut Peekable<Chars>, out: &mut String) {
    fn copy_leading(chars: &mut Peekable<Chars>, out: &mut String) {
        if let Some(ch) = chars.next_if_eq(&'^') {
            out.push(ch);
        }
        // A `]` right after the opening bracket is a literal.
        if let Some(ch) = chars.next_if_eq(&']') {
            out.push(ch);
        }
    }
    copy_leading(chars, out);
    let mut depth = 1;
    while let Some(ch) = chars.next() {
        out.push(ch);
        match ch {
            '\\' => out.extend(chars.next()),
            '[' => {
                depth += 1;
                copy_leading(chars, out);
            }
            ']' => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
    }
}

/// A piece of the automaton with one entry and one exit.
#[derive(Clone, Copy)]
struct Fragment {
    start: StateId,
    accept: StateId,
}

struct Translator {
    nfa: Automaton,
    words: Words,
}

impl Translator {
    fn state(&mut self) -> Result<StateId, RegexError> {
        if self.nfa.num_states() >= MAX_NFA_STATES {
            return Err(RegexError::Unsupported(format!(
                "expansion into more than {} states",
                MAX_NFA_STATES
            )));
        }
        Ok(self.nfa.add_state())
    }

    fn fragment(&mut self) -> Result<Fragment, RegexError> {
        let start = self.state()?;
        let accept = self.state()?;
        Ok(Fragment { start, accept })
    }

    fn empty(&mut self) -> Result<Fragment, RegexError> {
        let state = self.state()?;
        Ok(Fragment {
            start: state,
            accept: state,
        })
    }

    fn labels(
        &mut self,
        labels: impl IntoIterator<Item = String>,
    ) -> Result<Fragment, RegexError> {
        let fragment = self.fragment()?;
        for label in labels {
            self.nfa.add_transition(fragment.start, &label, fragment.accept);
        }
        Ok(fragment)
    }

    fn concat(&mut self, fragments: Vec<Fragment>) -> Result<Fragment, RegexError> {
        let mut iter = fragments.into_iter();
        let first = match iter.next() {
            Some(first) => first,
            None => return self.empty(),
        };
        let mut accept = first.accept;
        for next in iter {
            self.nfa.add_epsilon(accept, next.start);
            accept = next.accept;
        }
        Ok(Fragment {
            start: first.start,
            accept,
        })
    }

    fn optional(&mut self, inner: Fragment) -> Result<Fragment, RegexError> {
        let outer = self.fragment()?;
        self.nfa.add_epsilon(outer.start, inner.start);
        self.nfa.add_epsilon(outer.start, outer.accept);
        self.nfa.add_epsilon(inner.accept, outer.accept);
        Ok(outer)
    }

    fn star(&mut self, inner: Fragment) -> Result<Fragment, RegexError> {
        let outer = self.optional(inner)?;
        self.nfa.add_epsilon(inner.accept, inner.start);
        Ok(outer)
    }

    fn walk(&mut self, hir: &Hir) -> Result<Fragment, RegexError> {
        match hir.kind() {
            HirKind::Empty => self.empty(),
            HirKind::Literal(literal) => {
                let text = std::str::from_utf8(&literal.0).map_err(|_| {
                    RegexError::Unsupported("literal bytes that are not UTF-8".to_string())
                })?;
                let fragments = text
                    .chars()
                    .map(|ch| {
                        let label = self.words.label(ch);
                        self.labels([label])
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                self.concat(fragments)
            }
            HirKind::Class(class) => {
                let chars: Vec<char> = match class {
                    Class::Unicode(unicode) => {
                        let size: usize = unicode
                            .ranges()
                            .iter()
                            .map(|range| range.end() as usize - range.start() as usize + 1)
                            .sum();
                        check_class_size(size)?;
                        unicode
                            .ranges()
                            .iter()
                            .flat_map(|range| range.start()..=range.end())
                            .collect()
                    }
                    Class::Bytes(bytes) => {
                        let size: usize = bytes
                            .ranges()
                            .iter()
                            .map(|range| range.end() as usize - range.start() as usize + 1)
                            .sum();
                        check_class_size(size)?;
                        bytes
                            .ranges()
                            .iter()
                            .flat_map(|range| range.start()..=range.end())
                            .map(char::from)
                            .collect()
                    }
                };
                self.labels(chars.into_iter().map(String::from))
            }
            HirKind::Look(look) => Err(RegexError::Unsupported(format!(
                "look-around assertion {:?}",
                look
            ))),
            HirKind::Repetition(repetition) => {
                let too_large = |bound: u32| bound > MAX_REPETITION;
                if too_large(repetition.min) || repetition.max.map_or(false, too_large) {
                    return Err(RegexError::Unsupported(format!(
                        "repetition bound above {}",
                        MAX_REPETITION
                    )));
                }
                // `x{n,m}` is `n` copies of `x` followed by `m - n` optional copies.
                // `x{n,}` ends with a starred copy instead.
                let mut copies = vec![];
                for _ in 0..repetition.min {
                    copies.push(self.walk(&repetition.sub)?);
                }
                match repetition.max {
                    None => {
                        let inner = self.walk(&repetition.sub)?;
                        copies.push(self.star(inner)?);
                    }
                    Some(max) => {
                        for _ in repetition.min..max {
                            let inner = self.walk(&repetition.sub)?;
                            copies.push(self.optional(inner)?);
                        }
                    }
                }
                self.concat(copies)
            }
            HirKind::Capture(capture) => self.walk(&capture.sub),
            HirKind::Concat(hirs) => {
                let fragments = hirs
                    .iter()
                    .map(|hir| self.walk(hir))
                    .collect::<Result<Vec<_>, _>>()?;
                self.concat(fragments)
            }
            HirKind::Alternation(hirs) => {
                let outer = self.fragment()?;
                for hir in hirs {
                    let inner = self.walk(hir)?;
                    self.nfa.add_epsilon(outer.start, inner.start);
                    self.nfa.add_epsilon(inner.accept, outer.accept);
                }
                Ok(outer)
            }
        }
    }
}

fn check_class_size(size: usize) -> Result<(), RegexError> {
    if size > MAX_CLASS_SIZE {
        Err(RegexError::ClassTooLarge {
            size,
            limit: MAX_CLASS_SIZE,
        })
    } else {
        Ok(())
    }
}

impl Automaton {
    /// Compiles a regular expression into a minimal deterministic automaton.
    ///
    /// Labels are runs of characters separated by whitespace and regex syntax.
    /// Each character of a class is a label of its own.
    ///
    /// # Errors
    ///
    /// Fails on syntax errors, anchors and look-arounds, character classes
    /// larger than [`MAX_CLASS_SIZE`] and repetitions that expand beyond
    /// [`MAX_NFA_STATES`].
    pub fn from_regex(pattern: &str) -> Result<Automaton, RegexError> {
        let words = Words::split(pattern)?;
        let hir = Parser::new()
            .parse(&words.pattern)
            .map_err(|error| RegexError::Syntax(error.to_string()))?;
        let mut translator = Translator {
            nfa: Automaton::new(),
            words,
        };
        let fragment = translator.walk(&hir)?;
        let mut nfa = translator.nfa;
        nfa.add_start(fragment.start);
        nfa.add_final(fragment.accept);
        debug!(
            "compiled {:?} into {} nondeterministic states",
            pattern,
            nfa.num_states()
        );
        Ok(nfa.determinize().minimize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepts(dfa: &Automaton, words: &[&str]) -> bool {
        dfa.accepts(words.iter().copied())
    }

    #[test]
    fn test_runs_of_characters_are_labels() {
        let dfa = Automaton::from_regex("(td)|(tc)|x").unwrap();
        assert!(accepts(&dfa, &["td"]));
        assert!(!accepts(&dfa, &["tdx"]));
        assert!(accepts(&dfa, &["x"]));
        assert!(!accepts(&dfa, &["asfas"]));
        assert!(accepts(&dfa, &["tc"]));
        assert!(!accepts(&dfa, &["t", "d"]));
    }

    #[test]
    fn test_whitespace_separates_labels() {
        let dfa = Automaton::from_regex("a|b b").unwrap();
        assert!(dfa.is_deterministic());
        assert!(accepts(&dfa, &["a"]));
        assert!(accepts(&dfa, &["b", "b"]));
        assert!(!accepts(&dfa, &["bb"]));
        assert!(!accepts(&dfa, &["b"]));
        assert!(!accepts(&dfa, &[]));

        let dfa = Automaton::from_regex("a|bb").unwrap();
        assert!(accepts(&dfa, &["bb"]));
        assert!(!accepts(&dfa, &["b", "b"]));
    }

    #[test]
    fn test_operators_bind_whole_labels() {
        let dfa = Automaton::from_regex("subClassOf* type").unwrap();
        assert!(accepts(&dfa, &["type"]));
        assert!(accepts(&dfa, &["subClassOf", "subClassOf", "type"]));
        assert!(!accepts(&dfa, &["subClassO", "type"]));
        assert_eq!(
            dfa.labels().into_iter().collect::<Vec<_>>(),
            vec!["subClassOf", "type"]
        );
    }

    #[test]
    fn test_epsilon_words() {
        let dfa = Automaton::from_regex("A | ab | epsilon").unwrap();
        assert!(accepts(&dfa, &[]));
        assert!(accepts(&dfa, &["A"]));
        assert!(accepts(&dfa, &["ab"]));
        assert!(!accepts(&dfa, &["epsilon"]));

        let dfa = Automaton::from_regex("a ε b").unwrap();
        assert!(accepts(&dfa, &["a", "b"]));
    }

    #[test]
    fn test_stars() {
        let dfa = Automaton::from_regex("0*1*").unwrap();
        let words: [&[&str]; 5] = [&[], &["0"], &["1"], &["0", "0", "1", "1"], &["1", "1", "1"]];
        for word in words {
            assert!(accepts(&dfa, word), "{:?}", word);
        }
        assert!(!accepts(&dfa, &["1", "0"]));
    }

    #[test]
    fn test_counted_repetition() {
        let dfa = Automaton::from_regex("(a b){2,3}").unwrap();
        assert!(!accepts(&dfa, &["a", "b"]));
        assert!(accepts(&dfa, &["a", "b", "a", "b"]));
        assert!(accepts(&dfa, &["a", "b", "a", "b", "a", "b"]));
        assert!(!accepts(&dfa, &["a", "b", "a", "b", "a", "b", "a", "b"]));

        let dfa = Automaton::from_regex("ab{2,}").unwrap();
        assert!(!accepts(&dfa, &["ab"]));
        assert!(accepts(&dfa, &["ab"; 5]));
    }

    #[test]
    fn test_class() {
        let dfa = Automaton::from_regex("[a-c]x?").unwrap();
        assert!(accepts(&dfa, &["b"]));
        assert!(accepts(&dfa, &["c", "x"]));
        assert!(!accepts(&dfa, &["d"]));
        assert_eq!(
            dfa.labels().into_iter().collect::<Vec<_>>(),
            vec!["a", "b", "c", "x"]
        );

        let dfa = Automaton::from_regex(r"[]\]]foo").unwrap();
        assert!(accepts(&dfa, &["]", "foo"]));
    }

    #[test]
    fn test_escapes_are_kept() {
        let dfa = Automaton::from_regex(r"\x41\u{42}|\*").unwrap();
        assert!(accepts(&dfa, &["A", "B"]));
        assert!(accepts(&dfa, &["*"]));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            Automaton::from_regex("a("),
            Err(RegexError::Syntax(_))
        ));
        assert!(matches!(
            Automaton::from_regex("^a"),
            Err(RegexError::Unsupported(_))
        ));
        assert!(matches!(
            Automaton::from_regex("a$"),
            Err(RegexError::Unsupported(_))
        ));
        assert!(matches!(
            Automaton::from_regex("."),
            Err(RegexError::ClassTooLarge { .. })
        ));
        assert!(matches!(
            Automaton::from_regex("a{1000}"),
            Err(RegexError::Unsupported(_))
        ));
    }

    #[test]
    fn test_nested_repetition_is_capped() {
        assert!(matches!(
            Automaton::from_regex("((a{256}){256}){256}"),
            Err(RegexError::Unsupported(_))
        ));
    }
}
