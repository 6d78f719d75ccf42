//! Allows us to load context-free grammars from text, one production group
//! per line:
//!
//! ```text
//! S -> a S b | epsilon
//! S -> S S
//! ```
//!
//! Symbols are separated by whitespace. Symbols starting with an uppercase
//! ASCII letter are nonterminals, all others are terminals. Quoting a symbol
//! as `"VAR:name"` or `"TER:name"` forces its kind. `epsilon`, `$`, `ε` and
//! `ϵ` stand for the empty string, as does an empty alternative.

use std::collections::HashMap;
use std::fmt::{self, Write};
use std::io;
use std::path::Path;
use std::str::Chars;

use log::debug;

use crate::local_prelude::*;

/// Represents an error when loading a grammar.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum LoadError {
    /// The grammar file does not exist.
    NotFound {
        /// The path that was looked up.
        path: String,
    },
    /// The grammar file exists, but could not be read.
    Io {
        /// The path that was read.
        path: String,
        /// The kind of the I/O error.
        kind: io::ErrorKind,
        /// Human-readable reason for the error.
        reason: String,
    },
    /// The text is not a well-formed grammar.
    Parse {
        /// Human-readable reason for the error.
        reason: String,
        /// Line where the error happened.
        ///
        /// One-indexed.
        line: u32,
        /// Column where the error happened.
        ///
        /// One-indexed.
        col: u32,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::NotFound { path } => write!(f, "Grammar file not found: {}", path),
            LoadError::Io { path, reason, .. } => {
                write!(f, "Failed to read grammar file {}: {}", path, reason)
            }
            LoadError::Parse { reason, line, col } => {
                write!(
                    f,
                    "Parse error at line {} column {}: reason: {}",
                    line, col, reason
                )
            }
        }
    }
}

impl std::error::Error for LoadError {}

const EPSILON: [&str; 5] = ["epsilon", "$", "ε", "ϵ", "Є"];

#[derive(Debug, Clone, Eq, PartialEq)]
enum Token {
    Arrow,
    Pipe,
    Nonterminal(String),
    Terminal(String),
    Epsilon,
    Error(String),
}

struct Lexer<'a> {
    chars: Chars<'a>,
    col_no: usize,
}

impl<'a> Lexer<'a> {
    /// Splits a single line into tokens, each with its one-indexed column.
    fn tokenize(line: &str) -> Vec<(Token, usize)> {
        let mut lexer = Lexer {
            chars: line.chars(),
            col_no: 1,
        };
        let mut result = vec![];
        loop {
            while lexer.peek().map_or(false, char::is_whitespace) {
                lexer.advance();
            }
            let col_no = lexer.col_no;
            match lexer.peek() {
                Some(ch) => result.push((lexer.eat(ch), col_no)),
                None => break,
            }
        }
        result
    }

    fn eat(&mut self, ch: char) -> Token {
        match ch {
            '|' => {
                self.advance();
                Token::Pipe
            }
            '-' if self.chars.as_str().starts_with("->") => {
                self.advance();
                self.advance();
                Token::Arrow
            }
            '"' => {
                self.advance();
                let mut quoted = String::new();
                while let Some(ch) = self.peek() {
                    self.advance();
                    if ch == '"' {
                        return Self::quoted(quoted);
                    }
                    quoted.push(ch);
                }
                Token::Error("unterminated quoted symbol".to_string())
            }
            _ => {
                let substring = self.chars.as_str();
                while self
                    .peek()
                    .map_or(false, |ch| !ch.is_whitespace() && ch != '|' && ch != '"')
                {
                    if self.chars.as_str().starts_with("->") {
                        break;
                    }
                    self.advance();
                }
                let word = &substring[..substring.len() - self.chars.as_str().len()];
                Self::word(word)
            }
        }
    }

    fn quoted(quoted: String) -> Token {
        if let Some(name) = quoted.strip_prefix("VAR:") {
            Token::Nonterminal(name.to_string())
        } else if let Some(name) = quoted.strip_prefix("TER:") {
            Token::Terminal(name.to_string())
        } else {
            Self::word(&quoted)
        }
    }

    fn word(word: &str) -> Token {
        if EPSILON.contains(&word) {
            Token::Epsilon
        } else if word.starts_with(|ch: char| ch.is_ascii_uppercase()) {
            Token::Nonterminal(word.to_string())
        } else {
            Token::Terminal(word.to_string())
        }
    }

    fn advance(&mut self) {
        if self.chars.next().is_some() {
            self.col_no += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.as_str().chars().next()
    }
}

/// Interns nonterminals and terminals separately, so that `"TER:S"` and `S`
/// are distinct symbols.
struct Interner<'g> {
    cfg: &'g mut Cfg,
    nonterminals: HashMap<String, Symbol>,
    terminals: HashMap<String, Symbol>,
}

impl<'g> Interner<'g> {
    fn nonterminal(&mut self, name: &str) -> Symbol {
        if let Some(&sym) = self.nonterminals.get(name) {
            return sym;
        }
        let sym = self.cfg.next_sym(Some(name.into()));
        self.nonterminals.insert(name.to_string(), sym);
        sym
    }

    fn terminal(&mut self, label: &str) -> Symbol {
        if let Some(&sym) = self.terminals.get(label) {
            return sym;
        }
        let sym = self.cfg.terminal(label);
        self.terminals.insert(label.to_string(), sym);
        sym
    }
}

fn parse_error(reason: impl Into<String>, line: usize, col: usize) -> LoadError {
    LoadError::Parse {
        reason: reason.into(),
        line: line as u32,
        col: col as u32,
    }
}

impl Cfg {
    /// Loads a grammar from text. The nonterminal named `start` becomes the root,
    /// even if it has no rules.
    pub fn load(text: &str, start: &str) -> Result<Cfg, LoadError> {
        let mut cfg = Cfg::new();
        let mut interner = Interner {
            cfg: &mut cfg,
            nonterminals: HashMap::new(),
            terminals: HashMap::new(),
        };
        let root = interner.nonterminal(start);
        for (line_idx, line) in text.lines().enumerate() {
            let line_no = line_idx + 1;
            let tokens = Lexer::tokenize(line);
            if tokens.is_empty() {
                continue;
            }
            if let Some((Token::Error(reason), col)) = tokens
                .iter()
                .find(|(token, _)| matches!(token, Token::Error(_)))
            {
                return Err(parse_error(reason.clone(), line_no, *col));
            }
            let lhs = match &tokens[..] {
                [(Token::Nonterminal(name), _), (Token::Arrow, _), ..] => {
                    interner.nonterminal(name)
                }
                [(Token::Nonterminal(_), _), (_, col), ..] => {
                    return Err(parse_error("expected `->` after the head", line_no, *col));
                }
                [(Token::Nonterminal(_), col)] => {
                    return Err(parse_error("expected `->` after the head", line_no, *col));
                }
                [(_, col), ..] => {
                    return Err(parse_error("expected a nonterminal head", line_no, *col));
                }
                [] => unreachable!(),
            };
            let mut rhs = vec![];
            for (token, col) in &tokens[2..] {
                match token {
                    Token::Pipe => {
                        interner.cfg.rule(lhs).rhs(&rhs);
                        rhs.clear();
                    }
                    Token::Nonterminal(name) => rhs.push(interner.nonterminal(name)),
                    Token::Terminal(label) => rhs.push(interner.terminal(label)),
                    Token::Epsilon => {}
                    Token::Arrow => {
                        return Err(parse_error("unexpected `->` in a body", line_no, *col));
                    }
                    Token::Error(_) => unreachable!(),
                }
            }
            interner.cfg.rule(lhs).rhs(&rhs);
        }
        cfg.set_root(root);
        debug!(
            "loaded a grammar with {} symbols and {} rules",
            cfg.num_syms(),
            cfg.rules().count()
        );
        Ok(cfg)
    }

    /// Loads a grammar from a text file.
    ///
    /// # Errors
    ///
    /// Fails with [`LoadError::NotFound`] if the file does not exist.
    pub fn load_file(path: impl AsRef<Path>, start: &str) -> Result<Cfg, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|error| match error.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound {
                path: path.display().to_string(),
            },
            kind => LoadError::Io {
                path: path.display().to_string(),
                kind,
                reason: error.to_string(),
            },
        })?;
        Cfg::load(&text, start)
    }

    /// Prints the grammar in the text format accepted by [`fn load`]. Rules of the
    /// same LHS are grouped on one line.
    ///
    /// [`fn load`]: Self::load
    pub fn to_text(&self) -> String {
        let stringify_sym = |sym: Symbol| {
            let name = self.name_of(sym);
            let looks_like_nonterminal = name.starts_with(|ch: char| ch.is_ascii_uppercase());
            let is_terminal = self.is_terminal(sym);
            if is_terminal && (looks_like_nonterminal || EPSILON.contains(&&name[..])) {
                format!("\"TER:{}\"", name)
            } else if !is_terminal && !looks_like_nonterminal {
                format!("\"VAR:{}\"", name)
            } else {
                name.into_owned()
            }
        };
        let mut groups: Vec<(Symbol, Vec<String>)> = vec![];
        for rule in self.rules() {
            let body = if rule.rhs.is_empty() {
                "epsilon".to_string()
            } else {
                rule.rhs
                    .iter()
                    .map(|&sym| stringify_sym(sym))
                    .collect::<Vec<_>>()
                    .join(" ")
            };
            match groups.iter_mut().find(|(lhs, _)| *lhs == rule.lhs) {
                Some((_, bodies)) => bodies.push(body),
                None => groups.push((rule.lhs, vec![body])),
            }
        }
        let mut result = String::new();
        for (lhs, bodies) in groups {
            writeln!(result, "{} -> {}", stringify_sym(lhs), bodies.join(" | "))
                .expect("writing to String failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let tokens: Vec<Token> = Lexer::tokenize("S -> a S | \"VAR:x\" \"TER:B\" |")
            .into_iter()
            .map(|(token, _)| token)
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::Nonterminal("S".into()),
                Token::Arrow,
                Token::Terminal("a".into()),
                Token::Nonterminal("S".into()),
                Token::Pipe,
                Token::Nonterminal("x".into()),
                Token::Terminal("B".into()),
                Token::Pipe,
            ]
        );
    }

    #[test]
    fn test_tokenize_without_spaces_around_arrow() {
        let tokens: Vec<Token> = Lexer::tokenize("S->a")
            .into_iter()
            .map(|(token, _)| token)
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::Nonterminal("S".into()),
                Token::Arrow,
                Token::Terminal("a".into()),
            ]
        );
    }

    #[test]
    fn test_columns() {
        let cols: Vec<usize> = Lexer::tokenize("  A -> b")
            .into_iter()
            .map(|(_, col)| col)
            .collect();
        assert_eq!(cols, vec![3, 5, 8]);
    }
}
