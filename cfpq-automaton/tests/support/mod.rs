#![allow(dead_code)]

use cfpq_automaton::Automaton;

/// Checks whether the automaton accepts a word of whitespace-separated labels.
pub fn accepts_words(automaton: &Automaton, word: &str) -> bool {
    automaton.accepts(word.split_whitespace())
}
