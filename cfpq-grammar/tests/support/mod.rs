#![allow(dead_code)]

use std::collections::BTreeSet;

use cfpq_grammar::{Cfg, CfgRule, Symbol};

pub fn eq_rules<'a, 'b>(
    i: impl Iterator<Item = &'a CfgRule>,
    j: impl Iterator<Item = &'b CfgRule>,
) -> bool {
    let mut rules_i = i
        .map(|rule| (rule.lhs, rule.rhs.to_vec()))
        .collect::<Vec<_>>();
    let mut rules_j = j
        .map(|rule| (rule.lhs, rule.rhs.to_vec()))
        .collect::<Vec<_>>();

    rules_i.sort();
    rules_j.sort();

    if rules_i != rules_j {
        eprintln!("Left:");
        eprintln!("{:?}", rules_i);
        eprintln!("Right:");
        eprintln!("{:?}", rules_j);
    }

    rules_i == rules_j
}

pub fn assert_eq(left: &Cfg, right: &Cfg) {
    if !eq_rules(left.rules(), right.rules()) {
        let mut left_sorted = left.clone();
        let mut right_sorted = right.clone();
        left_sorted.sort();
        right_sorted.sort();
        eprintln!(
            "{}\n{}",
            left_sorted.stringify_to_bnf(),
            right_sorted.stringify_to_bnf()
        );
        panic!("Rules expected to be equal");
    }
    assert_eq!(left.root(), right.root(), "Grammar roots expected to be equal");
}

/// Recognizes a word with a grammar in weak CNF. Every character of the word
/// is matched against terminals by name.
pub fn derives(cfg: &Cfg, word: &str) -> bool {
    assert!(cfg.is_weak_cnf(), "the recognizer needs weak CNF");
    let root = match cfg.root() {
        Some(root) => root,
        None => return false,
    };
    let word: Vec<String> = word.chars().map(|ch| ch.to_string()).collect();
    let n = word.len();
    // table[i][j] holds the nonterminals that derive word[i..j].
    let mut table: Vec<Vec<BTreeSet<Symbol>>> = vec![vec![BTreeSet::new(); n + 1]; n + 1];
    for len in 0..=n {
        for i in 0..=n - len {
            let j = i + len;
            loop {
                let mut found = vec![];
                for rule in cfg.rules() {
                    if table[i][j].contains(&rule.lhs) {
                        continue;
                    }
                    let matches = match &rule.rhs[..] {
                        [] => len == 0,
                        &[terminal] => len == 1 && cfg.name_of(terminal) == word[i],
                        &[left, right] => (i..=j)
                            .any(|k| table[i][k].contains(&left) && table[k][j].contains(&right)),
                        _ => false,
                    };
                    if matches {
                        found.push(rule.lhs);
                    }
                }
                if found.is_empty() {
                    break;
                }
                table[i][j].extend(found);
            }
        }
    }
    table[0][n].contains(&root)
}
