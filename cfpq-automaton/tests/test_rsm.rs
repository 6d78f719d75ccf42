use cfpq_automaton::{Ecfg, Rsm};
use cfpq_grammar::Cfg;

#[test]
fn test_ecfg_from_text() {
    let ecfg = Ecfg::load("S -> A | a b | epsilon\nA -> B\nB -> S | epsilon", "S").unwrap();
    assert_eq!(ecfg.start(), "S");
    assert_eq!(
        ecfg.nonterminals().iter().collect::<Vec<_>>(),
        vec!["A", "B", "S"]
    );
    assert_eq!(ecfg.terminals().iter().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(ecfg.productions()["S"].len(), 3);
    assert_eq!(ecfg.productions()["A"].len(), 1);
}

#[test]
fn test_ecfg_of_weak_cnf() {
    let cfg = Cfg::load("S -> epsilon | B a\nB -> a a S | a", "S")
        .unwrap()
        .into_weak_cnf()
        .unwrap();
    let ecfg = Ecfg::from_cfg(&cfg);
    assert_eq!(ecfg.start(), "S");
    assert_eq!(ecfg.terminals().iter().collect::<Vec<_>>(), vec!["a"]);
    let heads = cfg.lhs_symbols().len();
    assert_eq!(ecfg.productions().len(), heads);
}

#[test]
fn test_rsm_boxes() {
    let ecfg = Ecfg::load("S -> A | a b | a c | epsilon\nA -> B\nB -> S | epsilon", "S").unwrap();
    let rsm = Rsm::from_ecfg(&ecfg);
    assert_eq!(rsm.start(), "S");
    assert_eq!(
        rsm.boxes().map(|(head, _)| head).collect::<Vec<_>>(),
        vec!["A", "B", "S"]
    );
    assert!(rsm.accepts("S", ["A"]));
    assert!(rsm.accepts("S", ["a", "c"]));
    assert!(rsm.accepts("S", Vec::<&str>::new()));
    assert!(!rsm.accepts("S", ["a"]));
    assert!(!rsm.accepts("A", ["S"]));
    assert!(!rsm.accepts("C", ["S"]));

    let dfa = rsm.get("S").unwrap();
    assert!(dfa.is_deterministic());
    // The shared prefix `a` gives a single state.
    assert_eq!(dfa.num_states(), 5);
    let matrices = rsm.matrices("S").unwrap();
    assert_eq!(matrices.dim(), 5);
    assert_eq!(matrices.labels().collect::<Vec<_>>(), vec!["A", "a", "b", "c"]);
}

#[test]
fn test_minimized_boxes() {
    let ecfg = Ecfg::load("S -> A | a b | a c | epsilon\nA -> B\nB -> S | epsilon", "S").unwrap();
    let rsm = Rsm::from_ecfg(&ecfg).minimize();
    assert_eq!(rsm.start(), "S");
    let dfa = rsm.get("S").unwrap();
    assert!(dfa.is_deterministic());
    // The ends of `A`, `a b` and `a c` merge into one final state.
    assert_eq!(dfa.num_states(), 3);
    assert_eq!(rsm.matrices("S").unwrap().dim(), 3);
    let bodies: [&[&str]; 4] = [&["A"], &["a", "b"], &["a", "c"], &[]];
    for body in bodies {
        assert!(rsm.accepts("S", body.iter().copied()));
    }
    assert!(!rsm.accepts("S", ["a"]));
    assert!(!rsm.accepts("S", ["A", "b"]));

    let rsm = Ecfg::load("S -> a b | c b", "S").map(|ecfg| Rsm::from_ecfg(&ecfg)).unwrap();
    assert_eq!(rsm.get("S").unwrap().num_states(), 5);
    let minimal = rsm.minimize();
    assert_eq!(minimal.get("S").unwrap().num_states(), 3);
    assert_eq!(
        minimal.matrices("S").unwrap().labels().collect::<Vec<_>>(),
        vec!["a", "b", "c"]
    );
}
