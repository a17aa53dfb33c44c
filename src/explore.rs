//! Exhaustive exploration of optional-rule branches.
//!
//! A derivation procedure built on [`Prakriya`] is a pure function of its
//! forced-choice map: the same map always yields the same final text and the
//! same ordered decision log. [`explore`] exploits that purity to enumerate
//! every terminal output reachable through optional rules without anyone
//! declaring the branch points up front:
//!
//! 1. Run the procedure with no forced choices. Its decision log is a path of
//!    `(rule, bool)` edges; insert the result into a binary trie along that
//!    path, creating the *untaken* sibling edge at every decision node too.
//! 2. While some leaf has no result, convert its path into a forced-choice
//!    map and run the procedure again. New runs may reach new decision
//!    points, growing the trie.
//! 3. When every leaf is resolved, the leaves are the full answer.
//!
//! This is not a cartesian product over all optional rules in the pipeline:
//! which decision points a run reaches depends on earlier decisions, so only
//! the reachable tree is ever built.
//!
//! A run that records its decisions inconsistently (different codes for the
//! same path across runs) would grow the trie forever; [`MAX_ATTEMPTS`] bounds
//! the loop and surfaces that as [`Error::ExplorationDiverged`].

use std::collections::HashMap;

use crate::errors::{Error, Result};
use crate::prakriya::{Code, Prakriya};

/// Upper bound on derivation attempts per exploration. Real pipelines branch
/// on at most a handful of optional rules per form; exceeding this signals a
/// defective rule, not a large but legitimate space.
pub const MAX_ATTEMPTS: usize = 10;

#[derive(Debug, Default)]
struct Node {
    prakriya: Option<Prakriya>,
    children: HashMap<(Code, bool), Node>,
}

/// A binary trie over optional-rule decisions, one completed derivation per
/// resolved leaf.
#[derive(Debug, Default)]
pub struct PrakriyaTree {
    root: Node,
}

impl PrakriyaTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a completed derivation at the path its decision log implies,
    /// creating the untaken sibling edge at every decision node on the way.
    pub fn add(&mut self, p: Prakriya) {
        let path: Vec<(Code, bool)> = p.options_seen().to_vec();
        let mut cur = &mut self.root;
        for (code, chosen) in path {
            cur.children.entry((code, true)).or_default();
            cur.children.entry((code, false)).or_default();
            cur = cur.children.get_mut(&(code, chosen)).expect("sibling entries just created");
        }
        cur.prakriya = Some(p);
    }

    /// The forced-choice map for some unresolved leaf, or `None` when the
    /// tree is fully explored. Traversal order is not significant; it only
    /// needs to be exhaustive.
    pub fn next_missing(&self) -> Option<HashMap<Code, bool>> {
        let mut stack: Vec<(&Node, Vec<(Code, bool)>)> = vec![(&self.root, Vec::new())];
        while let Some((node, path)) = stack.pop() {
            if node.children.is_empty() {
                if node.prakriya.is_none() && !path.is_empty() {
                    return Some(path.into_iter().collect());
                }
                continue;
            }
            for (edge, child) in &node.children {
                let mut child_path = path.clone();
                child_path.push(*edge);
                stack.push((child, child_path));
            }
        }
        None
    }

    /// The derivations stored at resolved leaves.
    pub fn into_leaves(self) -> Vec<Prakriya> {
        let mut leaves = Vec::new();
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if node.children.is_empty() {
                leaves.extend(node.prakriya);
            } else {
                stack.extend(node.children.into_values());
            }
        }
        leaves
    }
}

/// Run `derive` once per reachable combination of optional-rule decisions and
/// collect every terminal derivation.
///
/// `derive` receives the forced-choice map for the attempt and must behave as
/// a pure function of it, constructing a fresh [`Prakriya`] each time.
pub fn explore<F>(mut derive: F) -> Result<Vec<Prakriya>>
where
    F: FnMut(&HashMap<Code, bool>) -> Result<Prakriya>,
{
    let mut tree = PrakriyaTree::new();
    tree.add(derive(&HashMap::new())?);

    let mut attempts = 1;
    while let Some(options) = tree.next_missing() {
        attempts += 1;
        if attempts > MAX_ATTEMPTS {
            return Err(Error::ExplorationDiverged { attempts });
        }
        log::debug!("exploration attempt {attempts}: {options:?}");
        tree.add(derive(&options)?);
    }
    Ok(tree.into_leaves())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops;
    use crate::tag::Tag;
    use crate::term::Term;
    use std::collections::BTreeSet;

    fn fresh(options: &HashMap<Code, bool>) -> Prakriya {
        Prakriya::new(vec![Term::upadesha("kf")], Tag::empty(), options.clone())
    }

    fn texts(prakriyas: &[Prakriya]) -> BTreeSet<String> {
        prakriyas.iter().map(|p| p.text()).collect()
    }

    #[test]
    fn no_optional_rules_yields_one_result() {
        let results = explore(|options| {
            let mut p = fresh(options);
            ops::antya("7.4.66", &mut p, 0, "ar");
            Ok(p)
        })
        .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text(), "kar");
    }

    #[test]
    fn three_independent_decisions_yield_eight_paths() {
        let results = explore(|options| {
            let mut p = fresh(options);
            for (code, sub) in [("1.1.1", "a"), ("2.2.2", "b"), ("3.3.3", "c")] {
                ops::optional(code, &mut p, |rule, p| {
                    let new = format!("{}{}", p.terms[0].text, sub);
                    ops::text(rule, p, 0, &new);
                });
            }
            Ok(p)
        })
        .unwrap();

        assert_eq!(results.len(), 8);
        let expected: BTreeSet<String> =
            ["kf", "kfa", "kfb", "kfc", "kfab", "kfac", "kfbc", "kfabc"]
                .iter()
                .map(|s| s.to_string())
                .collect();
        assert_eq!(texts(&results), expected);
    }

    #[test]
    fn dependent_decisions_explore_only_reachable_paths() {
        // The second decision point exists only when the first is accepted,
        // so the tree has three leaves, not four.
        let results = explore(|options| {
            let mut p = fresh(options);
            let first = ops::optional("6.1.8", &mut p, |rule, p| ops::antya(rule, p, 0, "A"));
            if first {
                ops::optional("6.1.9", &mut p, |rule, p| ops::antya(rule, p, 0, "Ar"));
            }
            Ok(p)
        })
        .unwrap();

        assert_eq!(results.len(), 3);
        let expected: BTreeSet<String> =
            ["kf", "kA", "kAr"].iter().map(|s| s.to_string()).collect();
        assert_eq!(texts(&results), expected);
    }

    #[test]
    fn determinism_of_a_fixed_choice_map() {
        let derive = |options: &HashMap<Code, bool>| {
            let mut p = fresh(options);
            ops::optional("6.1.8", &mut p, |rule, p| ops::antya(rule, p, 0, "A"));
            ops::optional("6.1.9", &mut p, |rule, p| {
                let new = format!("{}t", p.terms[0].text);
                ops::text(rule, p, 0, &new);
            });
            p
        };

        let options = HashMap::from([("6.1.8", true)]);
        let a = derive(&options);
        let b = derive(&options);
        assert_eq!(a.text(), b.text());
        assert_eq!(a.options_seen(), b.options_seen());
        assert_eq!(a.options_seen(), &[("6.1.8", true), ("6.1.9", false)]);
    }

    #[test]
    fn single_declined_option_is_recorded_but_changes_nothing() {
        let results = explore(|options| {
            let mut p = Prakriya::new(vec![Term::upadesha("kf")], Tag::DHATU, options.clone());
            ops::optional("6.4.89", &mut p, |rule, p| ops::upadha(rule, p, 0, "U"));
            Ok(p)
        })
        .unwrap();

        let declined = results.iter().find(|p| p.text() == "kf").unwrap();
        assert_eq!(declined.options_seen(), &[("6.4.89", false)]);
    }

    #[test]
    fn inconsistent_decision_logging_is_surfaced_as_divergence() {
        // Records a different decision point on every run, so no forced path
        // is ever completed and the trie can never resolve.
        const CODES: &[Code] = &[
            "x.0", "x.1", "x.2", "x.3", "x.4", "x.5", "x.6", "x.7", "x.8", "x.9", "x.10",
            "x.11",
        ];
        let mut run = 0;
        let result = explore(|options| {
            let mut p = fresh(options);
            p.decide(CODES[run.min(CODES.len() - 1)]);
            run += 1;
            Ok(p)
        });
        assert!(matches!(result, Err(Error::ExplorationDiverged { .. })));
    }

    #[test]
    fn derive_errors_propagate_unmodified() {
        let result = explore(|_| Err(Error::ContractViolation("boom".to_string())));
        assert!(matches!(result, Err(Error::ContractViolation(_))));
    }
}
