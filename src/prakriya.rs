//! The derivation and its state.
//!
//! A *prakriyā* is one derivation attempt: an ordered list of [`Term`]s that
//! rules add to, delete from, and rewrite until the joined text is a valid
//! surface form. Besides the terms it carries:
//!
//! - derivation-wide [`Tag`]s (semantic context plus the documented
//!   cycle-breaking one-shot flags),
//! - an append-only history of committed rule applications,
//! - the optional-rule decision state: forced choices supplied by the caller
//!   before the run, and the ordered log of every decision point reached.
//!
//! A prakriyā is created fresh for each attempt and read-only once the attempt
//! returns; it is never reused. Given the same initial terms, tags, and forced
//! choices, a rule pipeline built on this type is a pure function — the
//! property the branch explorer in [`crate::explore`] relies on.

use std::collections::HashMap;

use crate::tag::Tag;
use crate::term::Term;

/// A rule identifier, e.g. `"6.4.77"`.
pub type Code = &'static str;

/// One committed rule application: the rule and the state it produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub rule: Code,
    /// Term texts joined with spaces; empty terms render as `_`.
    pub result: String,
}

/// One derivation attempt.
#[derive(Clone, Debug, Default)]
pub struct Prakriya {
    /// The derivation state. Rules modify this list and its members directly.
    pub terms: Vec<Term>,
    /// Derivation-wide tags: semantic context (purusha, vacana, dialect) and
    /// global one-shot flags.
    pub tags: Tag,
    history: Vec<Step>,
    options: HashMap<Code, bool>,
    options_seen: Vec<(Code, bool)>,
}

impl Prakriya {
    /// Create a derivation over `terms` with the given context tags and
    /// forced optional-rule choices. `options` is fixed for the whole run.
    pub fn new(terms: Vec<Term>, tags: Tag, options: HashMap<Code, bool>) -> Self {
        Prakriya { terms, tags, history: Vec::new(), options, options_seen: Vec::new() }
    }

    /// The current (and, at the end of a run, final) surface text.
    pub fn text(&self) -> String {
        self.terms.iter().map(|t| t.text.as_str()).collect()
    }

    /// Decide an optional rule.
    ///
    /// Returns the forced value if the caller supplied one for `code`,
    /// otherwise declines. Either way the decision point is recorded, so a
    /// run always logs the exact path of optional decisions it took.
    pub fn decide(&mut self, code: Code) -> bool {
        let chosen = self.options.get(code).copied().unwrap_or(false);
        self.options_seen.push((code, chosen));
        chosen
    }

    /// Every optional decision point reached so far, in order.
    pub fn options_seen(&self) -> &[(Code, bool)] {
        &self.options_seen
    }

    /// Log the current state against the rule that produced it.
    pub fn step(&mut self, rule: Code) {
        let result = self.snapshot();
        log::trace!("{rule}: {result}");
        self.history.push(Step { rule, result });
    }

    /// The committed rule applications, in order. Debugging and tests only;
    /// never consulted for control flow.
    pub fn history(&self) -> &[Step] {
        &self.history
    }

    fn snapshot(&self) -> String {
        let texts: Vec<&str> =
            self.terms.iter().map(|t| if t.text.is_empty() { "_" } else { t.text.as_str() }).collect();
        texts.join(" ")
    }

    /// Index and term of every term carrying any of `tags`.
    pub fn find_all<'a>(&'a self, tags: Tag) -> impl Iterator<Item = (usize, &'a Term)> {
        self.terms.iter().enumerate().filter(move |(_, t)| t.any(tags))
    }

    /// The first term carrying any of `tags`.
    pub fn find_first(&self, tags: Tag) -> Option<(usize, &Term)> {
        self.find_all(tags).next()
    }

    /// The last term carrying any of `tags`.
    pub fn find_last(&self, tags: Tag) -> Option<(usize, &Term)> {
        self.find_all(tags).last()
    }

    pub fn get(&self, i: usize) -> Option<&Term> {
        self.terms.get(i)
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut Term> {
        self.terms.get_mut(i)
    }

    /// Whether all of `tags` apply to the derivation.
    pub fn all(&self, tags: Tag) -> bool {
        self.tags.contains(tags)
    }

    /// Whether any of `tags` applies to the derivation.
    pub fn any(&self, tags: Tag) -> bool {
        self.tags.intersects(tags)
    }

    pub fn add_tags(&mut self, tags: Tag) {
        self.tags |= tags;
    }

    pub fn remove_tags(&mut self, tags: Tag) {
        self.tags &= !tags;
    }

    /// Dump terms and history through the `log` facade.
    pub fn debug_print(&self) {
        for t in &self.terms {
            log::debug!("  {t:?}");
        }
        for Step { rule, result } in &self.history {
            log::debug!("    {result} ({rule})");
        }
    }
}
