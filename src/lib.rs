//! Core engine for Paninian word derivation.
//!
//! A derivation (*prakriyā*) starts from one or more morpheme terms and
//! applies an ordered set of context-sensitive rewrite rules until the joined
//! text of the terms is a finished surface form. The rules themselves live in
//! downstream crates; this crate is everything they share:
//!
//! ```text
//! initial terms ──> Prakriya::new          (prakriya.rs, term.rs)
//!                       │
//!   rule pipeline ──────┤  mutate terms via ops / StringView
//!   (external)          │  condition via TermView, filters, sounds
//!                       │  branch via Prakriya::decide
//!                       v
//!                  Prakriya::text          one candidate form
//!
//!                  explore(derive)         (explore.rs)
//!                    every candidate form reachable via optional rules
//! ```
//!
//! Module responsibilities:
//!
//! - `term`, `prakriya`: the mutable derivation state — terms, tags, history,
//!   and the optional-rule decision log.
//! - `views`: windowing over the term list, both as atomic multi-term units
//!   (`TermView`) and as one flattened string (`StringView`).
//! - `sounds`: sound classes over the fixed phoneme table, articulatory
//!   features, and closest-sound substitution.
//! - `ops`: rule-attributed mutation primitives that keep the history
//!   complete.
//! - `filters`: shared term predicates.
//! - `explore`: enumeration of all outputs reachable via optional rules.
//!
//! Each derivation attempt is single-threaded, synchronous, and a pure
//! function of its inputs; see `explore` for how that purity is exploited.
//!
//! Logging goes through the `log` facade (`trace` for rule steps, `debug` for
//! exploration attempts); the crate installs no subscriber.

pub mod errors;
pub mod explore;
pub mod filters;
pub mod ops;
pub mod prakriya;
pub mod sounds;
pub mod tag;
pub mod term;
pub mod views;

pub use errors::{Error, Result};
pub use explore::{explore, PrakriyaTree, MAX_ATTEMPTS};
pub use prakriya::{Code, Prakriya, Step};
pub use tag::Tag;
pub use term::Term;
pub use views::{partition, StringView, TermView};
