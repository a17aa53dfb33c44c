//! Rule-attributed mutation primitives.
//!
//! Every operation here takes the rule code that sanctions it and the index of
//! the term it rewrites, and logs one history entry on the derivation when it
//! commits. Rules compose these rather than mutating `Term::text` ad hoc, so
//! the history stays complete.
//!
//! Indices are positions in `prakriya.terms` obtained from the same
//! derivation; operations assume they are in bounds.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::prakriya::{Code, Prakriya};
use crate::sounds;
use crate::tag::Tag;
use crate::term::Term;

/// Run `f` iff the optional rule `code` is accepted for this derivation.
/// The decision point is recorded either way. Returns whether `f` ran.
pub fn optional(code: Code, p: &mut Prakriya, f: impl FnOnce(Code, &mut Prakriya)) -> bool {
    if p.decide(code) {
        f(code, p);
        true
    } else {
        false
    }
}

// --- Deletion -----------------------------------------------------------------

/// Delete the term's text. The term stays in place as a placeholder.
pub fn lopa(rule: Code, p: &mut Prakriya, i: usize) {
    p.terms[i].text.clear();
    p.step(rule);
}

/// Delete the term's text with `luk`.
pub fn luk(rule: Code, p: &mut Prakriya, i: usize) {
    p.terms[i].text.clear();
    p.terms[i].add_tags(Tag::LUK);
    p.step(rule);
}

/// Delete the term's text and upadeśa with `ślu`.
pub fn slu(rule: Code, p: &mut Prakriya, i: usize) {
    let t = &mut p.terms[i];
    t.u = None;
    t.text.clear();
    t.add_tags(Tag::SLU);
    p.step(rule);
}

// --- Replacement --------------------------------------------------------------

/// Replace the first sound. Steps only if the text changed; pass `None` to
/// skip logging entirely (for substitutions subsumed by a later step).
pub fn adi(rule: Option<Code>, p: &mut Prakriya, i: usize, sub: &str) {
    let t = &mut p.terms[i];
    if t.adi().map(String::from).as_deref() != Some(sub) {
        let mut text = sub.to_string();
        text.push_str(&t.text[t.text.len().min(1)..]);
        t.text = text;
        if let Some(rule) = rule {
            p.step(rule);
        }
    }
}

/// Replace the last sound.
pub fn antya(rule: Code, p: &mut Prakriya, i: usize, sub: &str) {
    let t = &mut p.terms[i];
    if t.antya().map(String::from).as_deref() != Some(sub) {
        let n = t.text.len();
        t.text.truncate(n.saturating_sub(1));
        t.text.push_str(sub);
        p.step(rule);
    }
}

/// Replace the penultimate sound.
pub fn upadha(rule: Code, p: &mut Prakriya, i: usize, sub: &str) {
    let t = &mut p.terms[i];
    let n = t.text.len();
    t.text = format!("{}{}{}", &t.text[..n.saturating_sub(2)], sub, &t.text[n.saturating_sub(1)..]);
    p.step(rule);
}

static TI_RE: Lazy<Regex> = Lazy::new(|| {
    let ac = sounds::s("ac").expect("fixed class").pattern();
    let hal = sounds::s("hal").expect("fixed class").pattern();
    Regex::new(&format!("{ac}{hal}*$")).expect("valid pattern")
});

static MIT_RE: Lazy<Regex> = Lazy::new(|| {
    let ac = sounds::s("ac").expect("fixed class").pattern();
    let hal = sounds::s("hal").expect("fixed class").pattern();
    Regex::new(&format!("({ac})({hal}*)$")).expect("valid pattern")
});

/// Replace the ṭi — everything from the last vowel on.
pub fn ti(rule: Code, p: &mut Prakriya, i: usize, sub: &str) {
    let t = &mut p.terms[i];
    t.text = TI_RE.replace(&t.text, regex::NoExpand(sub)).into_owned();
    p.step(rule);
}

/// Insert `sub` directly after the last vowel (a mit augment).
pub fn mit(rule: Code, p: &mut Prakriya, i: usize, sub: &str) {
    let t = &mut p.terms[i];
    t.text = MIT_RE
        .replace(&t.text, |caps: &Captures| format!("{}{}{}", &caps[1], sub, &caps[2]))
        .into_owned();
    p.step(rule);
}

/// Replace the whole text.
pub fn text(rule: Code, p: &mut Prakriya, i: usize, sub: &str) {
    p.terms[i].text = sub.to_string();
    p.step(rule);
}

/// Replace the upadeśa (and with it the surface text).
pub fn upadesha(rule: Code, p: &mut Prakriya, i: usize, sub: &str) {
    let t = &mut p.terms[i];
    t.u = Some(sub.to_string());
    t.text = sub.to_string();
    p.step(rule);
}

// --- Insertion ----------------------------------------------------------------

/// Insert `t` before the term at `i`.
pub fn insert_before(rule: Code, p: &mut Prakriya, i: usize, t: Term) {
    p.terms.insert(i, t);
    p.step(rule);
}

/// Insert `t` after the term at `i`. Pass `rule: None` to defer logging to a
/// follow-up operation.
pub fn insert_after(rule: Option<Code>, p: &mut Prakriya, i: usize, t: Term) {
    p.terms.insert(i + 1, t);
    if let Some(rule) = rule {
        p.step(rule);
    }
}

/// Insert a new augment with upadeśa `u` after the term at `i`.
pub fn insert_agama_after(rule: Code, p: &mut Prakriya, i: usize, u: &str) {
    p.terms.insert(i + 1, Term::agama(u));
    p.step(rule);
}

// --- Samjna -------------------------------------------------------------------

/// Add `tags` to the term at `i`.
pub fn add_tag(rule: Code, p: &mut Prakriya, i: usize, tags: Tag) {
    p.terms[i].add_tags(tags);
    p.step(rule);
}

// --- Correspondence -----------------------------------------------------------

/// Substitute `c` in 1:1 correspondence: the sound at some position of
/// `before` maps to the sound at the same position of `after`
/// (*yathāsaṁkhyam anudeśaḥ samānām*).
pub fn yatha(c: char, before: &sounds::SoundSet, after: &sounds::SoundSet) -> Option<char> {
    before.iter().zip(after.iter()).find(|(b, _)| *b == c).map(|(_, a)| a)
}
