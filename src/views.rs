//! Windowing over the term list.
//!
//! Rules rarely care about physical term boundaries. A rule conditioning on
//! "the following suffix" must see through any augments inserted around it,
//! and a sandhi rule is most naturally written against the whole derivation as
//! one string. Two read-mostly views reconcile this with the term list:
//!
//! - [`TermView`]: a run of adjacent terms that form one linguistically
//!   atomic unit (a suffix plus its augments, a root plus a `k`-it augment).
//!   Supports the same sound/tag queries as a single [`Term`].
//! - [`StringView`]: the term list (or a sub-range) flattened to one logical
//!   string, with every character edit routed back to the owning term.
//!
//! Both views hold indices and recompute term boundaries from current lengths
//! at each access; nothing positional is cached across mutations.
//!
//! All text is SLP1, so one byte is one sound; byte offsets and character
//! offsets coincide.

use crate::errors::{Error, Result};
use crate::prakriya::Prakriya;
use crate::tag::Tag;
use crate::term::Term;

// --- TermView -----------------------------------------------------------------

/// A read-only window over a contiguous run of terms.
///
/// Construction returns `None` when no applicable run exists at the given
/// position; callers treat that as "this rule does not apply here", not as an
/// error. To mutate, index into `prakriya.terms` with [`TermView::start`] /
/// [`TermView::end`].
#[derive(Clone, Copy, Debug)]
pub struct TermView<'a> {
    p: &'a Prakriya,
    start: usize,
    end: usize,
}

impl<'a> TermView<'a> {
    /// Build the minimal atomic unit starting at index `i`, dispatching on the
    /// kind of the term found there.
    pub fn make(p: &'a Prakriya, i: usize) -> Option<Self> {
        let first = p.terms.get(i)?;
        if first.any(Tag::DHATU) {
            Self::of_dhatu(p, i)
        } else if first.any(Tag::AGAMA | Tag::PRATYAYA) {
            Self::of_pratyaya(p, i)
        } else if first.any(Tag::ABHYASA | Tag::UPASARGA) {
            Some(TermView { p, start: i, end: i + 1 })
        } else {
            None
        }
    }

    /// A root plus any directly following `k`-it augments.
    pub fn of_dhatu(p: &'a Prakriya, i: usize) -> Option<Self> {
        let mut end = i;
        for t in &p.terms[i..] {
            if t.any(Tag::DHATU) || (end > i && t.all(Tag::AGAMA) && t.has_it('k')) {
                end += 1;
            } else {
                break;
            }
        }
        if end > i { Some(TermView { p, start: i, end }) } else { None }
    }

    /// Any leading augments plus the suffix they attach to. Scans past
    /// suffixes whose text was deleted until a non-empty one is found.
    pub fn of_pratyaya(p: &'a Prakriya, i: usize) -> Option<Self> {
        let mut end = i;
        for t in &p.terms[i..] {
            if t.any(Tag::AGAMA) {
                end += 1;
            } else if t.any(Tag::PRATYAYA) {
                end += 1;
                if !t.is_empty() {
                    return Some(TermView { p, start: i, end });
                }
            } else {
                return None;
            }
        }
        None
    }

    /// Index of the first term in the view.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Index one past the last term in the view.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The terms in the view.
    pub fn terms(&self) -> &'a [Term] {
        &self.p.terms[self.start..self.end]
    }

    /// The first sound, skipping terms whose text was deleted.
    pub fn adi(&self) -> Option<char> {
        self.terms().iter().find(|t| !t.is_empty()).and_then(|t| t.adi())
    }

    /// The last sound, skipping terms whose text was deleted.
    pub fn antya(&self) -> Option<char> {
        self.terms().iter().rev().find(|t| !t.is_empty()).and_then(|t| t.antya())
    }

    /// The concatenated text of the view.
    pub fn text(&self) -> String {
        self.terms().iter().map(|t| t.text.as_str()).collect()
    }

    /// The first term with non-empty text, with its index in the derivation.
    pub fn first_non_empty(&self) -> Option<(usize, &'a Term)> {
        self.terms().iter().enumerate().find(|(_, t)| !t.is_empty()).map(|(j, t)| (self.start + j, t))
    }

    /// Whether every tag in `tags` is carried by some non-empty term, so a
    /// deleted augment does not satisfy a tag check.
    pub fn all(&self, tags: Tag) -> bool {
        tags.iter().all(|tag| self.terms().iter().any(|t| !t.is_empty() && t.all(tag)))
    }

    /// Whether any non-empty term carries any of `tags`.
    pub fn any(&self, tags: Tag) -> bool {
        self.terms().iter().any(|t| !t.is_empty() && t.any(tags))
    }
}

/// Partition the whole derivation into atomic units: augments group with the
/// suffix that follows them, and a `k`-it augment groups with the root before
/// it. Errs on a term kind no well-formed pipeline produces at this stage.
pub fn partition(p: &Prakriya) -> Result<Vec<TermView<'_>>> {
    let mut views = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < p.terms.len() {
        let t = &p.terms[i];
        if t.any(Tag::AGAMA) {
            // Buffers with the suffix that follows.
        } else if t.any(Tag::PRATYAYA | Tag::ABHYASA) {
            views.push(TermView { p, start, end: i + 1 });
            start = i + 1;
        } else if t.any(Tag::DHATU) {
            if let Some(next) = p.terms.get(i + 1) {
                if next.all(Tag::AGAMA) && next.has_it('k') {
                    i += 1;
                }
            }
            views.push(TermView { p, start, end: i + 1 });
            start = i + 1;
        } else {
            return Err(Error::ContractViolation(format!("cannot partition term {t:?}")));
        }
        i += 1;
    }
    Ok(views)
}

// --- StringView ---------------------------------------------------------------

/// A window that treats a run of terms as one logical string.
///
/// Every operation locates the owning term by running length offsets computed
/// from the terms' *current* texts, so edits made through the view (or through
/// the terms directly, between operations) never desynchronize it.
#[derive(Debug)]
pub struct StringView<'a> {
    terms: &'a mut [Term],
}

impl<'a> StringView<'a> {
    /// View `terms` — the whole derivation or any contiguous sub-range — as
    /// one string.
    pub fn new(terms: &'a mut [Term]) -> Self {
        StringView { terms }
    }

    /// The concatenated text.
    pub fn text(&self) -> String {
        self.terms.iter().map(|t| t.text.as_str()).collect()
    }

    /// The sound at logical index `i`.
    pub fn char_at(&self, i: usize) -> Option<char> {
        let mut cur = 0;
        for t in self.terms.iter() {
            let delta = t.text.len();
            if i < cur + delta {
                return t.text.chars().nth(i - cur);
            }
            cur += delta;
        }
        None
    }

    /// Replace the sound at logical index `i` with `sub` (which may be empty
    /// or more than one sound), rewriting only the owning term. Out-of-range
    /// indices are ignored.
    pub fn set(&mut self, i: usize, sub: &str) {
        let mut cur = 0;
        for t in self.terms.iter_mut() {
            let delta = t.text.len();
            if i < cur + delta {
                let offset = i - cur;
                t.text = format!("{}{}{}", &t.text[..offset], sub, &t.text[offset + 1..]);
                return;
            }
            cur += delta;
        }
    }

    /// Delete logical range `start..end`, which may span any number of term
    /// boundaries (including terms whose text is already empty). Each affected
    /// term loses only its own slice of the range.
    pub fn delete_span(&mut self, start: usize, end: usize) {
        let mut offset = 0;
        for t in self.terms.iter_mut() {
            let len_t = t.text.len();
            let t_start = start.saturating_sub(offset);
            if t_start < len_t && end > offset {
                let t_end = (end - offset).min(len_t);
                t.text = format!("{}{}", &t.text[..t_start], &t.text[t_end..]);
            }
            offset += len_t;
        }
    }

    /// Index (within this view's slice) of the term owning logical index `i`.
    pub fn term_index_at(&self, i: usize) -> Option<usize> {
        let mut cur = 0;
        for (j, t) in self.terms.iter().enumerate() {
            let delta = t.text.len();
            if i < cur + delta {
                return Some(j);
            }
            cur += delta;
        }
        None
    }

    /// The term owning logical index `i`, for edits that are not
    /// character-level (tag changes and the like).
    pub fn term_at_mut(&mut self, i: usize) -> Option<&mut Term> {
        let j = self.term_index_at(i)?;
        Some(&mut self.terms[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn tagged(text: &str, tags: Tag) -> Term {
        let mut t = Term::upadesha(text);
        t.add_tags(tags);
        t
    }

    fn prakriya(terms: Vec<Term>) -> Prakriya {
        Prakriya::new(terms, Tag::empty(), HashMap::new())
    }

    // dviz + (deleted) yAs + s + t
    fn dvis_yas_s_t() -> Prakriya {
        let mut yas = tagged("", Tag::PRATYAYA);
        yas.u = Some("yAsu~w".to_string());
        prakriya(vec![
            tagged("dviz", Tag::DHATU),
            yas,
            tagged("s", Tag::PRATYAYA),
            tagged("t", Tag::PRATYAYA | Tag::TIN),
        ])
    }

    #[test]
    fn pratyaya_view_scans_past_deleted_suffixes() {
        let p = dvis_yas_s_t();
        let view = TermView::make(&p, 1).unwrap();
        assert_eq!((view.start(), view.end()), (1, 3));
        assert_eq!(view.text(), "s");
        assert_eq!(view.adi(), Some('s'));
        assert_eq!(view.antya(), Some('s'));
        assert_eq!(view.first_non_empty().unwrap().0, 2);
    }

    #[test]
    fn pratyaya_view_groups_leading_agamas() {
        let mut it = Term::agama("iw");
        it.text = "i".to_string();
        let p = prakriya(vec![tagged("kf", Tag::DHATU), it, tagged("sya", Tag::PRATYAYA)]);
        let view = TermView::make(&p, 1).unwrap();
        assert_eq!((view.start(), view.end()), (1, 3));
        assert_eq!(view.text(), "isya");
        assert_eq!(view.adi(), Some('i'));
    }

    #[test]
    fn dhatu_view_includes_kit_agama() {
        let mut tuk = Term::agama("tu~k");
        tuk.text = "t".to_string();
        tuk.add_it('k');
        let p = prakriya(vec![tagged("si", Tag::DHATU), tuk, tagged("tfc", Tag::PRATYAYA)]);
        let view = TermView::make(&p, 0).unwrap();
        assert_eq!((view.start(), view.end()), (0, 2));
        assert_eq!(view.text(), "sit");
    }

    #[test]
    fn no_view_where_no_unit_starts() {
        let p = prakriya(vec![Term::from_text("ja"), tagged("gam", Tag::DHATU)]);
        assert!(TermView::make(&p, 0).is_none());
        assert!(TermView::make(&p, 5).is_none());
    }

    #[test]
    fn tag_queries_ignore_deleted_terms() {
        let p = dvis_yas_s_t();
        let view = TermView::make(&p, 1).unwrap();
        // The deleted yAs term is PRATYAYA-tagged but empty, so only the
        // non-empty `s` term counts.
        assert!(view.all(Tag::PRATYAYA));
        assert!(!view.any(Tag::TIN));
    }

    #[test]
    fn empty_view_has_no_sounds() {
        let p = prakriya(vec![tagged("", Tag::PRATYAYA), tagged("", Tag::PRATYAYA)]);
        let view = TermView { p: &p, start: 0, end: 2 };
        assert_eq!(view.adi(), None);
        assert_eq!(view.antya(), None);
        assert_eq!(view.text(), "");
    }

    #[test]
    fn partition_groups_agamas_and_kit_augments() {
        let mut tuk = Term::agama("tu~k");
        tuk.text = "t".to_string();
        tuk.add_it('k');
        let mut it = Term::agama("iw");
        it.text = "i".to_string();
        let p = prakriya(vec![
            tagged("si", Tag::DHATU),
            tuk,
            it,
            tagged("tA", Tag::PRATYAYA),
        ]);

        let views = partition(&p).unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].text(), "sit");
        assert_eq!(views[1].text(), "itA");
    }

    #[test]
    fn partition_rejects_unclassified_terms() {
        let p = prakriya(vec![Term::from_text("ja")]);
        assert!(matches!(partition(&p), Err(Error::ContractViolation(_))));
    }

    #[test]
    fn string_view_set_then_char_at_round_trips() {
        let mut terms = vec![Term::from_text("gam"), Term::from_text("ti")];
        let mut sv = StringView::new(&mut terms);
        assert_eq!(sv.char_at(3), Some('t'));

        sv.set(3, "D");
        assert_eq!(sv.char_at(3), Some('D'));
        assert_eq!(sv.text(), "gamDi");
        // Only the owning term changed.
        assert_eq!(terms[0].text, "gam");
        assert_eq!(terms[1].text, "Di");
    }

    #[test]
    fn string_view_set_with_multichar_substitute() {
        let mut terms = vec![Term::from_text("kf")];
        let mut sv = StringView::new(&mut terms);
        sv.set(1, "ar");
        assert_eq!(sv.text(), "kar");
    }

    #[test]
    fn delete_span_within_one_term() {
        let mut terms = vec![Term::from_text("gacCati")];
        let mut sv = StringView::new(&mut terms);
        sv.delete_span(1, 3);
        assert_eq!(sv.text(), "gCati");
    }

    #[test]
    fn delete_span_across_terms_including_empty_ones() {
        // Lengths 1, 0, N: the span crosses the zero-length term untouched.
        let mut terms = vec![Term::from_text("a"), Term::from_text(""), Term::from_text("gacCati")];
        let mut sv = StringView::new(&mut terms);
        sv.delete_span(0, 3);
        assert_eq!(sv.text(), "cCati");
        assert_eq!(terms[0].text, "");
        assert_eq!(terms[1].text, "");
        assert_eq!(terms[2].text, "cCati");
    }

    #[test]
    fn delete_span_recomputes_offsets_between_operations() {
        let mut terms = vec![Term::from_text("AB"), Term::from_text("CDEF")];
        let mut sv = StringView::new(&mut terms);
        sv.delete_span(1, 3);
        assert_eq!(sv.text(), "ADEF");
        // The earlier deletion shrank the first term; offsets must be fresh.
        sv.delete_span(1, 2);
        assert_eq!(sv.text(), "AEF");
    }

    #[test]
    fn term_lookup_by_logical_index() {
        let mut terms = vec![Term::from_text("a"), Term::from_text(""), Term::from_text("ti")];
        let mut sv = StringView::new(&mut terms);
        assert_eq!(sv.term_index_at(0), Some(0));
        assert_eq!(sv.term_index_at(1), Some(2));
        assert_eq!(sv.term_index_at(3), None);

        sv.term_at_mut(2).unwrap().add_tags(Tag::TIN);
        assert!(terms[2].all(Tag::TIN));
    }
}
