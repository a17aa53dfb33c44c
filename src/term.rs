//! The mutable unit of a derivation.
//!
//! A *term* generalizes an upadeśa: it is any contiguous group of sounds the
//! derivation manipulates as a unit — a root, an affix, an inserted augment,
//! or an artifact such as an abhyāsa copy. Terms keep their position in the
//! derivation even after their text is deleted, so indices taken before a
//! mutation stay meaningful.

use crate::tag::Tag;

/// One segment of a derivation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Term {
    /// The upadeśa (canonical, underivable) form this term was introduced
    /// with. `None` for terms that are themselves derivation artifacts.
    pub u: Option<String>,
    /// The current surface form. Joining the text of all terms in order gives
    /// the derivation's current output. May be empty: a deleted term persists
    /// as a zero-length placeholder.
    pub text: String,
    /// Saṃjñās and semantic conditions. Added and removed explicitly only.
    pub tags: Tag,
    /// It-letter markers (anubandhas) attached to this term.
    pub its: Vec<char>,
    /// For roots, the gaṇa; disambiguates identical spellings across classes.
    pub gana: Option<u8>,
    /// For roots, the index within the gaṇa.
    pub number: Option<u16>,
}

impl Term {
    /// Make a term from an upadeśa.
    pub fn upadesha(u: &str) -> Self {
        Term {
            u: Some(u.to_string()),
            text: u.to_string(),
            tags: Tag::empty(),
            its: Vec::new(),
            gana: None,
            number: None,
        }
    }

    /// Make a root term. `Tag::DHATU` itself is added later by rule 1.3.1.
    pub fn dhatu(u: &str, gana: u8, number: u16) -> Self {
        Term { gana: Some(gana), number: Some(number), ..Term::upadesha(u) }
    }

    /// Make an augment. Tagged `AGAMA` at construction because no other rule
    /// defines the tag.
    pub fn agama(u: &str) -> Self {
        Term { tags: Tag::AGAMA, ..Term::upadesha(u) }
    }

    /// Make a generic artifact term, e.g. an abhyāsa copy.
    pub fn from_text(text: &str) -> Self {
        Term {
            u: None,
            text: text.to_string(),
            tags: Tag::empty(),
            its: Vec::new(),
            gana: None,
            number: None,
        }
    }

    /// The first sound, if any.
    pub fn adi(&self) -> Option<char> {
        self.text.chars().next()
    }

    /// The last sound, if any.
    pub fn antya(&self) -> Option<char> {
        self.text.chars().last()
    }

    /// The penultimate sound, if any.
    pub fn upadha(&self) -> Option<char> {
        self.text.chars().rev().nth(1)
    }

    /// The sound at `i`. For the rare rules that address neither the first,
    /// last, nor penultimate sound.
    pub fn text_at(&self, i: usize) -> Option<char> {
        self.text.chars().nth(i)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the term's upadeśa is exactly `u`.
    pub fn has_u(&self, u: &str) -> bool {
        self.u.as_deref() == Some(u)
    }

    /// Whether the term's upadeśa is one of `us`.
    pub fn has_u_in(&self, us: &[&str]) -> bool {
        us.iter().any(|u| self.has_u(u))
    }

    /// Whether all of `tags` are present.
    pub fn all(&self, tags: Tag) -> bool {
        self.tags.contains(tags)
    }

    /// Whether any of `tags` is present.
    pub fn any(&self, tags: Tag) -> bool {
        self.tags.intersects(tags)
    }

    pub fn add_tags(&mut self, tags: Tag) {
        self.tags |= tags;
    }

    pub fn remove_tags(&mut self, tags: Tag) {
        self.tags &= !tags;
    }

    /// Whether the it letter `c` is attached.
    pub fn has_it(&self, c: char) -> bool {
        self.its.contains(&c)
    }

    /// Whether any of `cs` is attached.
    pub fn has_any_it(&self, cs: &[char]) -> bool {
        cs.iter().any(|c| self.has_it(*c))
    }

    pub fn add_it(&mut self, c: char) {
        if !self.has_it(c) {
            self.its.push(c);
        }
    }

    pub fn remove_it(&mut self, c: char) {
        self.its.retain(|x| *x != c);
    }
}
