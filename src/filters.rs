//! Common term predicates.
//!
//! Rules condition on a small number of recurring phonological and
//! morphological properties; this module names them once so rule code reads
//! like the conditions it implements.

use once_cell::sync::Lazy;

use crate::sounds::{self, SoundSet, HRASVA};
use crate::tag::Tag;
use crate::term::Term;

static AC: Lazy<SoundSet> = Lazy::new(|| sounds::s("ac").expect("fixed class"));
static HAL: Lazy<SoundSet> = Lazy::new(|| sounds::s("hal").expect("fixed class"));

/// Whether `t` ends in a conjunct (two or more consonants).
pub fn samyoganta(t: &Term) -> bool {
    let Some(y) = t.antya() else { return false };
    // A final C hides the tuk-agama it contains.
    if y == 'C' {
        return true;
    }
    match t.upadha() {
        Some(x) => HAL.contains(x) && HAL.contains(y),
        None => false,
    }
}

/// Whether `t` begins with a conjunct.
pub fn samyogadi(t: &Term) -> bool {
    let mut chars = t.text.chars();
    match (chars.next(), chars.next()) {
        (Some(x), Some(y)) => HAL.contains(x) && HAL.contains(y),
        _ => false,
    }
}

/// Whether `t` is the iṭ-āgama.
pub fn is_it_agama(t: &Term) -> bool {
    t.has_u("iw") && t.all(Tag::AGAMA)
}

/// Whether `t` is apr̥kta (a single-sound pratyaya).
pub fn is_aprkta(t: &Term) -> bool {
    t.all(Tag::PRATYAYA) && t.text.chars().count() == 1
}

/// Whether the last syllable of `t` is or could be laghu.
/// 1.4.10 hrasvaṃ laghu; 1.4.11 saṃyoge guru
pub fn is_laghu(t: &Term) -> bool {
    let ends_hrasva = t.antya().is_some_and(|c| HRASVA.contains(c));
    let upadha_hrasva = t.upadha().is_some_and(|c| HRASVA.contains(c));
    ends_hrasva || (upadha_hrasva && !samyoganta(t) && t.antya() != Some('C'))
}

/// Whether the last sound of `t` is a short vowel.
pub fn is_hrasva(t: &Term) -> bool {
    t.antya().is_some_and(|c| HRASVA.contains(c))
}

/// Whether the last syllable of `t` is guru.
pub fn is_guru(t: &Term) -> bool {
    !is_laghu(t)
}

/// Whether `t` carries a `k` or `N` it.
pub fn is_knit(t: &Term) -> bool {
    t.has_any_it(&['k', 'N'])
}

/// Whether `t` is the root as ("to be") of gaṇa 2.
pub fn is_asti(t: &Term) -> bool {
    t.has_u("asa~") && t.gana == Some(2)
}

/// Whether `t` has exactly one vowel.
pub fn is_eka_ac(t: &Term) -> bool {
    let num_vowels = t.text.chars().filter(|c| AC.contains(*c)).count();
    // Also accept a vocalized f, so ekac applies under the am-agama.
    num_vowels == 1 || t.text.contains("fa")
}

/// Whether guṇa may apply to `c` given the following term `n`.
pub fn can_use_guna(c: &Term, n: &Term) -> bool {
    // 1.1.5 kṅiti ca
    if n.has_any_it(&['k', 'N']) {
        return false;
    }
    // 1.1.6 dīdhī-vevī-iṭām
    if c.has_u_in(&["dIDIN", "vevIN"]) || is_it_agama(c) {
        return false;
    }
    // 1.1.3 iko guṇavṛddhī
    true
}
