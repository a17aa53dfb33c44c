//! Sound classification and feature mapping.
//!
//! The grammar orders its phonemes with a special table optimized for stating
//! rules: fourteen rows of sounds, each closed by a meta letter (*it*). A
//! *pratyāhāra* names a contiguous range over this table — an initial sound
//! plus a terminating it letter — and denotes every sound from the initial
//! sound through the row the it letter closes. `ac`, for example, denotes all
//! vowels.
//!
//! Sounds are written in SLP1 transliteration, where every phoneme is a single
//! ASCII `char`.
//!
//! This module provides:
//!
//! - [`s`]: build a [`SoundSet`] from a compound expression (bare vowels,
//!   `ku~`-style savarṇa references, pratyāhāras).
//! - [`savarna`]: the fixed group of sounds sharing oral articulation with a
//!   sound (1.1.9).
//! - [`map_sounds`]: map each sound of one set to its closest counterpart in
//!   another by articulatory features (1.1.50 *sthāne'ntaratamaḥ*). This is
//!   the only sound-substitution mechanism in the engine; no rule picks
//!   substitutes by spelling comparison.
//! - Vowel gradation helpers: [`guna`], [`vrddhi`], [`hrasva`], [`dirgha`].
//!
//! All entry points are pure. Results are memoized in module-level caches
//! keyed by the argument expression, and the per-sound feature table is built
//! once on first use.

use std::collections::HashMap;
use std::ops::BitOr;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::errors::{Error, Result};

/// The fourteen rows of the sound table. Each row lists its sounds followed by
/// the it letter that closes it. `R` closes two rows; see [`s`] for how the
/// second occurrence is selected.
const SHIVA_SUTRAS: &[(&[char], char)] = &[
    (&['a', 'i', 'u'], 'R'),
    (&['f', 'x'], 'k'),
    (&['e', 'o'], 'N'),
    (&['E', 'O'], 'c'),
    (&['h', 'y', 'v', 'r'], 'w'),
    (&['l'], 'R'),
    (&['Y', 'm', 'N', 'R', 'n'], 'm'),
    (&['J', 'B'], 'Y'),
    (&['G', 'Q', 'D'], 'z'),
    (&['j', 'b', 'g', 'q', 'd'], 'S'),
    (&['K', 'P', 'C', 'W', 'T', 'c', 'w', 't'], 'v'),
    (&['k', 'p'], 'y'),
    (&['S', 'z', 's'], 'r'),
    (&['h'], 'l'),
];

/// Short vowels.
pub const HRASVA: &str = "aiufx";
/// Long vowels and diphthongs.
pub const DIRGHA: &str = "AIUFXeEoO";
/// Guṇa vowels.
pub const GUNA: &str = "aeo";
/// Vṛddhi vowels.
pub const VRDDHI: &str = "AEO";
/// Aspirated consonants.
pub const MAHAPRANA: &str = "KGCJWQTDPBh";

// --- SoundSet ----------------------------------------------------------------

/// An ordered, de-duplicated set of sounds.
///
/// Ordering matters: list substitution is done in 1:1 correspondence
/// (*yathāsaṁkhyam anudeśaḥ samānām*), and [`map_sounds`] breaks ties by the
/// target set's defined order. Two sets built from the same expression always
/// compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SoundSet {
    items: String,
}

impl SoundSet {
    fn from_chars<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut items = String::new();
        for c in iter {
            if !items.contains(c) {
                items.push(c);
            }
        }
        SoundSet { items }
    }

    /// Membership test.
    pub fn contains(&self, c: char) -> bool {
        self.items.contains(c)
    }

    /// The sounds in defined order.
    pub fn iter(&self) -> std::str::Chars<'_> {
        self.items.chars()
    }

    /// The sounds as a string, in defined order.
    pub fn items(&self) -> &str {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// A regex character class matching exactly these sounds.
    pub fn pattern(&self) -> String {
        format!("[{}]", self.items)
    }
}

impl BitOr for &SoundSet {
    type Output = SoundSet;

    fn bitor(self, rhs: &SoundSet) -> SoundSet {
        SoundSet::from_chars(self.iter().chain(rhs.iter()))
    }
}

// --- Pratyahara and savarna ---------------------------------------------------

static PRATYAHARA_CACHE: Lazy<Mutex<HashMap<(String, bool), SoundSet>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Expand a single pratyāhāra, e.g. `"ac"` or `"hal"`.
///
/// Long vowels are included even though the table lists only short ones.
pub fn pratyahara(expr: &str) -> Result<SoundSet> {
    pratyahara_with(expr, false)
}

fn pratyahara_with(expr: &str, use_second_n: bool) -> Result<SoundSet> {
    let key = (expr.to_string(), use_second_n);
    if let Some(hit) = PRATYAHARA_CACHE.lock().unwrap().get(&key) {
        return Ok(hit.clone());
    }
    let set = pratyahara_uncached(expr, use_second_n)?;
    PRATYAHARA_CACHE.lock().unwrap().insert(key, set.clone());
    Ok(set)
}

fn pratyahara_uncached(expr: &str, use_second_n: bool) -> Result<SoundSet> {
    let invalid = || Error::InvalidRange { expr: expr.to_string() };

    if expr.chars().count() < 2 {
        return Err(invalid());
    }
    let first = expr.chars().next().ok_or_else(invalid)?;
    let it = expr.chars().last().ok_or_else(invalid)?;

    let mut started = false;
    let mut saw_first_it = false;
    let mut items = String::new();
    for (sounds, row_it) in SHIVA_SUTRAS {
        for &sound in *sounds {
            if sound == first {
                started = true;
            }
            if started {
                items.push(sound);
                // Long vowels are not written in the table.
                if HRASVA.contains(sound) {
                    items.push(sound.to_ascii_uppercase());
                }
            }
        }
        if started && it == *row_it {
            if use_second_n && !saw_first_it {
                saw_first_it = true;
            } else {
                break;
            }
        }
    }

    if items.is_empty() {
        return Err(invalid());
    }
    Ok(SoundSet::from_chars(items.chars()))
}

/// The fixed group of sounds sharing oral articulation with `c` (1.1.9
/// *tulyāsyaprayatnaṃ savarṇam*): a vowel-length pair or one of the five stop
/// rows. Ungrouped sounds yield a one-element set.
pub fn savarna(c: char) -> SoundSet {
    const GROUPS: &[&str] = &[
        "aA", "iI", "uU", "fFxX", "kKgGN", "cCjJY", "wWqQR", "tTdDn", "pPbBm",
    ];
    for group in GROUPS {
        if group.contains(c) {
            return SoundSet::from_chars(group.chars());
        }
    }
    SoundSet::from_chars([c])
}

// --- Compound expressions -----------------------------------------------------

static S_CACHE: Lazy<Mutex<HashMap<String, SoundSet>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Create an ordered set of sounds from a whitespace-separated expression.
///
/// Each word of `expr` is one of:
///
/// - a bare vowel (`"a"`), which implies its savarṇa partners;
/// - an udit reference (`"ku~"`), which expands to the sound's savarṇa group;
/// - a single sound (`"H"`);
/// - a pratyāhāra (`"ac"`, `"hal"`);
/// - a pratyāhāra with a trailing `2` (`"iR2"`), which terminates at the
///   *second* occurrence of a doubled it letter.
///
/// ```
/// use vyakarana::sounds::s;
///
/// let ik = s("ik").unwrap();
/// assert!(ik.contains('i') && ik.contains('U') && !ik.contains('e'));
///
/// let kanthya = s("a ku~ h H").unwrap();
/// assert!(kanthya.contains('g') && kanthya.contains('H'));
/// ```
pub fn s(expr: &str) -> Result<SoundSet> {
    if let Some(hit) = S_CACHE.lock().unwrap().get(expr) {
        return Ok(hit.clone());
    }
    let set = s_uncached(expr)?;
    S_CACHE.lock().unwrap().insert(expr.to_string(), set.clone());
    Ok(set)
}

fn single_char(word: &str) -> Option<char> {
    let mut chars = word.chars();
    chars.next().filter(|_| chars.next().is_none())
}

fn s_uncached(expr: &str) -> Result<SoundSet> {
    let mut items = String::new();
    for word in expr.split_whitespace() {
        if let Some(stem) = word.strip_suffix("u~") {
            let c = single_char(stem).ok_or_else(|| Error::InvalidRange { expr: expr.to_string() })?;
            items.push_str(savarna(c).items());
        } else if let Some(c) = single_char(word) {
            if "aiufxAIUFX".contains(c) {
                items.push_str(savarna(c).items());
            } else {
                items.push(c);
            }
        } else if let Some(stem) = word.strip_suffix('2') {
            items.push_str(pratyahara_with(stem, true)?.items());
        } else {
            items.push_str(pratyahara_with(word, false)?.items());
        }
    }
    if items.is_empty() {
        return Err(Error::InvalidRange { expr: expr.to_string() });
    }
    Ok(SoundSet::from_chars(items.chars()))
}

// --- Articulatory features ----------------------------------------------------

bitflags::bitflags! {
    /// The articulatory features of a sound, across four axes: point of
    /// articulation (sthāna), voicing (ghoṣa), aspiration (prāṇa), and
    /// stricture (prayatna). A sound's feature set is the union of every
    /// feature class it belongs to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SoundFeatures: u16 {
        // Sthana.
        const KANTHA = 1 << 0;
        const TALU = 1 << 1;
        const MURDHA = 1 << 2;
        const DANTA = 1 << 3;
        const OSHTHA = 1 << 4;
        const NASIKA = 1 << 5;
        const KANTHA_TALU = 1 << 6;
        const KANTHA_OSHTHA = 1 << 7;
        const DANTOSHTHA = 1 << 8;
        // Ghosha.
        const GHOSHAVAT = 1 << 9;
        const AGHOSHA = 1 << 10;
        // Prana.
        const MAHAPRANA = 1 << 11;
        const ALPAPRANA = 1 << 12;
        // Prayatna.
        const VIVRTA = 1 << 13;
        const ISHAT = 1 << 14;
        const SPRSHTA = 1 << 15;
    }
}

/// Per-sound feature table, built once from the class definitions below.
static FEATURES: Lazy<HashMap<char, SoundFeatures>> = Lazy::new(|| {
    let classes: &[(SoundFeatures, &str)] = &[
        (SoundFeatures::KANTHA, "a ku~ h H"),
        (SoundFeatures::TALU, "i cu~ y S"),
        (SoundFeatures::MURDHA, "f wu~ r z"),
        (SoundFeatures::DANTA, "x tu~ l s"),
        (SoundFeatures::OSHTHA, "u pu~"),
        (SoundFeatures::NASIKA, "Yam M"),
        (SoundFeatures::KANTHA_TALU, "e E"),
        (SoundFeatures::KANTHA_OSHTHA, "o O"),
        (SoundFeatures::DANTOSHTHA, "v"),
        (SoundFeatures::GHOSHAVAT, "ac haS"),
        (SoundFeatures::AGHOSHA, "Kar"),
        (SoundFeatures::ALPAPRANA, "ac yam jaS car"),
        (SoundFeatures::VIVRTA, "ac h"),
        (SoundFeatures::ISHAT, "yaR Sar"),
        (SoundFeatures::SPRSHTA, "Yay"),
    ];

    let mut map: HashMap<char, SoundFeatures> = HashMap::new();
    for (feature, expr) in classes {
        for c in s(expr).expect("fixed feature class").iter() {
            *map.entry(c).or_default() |= *feature;
        }
    }
    for c in MAHAPRANA.chars() {
        *map.entry(c).or_default() |= SoundFeatures::MAHAPRANA;
    }
    map
});

/// The feature set of `c`. Sounds outside the table have no features.
pub fn features(c: char) -> SoundFeatures {
    FEATURES.get(&c).copied().unwrap_or_default()
}

// --- Closest-sound mapping ----------------------------------------------------

static MAP_CACHE: Lazy<Mutex<HashMap<(String, String), HashMap<char, char>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Map each sound of `left` to its closest counterpart in `right`.
///
/// Closeness is the symmetric difference of the two sounds' feature sets; the
/// smallest difference wins, and ties break by `right`'s defined order. A
/// sound already present in `right` is at distance zero from itself and maps
/// to itself, so mapping a set onto itself is the identity. Per 1.1.50
/// *sthāne'ntaratamaḥ*.
pub fn map_sounds(left: &SoundSet, right: &SoundSet) -> HashMap<char, char> {
    let right_features: Vec<(char, SoundFeatures)> = right.iter().map(|r| (r, features(r))).collect();

    let mut mapping = HashMap::new();
    for l in left.iter() {
        if right.contains(l) {
            mapping.insert(l, l);
            continue;
        }
        let left_q = features(l);

        let mut best = None;
        let mut best_score = u32::MAX;
        for &(r, right_q) in &right_features {
            // The most similar sound is the one that is the least different.
            let score = (left_q ^ right_q).bits().count_ones();
            if score < best_score {
                best = Some(r);
                best_score = score;
            }
        }
        if let Some(r) = best {
            mapping.insert(l, r);
        }
    }
    mapping
}

/// [`map_sounds`] over two sound-class expressions, memoized by the pair.
pub fn map_sounds_s(left: &str, right: &str) -> Result<HashMap<char, char>> {
    let key = (left.to_string(), right.to_string());
    if let Some(hit) = MAP_CACHE.lock().unwrap().get(&key) {
        return Ok(hit.clone());
    }
    let mapping = map_sounds(&s(left)?, &s(right)?);
    MAP_CACHE.lock().unwrap().insert(key, mapping.clone());
    Ok(mapping)
}

// --- Vowel gradation ----------------------------------------------------------

/// 1.1.2 adeṅguṇaḥ; 1.1.3 iko guṇavṛddhī
pub fn guna(c: char) -> Option<&'static str> {
    match c {
        'i' | 'I' => Some("e"),
        'u' | 'U' => Some("o"),
        'f' | 'F' => Some("ar"),
        _ => None,
    }
}

/// 1.1.1 vṛddhirādaic; 1.1.3 iko guṇavṛddhī
pub fn vrddhi(c: char) -> Option<&'static str> {
    match c {
        'a' | 'A' => Some("A"),
        'i' | 'I' | 'e' | 'E' => Some("E"),
        'u' | 'U' | 'o' | 'O' => Some("O"),
        'f' | 'F' | 'x' | 'X' => Some("Ar"),
        _ => None,
    }
}

/// The short counterpart of a vowel. 1.1.48 ūkālo'jjhrasvadīrghaplutaḥ
pub fn hrasva(c: char) -> char {
    match c {
        'A' => 'a',
        'I' | 'e' | 'E' => 'i',
        'U' | 'o' | 'O' => 'u',
        'F' => 'f',
        other => other,
    }
}

/// The long counterpart of a vowel.
pub fn dirgha(c: char) -> char {
    match c {
        'a' => 'A',
        'i' => 'I',
        'u' => 'U',
        'f' => 'F',
        'x' => 'X',
        other => other,
    }
}

static IK: Lazy<SoundSet> = Lazy::new(|| s("ik").expect("fixed class"));

/// Whether `c` can take guṇa (i.e. is an ik vowel).
pub fn can_guna(c: char) -> bool {
    IK.contains(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn chars(text: &str) -> BTreeSet<char> {
        text.chars().collect()
    }

    fn set_of(set: &SoundSet) -> BTreeSet<char> {
        set.iter().collect()
    }

    #[test]
    fn pratyahara_examples() {
        let cases: Vec<(&str, &str)> = vec![
            ("ac", "aAiIuUfFxXeEoO"),
            ("yaR", "yrvl"),
            ("hal", "kKgGNcCjJYwWqQRtTdDnpPbBmyrlvSzsh"),
            ("Yam", "YmNRn"),
            ("Sar", "Szs"),
            ("jaS", "jbgqd"),
        ];
        for (expr, expected) in cases {
            assert_eq!(set_of(&pratyahara(expr).unwrap()), chars(expected), "pratyahara({expr})");
        }
    }

    #[test]
    fn pratyahara_second_occurrence_of_doubled_it() {
        assert_eq!(set_of(&s("iR").unwrap()), chars("iIuU"));
        assert_eq!(set_of(&s("iR2").unwrap()), chars("iIuUfFxXeoEOhyvrl"));
    }

    #[test]
    fn pratyahara_errors() {
        assert!(matches!(pratyahara("Zc"), Err(Error::InvalidRange { .. })));
        assert!(matches!(pratyahara("a"), Err(Error::InvalidRange { .. })));
        assert!(matches!(s(""), Err(Error::InvalidRange { .. })));
    }

    #[test]
    fn savarna_examples() {
        let cases: Vec<(char, &str)> = vec![('k', "kKgGN"), ('c', "cCjJY"), ('a', "aA"), ('H', "H")];
        for (sound, expected) in cases {
            assert_eq!(set_of(&savarna(sound)), chars(expected), "savarna({sound})");
        }
    }

    #[test]
    fn s_understands_compound_expressions() {
        assert_eq!(set_of(&s("ku~").unwrap()), chars("kKgGN"));
        assert_eq!(set_of(&s("a ku~ h H").unwrap()), chars("aAkKgGNhH"));
        assert_eq!(set_of(&s("Yam M").unwrap()), chars("YmNRnM"));
    }

    #[test]
    fn s_is_idempotent_and_order_stable() {
        let first = s("ac").unwrap();
        let second = s("ac").unwrap();
        assert_eq!(first, second);
        assert_eq!(set_of(&first), chars("aAiIuUfFxXeEoO"));
        assert_eq!(first.len(), 14);
    }

    #[test]
    fn map_sounds_jhal_to_jash() {
        let mapping = map_sounds_s("Jal", "jaS").unwrap();
        let expected: Vec<(char, char)> = vec![
            ('J', 'j'),
            ('B', 'b'),
            ('G', 'g'),
            ('Q', 'q'),
            ('D', 'd'),
            ('j', 'j'),
            ('b', 'b'),
            ('g', 'g'),
            ('q', 'q'),
            ('d', 'd'),
            ('K', 'g'),
            ('P', 'b'),
            ('C', 'j'),
            ('W', 'q'),
            ('T', 'd'),
            ('c', 'j'),
            ('w', 'q'),
            ('t', 'd'),
            ('k', 'g'),
            ('p', 'b'),
            ('S', 'j'),
            ('z', 'q'),
            ('s', 'd'),
            ('h', 'g'),
        ];
        assert_eq!(mapping.len(), expected.len());
        for (from, to) in expected {
            assert_eq!(mapping.get(&from), Some(&to), "{from} -> {to}");
        }
    }

    #[test]
    fn map_sounds_ku_h_to_cu() {
        let mapping = map_sounds_s("ku~ h", "cu~").unwrap();
        let expected: Vec<(char, char)> =
            vec![('k', 'c'), ('K', 'C'), ('g', 'j'), ('G', 'J'), ('N', 'Y'), ('h', 'J')];
        assert_eq!(mapping.len(), expected.len());
        for (from, to) in expected {
            assert_eq!(mapping.get(&from), Some(&to), "{from} -> {to}");
        }
    }

    #[test]
    fn map_sounds_to_self_is_identity() {
        // A long vowel's feature set equals its short partner's; the
        // distance-zero self match must still win the tie.
        let ac = s("ac").unwrap();
        let mapping = map_sounds(&ac, &ac);
        for c in ac.iter() {
            assert_eq!(mapping.get(&c), Some(&c));
        }
    }

    #[test]
    fn sound_set_union_and_pattern() {
        let union = &s("Sar").unwrap() | &s("Yam").unwrap();
        assert_eq!(set_of(&union), chars("SzsYmNRn"));
        assert_eq!(s("Sar").unwrap().pattern(), "[Szs]");
    }

    #[test]
    fn gradation_helpers() {
        assert_eq!(guna('i'), Some("e"));
        assert_eq!(guna('F'), Some("ar"));
        assert_eq!(guna('a'), None);
        assert_eq!(vrddhi('i'), Some("E"));
        assert_eq!(vrddhi('a'), Some("A"));
        assert_eq!(hrasva('O'), 'u');
        assert_eq!(hrasva('k'), 'k');
        assert_eq!(dirgha('f'), 'F');
        assert!(can_guna('u'));
        assert!(!can_guna('a'));
    }
}
