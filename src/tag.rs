//! Tags attached to terms and derivations.
//!
//! A [`Tag`] combines two concepts: saṃjñā (technical designations such as
//! *dhātu* or *pratyaya*) and semantic conditions (purusha, vacana, prayoga,
//! dialect). The full inventory is closed, so tags are represented as bits in
//! a single mask; `all`/`any` queries on terms and derivations are plain
//! bit-set operations.
//!
//! It-letter markers (anubandhas) are the one *open* label category and live
//! on [`crate::Term`] as a separate list of sounds, not here.

bitflags::bitflags! {
    /// A set of saṃjñās and semantic conditions.
    ///
    /// A single constant doubles as a one-element set, so `t.all(Tag::DHATU)`
    /// and `t.any(Tag::AGAMA | Tag::PRATYAYA)` read the same way whether one
    /// or many tags are involved.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Tag: u128 {
        // Morpheme types.
        const UPASARGA = 1 << 0;
        const DHATU = 1 << 1;
        const GHU = 1 << 2;
        const AGAMA = 1 << 3;
        const PRATYAYA = 1 << 4;
        const PRATIPADIKA = 1 << 5;
        const VIBHAKTI = 1 << 6;
        const SARVANAMA = 1 << 7;
        const SARVANAMASTHANA = 1 << 8;
        const TIN = 1 << 9;
        const NISTHA = 1 << 10;
        const KRT = 1 << 11;
        const KRTYA = 1 << 12;
        const SUP = 1 << 13;
        const TADDHITA = 1 << 14;
        const VIKARANA = 1 << 15;

        // Deletion (lopa) varieties.
        const LUK = 1 << 16;
        const SLU = 1 << 17;
        const LUP = 1 << 18;

        // Accent.
        const ANUDATTA = 1 << 19;
        const SVARITA = 1 << 20;
        const ANUDATTET = 1 << 21;
        const SVARITET = 1 << 22;

        // Pada.
        const PARASMAIPADA = 1 << 23;
        const ATMANEPADA = 1 << 24;

        // Semantic conditions.
        const ASHIH = 1 << 25;
        const SANARTHA = 1 << 26;
        const YANARTHA = 1 << 27;

        // Dialect.
        const CHANDASI = 1 << 28;

        // Prayoga.
        const KARTARI = 1 << 29;
        const BHAVE = 1 << 30;
        const KARMANI = 1 << 31;

        // Purusha.
        const PRATHAMA = 1 << 32;
        const MADHYAMA = 1 << 33;
        const UTTAMA = 1 << 34;

        // Vacana.
        const EKAVACANA = 1 << 35;
        const DVIVACANA = 1 << 36;
        const BAHUVACANA = 1 << 37;

        // Vibhakti of a sup-pratyaya.
        const V1 = 1 << 38;
        const V2 = 1 << 39;
        const V3 = 1 << 40;
        const V4 = 1 << 41;
        const V5 = 1 << 42;
        const V6 = 1 << 43;
        const V7 = 1 << 44;

        // Linga.
        const PUM = 1 << 45;
        const STRI = 1 << 46;
        const NAPUMSAKA = 1 << 47;

        // Stem types.
        const NADI = 1 << 48;
        const GHI = 1 << 49;

        const SAMBODHANA = 1 << 50;
        const AMANTRITA = 1 << 51;
        const SAMBUDDHI = 1 << 52;

        // Dvitva.
        const ABHYASA = 1 << 53;
        const ABHYASTA = 1 << 54;

        // Suffix strength.
        const ARDHADHATUKA = 1 << 55;
        const SARVADHATUKA = 1 << 56;

        const SAT = 1 << 57;

        // Cycle-breaking one-shot flags. Certain conditions cross sections of
        // the grammar in a way that is difficult to track locally; each flag
        // below has a single writing rule and is never cleared.
        //
        // Set on a term:
        const F_GUNA_APAVADA = 1 << 58;
        const F_GUNA = 1 << 59;
        // Set on the derivation:
        const F_ADESHA_ADI = 1 << 60;
        const F_NO_ARDHADHATUKA = 1 << 61;
        const F_ANIT_KSA = 1 << 62;
        const F_SET_SIC = 1 << 63;
        const F_AT_AGAMA = 1 << 64;
        const F_AT_LOPA = 1 << 65;
    }
}
