use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Every annotation field value carries a canonical short code: the string
/// typed in a chord, stored in exports, and accepted back on import.
/// Changing a code is a compatibility-breaking change to exported documents.
macro_rules! coded_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
        #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
        #[archive(check_bytes)]
        #[repr(u8)]
        pub enum $name { $($variant),+ }

        impl $name {
            pub const fn code(self) -> &'static str {
                match self { $(Self::$variant => $code),+ }
            }

            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

coded_enum! {
    /// Part of speech. Letters match the editor's POS shortcut keys.
    PartOfSpeech {
        Noun = "N",
        Verb = "V",
        Adjective = "A",
        Pronoun = "R",
        Determiner = "D",
        Adverb = "B",
        Conjunction = "C",
        Preposition = "E",
        Interjection = "I",
    }
}

coded_enum! {
    Gender {
        Masculine = "m",
        Feminine = "f",
        Neuter = "n",
    }
}

coded_enum! {
    Number {
        Singular = "s",
        Plural = "p",
    }
}

coded_enum! {
    /// Old English has five cases; also used for preposition government.
    Case {
        Nominative = "n",
        Accusative = "a",
        Genitive = "g",
        Dative = "d",
        Instrumental = "i",
    }
}

coded_enum! {
    Declension {
        Strong = "s",
        Weak = "w",
        Other = "o",
        IStem = "i",
        UStem = "u",
        JaStem = "ja",
        JoStem = "jo",
        WaStem = "wa",
        WoStem = "wo",
    }
}

coded_enum! {
    PronounType {
        Personal = "p",
        Reflexive = "rx",
        Relative = "r",
        Demonstrative = "d",
        Interrogative = "i",
        Miscellaneous = "m",
        Indefinite = "ind",
    }
}

coded_enum! {
    VerbClass {
        Anomalous = "a",
        Weak1 = "w1",
        Weak2 = "w2",
        Weak3 = "w3",
        PreteritePresent = "pp",
        Strong1 = "s1",
        Strong2 = "s2",
        Strong3 = "s3",
        Strong4 = "s4",
        Strong5 = "s5",
        Strong6 = "s6",
        Strong7 = "s7",
    }
}

coded_enum! {
    /// Old English marks only past vs. present ("n" for "now").
    VerbTense {
        Past = "p",
        Present = "n",
    }
}

coded_enum! {
    VerbPerson {
        First = "1",
        Second = "2",
        Third = "3",
    }
}

coded_enum! {
    VerbMood {
        Indicative = "i",
        Subjunctive = "s",
        Imperative = "imp",
    }
}

coded_enum! {
    VerbAspect {
        Perfect = "p",
        Progressive = "prg",
        Gnomic = "gn",
    }
}

coded_enum! {
    /// Finiteness of the verb form.
    VerbForm {
        Finite = "f",
        Infinitive = "i",
        Participle = "p",
        InflectedInfinitive = "ii",
    }
}

coded_enum! {
    ArticleType {
        Definite = "d",
        Indefinite = "i",
        Possessive = "p",
        Demonstrative = "D",
    }
}

coded_enum! {
    /// Shared by adjectives and adverbs.
    Degree {
        Positive = "p",
        Comparative = "c",
        Superlative = "s",
    }
}

coded_enum! {
    AdjectiveInflection {
        Strong = "s",
        Weak = "w",
    }
}

coded_enum! {
    ConjunctionType {
        Coordinating = "c",
        Subordinating = "s",
    }
}

coded_enum! {
    /// Who set a field: a human annotator or the inference assistant.
    Provenance {
        Human = "h",
        Inferred = "i",
    }
}
