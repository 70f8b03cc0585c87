use rkyv::{Archive, Deserialize, Serialize};

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

bitflags! {
    /// Which annotation fields a delta or audit entry touches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct FieldMask: u32 {
        // Shared nominal fields (Bits 0-4)
        const POS = 1;
        const GENDER = 2;
        const NUMBER = 4;
        const CASE = 8;
        const DECLENSION = 16;

        // Pronoun / determiner (Bits 5-6)
        const PRONOUN_TYPE = 32;
        const ARTICLE_TYPE = 64;

        // Verb (Bits 7-12)
        const VERB_CLASS = 128;
        const VERB_TENSE = 256;
        const VERB_PERSON = 512;
        const VERB_MOOD = 1024;
        const VERB_ASPECT = 2048;
        const VERB_FORM = 4096;

        // Preposition / adjective / adverb / conjunction (Bits 13-17)
        const PREP_CASE = 8192;
        const ADJECTIVE_DEGREE = 16384;
        const ADJECTIVE_INFLECTION = 32768;
        const ADVERB_DEGREE = 65536;
        const CONJUNCTION_TYPE = 131072;

        // Meta (Bits 18-21)
        const UNCERTAIN = 262144;
        const ALTERNATIVES = 524288;
        const CONFIDENCE = 1048576;
        const PROVENANCE = 2097152;
    }
}

// rkyv support for FieldMask
impl Archive for FieldMask {
    type Archived = u32;
    type Resolver = ();

    unsafe fn resolve(&self, _pos: usize, _resolver: Self::Resolver, out: *mut Self::Archived) {
        out.write(self.bits());
    }
}

impl<S: rkyv::ser::Serializer + ?Sized> Serialize<S> for FieldMask {
    fn serialize(&self, _serializer: &mut S) -> Result<Self::Resolver, S::Error> {
        Ok(())
    }
}

impl<D: rkyv::Fallible + ?Sized> Deserialize<FieldMask, D> for u32 {
    fn deserialize(&self, _deserializer: &mut D) -> Result<FieldMask, D::Error> {
        Ok(FieldMask::from_bits_truncate(*self))
    }
}
