//! Record normalization.
//!
//! Decoded rows arrive with one of two header vocabularies. The normalizer
//! resolves each semantic field through a priority-ordered table of candidate
//! keys and applies defaults, so individual malformed rows degrade instead of
//! aborting an import.

pub mod normalizer;

pub use normalizer::{
    parse_quantity, FieldVocabulary, RecordNormalizer, SemanticField, STANDARD_VOCABULARY,
    UNKNOWN_WORKER,
};
