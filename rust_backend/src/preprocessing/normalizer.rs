use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::core::domain::{NormalizedOrder, RawRecord, RawValue};
use crate::time::{parse_completion_time, ZoneMode};

/// Worker name used when no candidate field resolves.
pub const UNKNOWN_WORKER: &str = "Unknown";

/// Semantic fields the engine reads from a decoded row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticField {
    WorkerName,
    CompletionTime,
    ItemQuantity,
}

impl SemanticField {
    pub const ALL: [SemanticField; 3] = [
        SemanticField::WorkerName,
        SemanticField::CompletionTime,
        SemanticField::ItemQuantity,
    ];
}

/// Candidate keys per field in priority order: the Chinese export headers
/// first, then their English counterparts.
const STANDARD_FIELDS: &[(SemanticField, &[&str])] = &[
    (SemanticField::WorkerName, &["打包操作人", "Packed by"]),
    (
        SemanticField::CompletionTime,
        &["打包完成时间", "Packing completion time"],
    ),
    (SemanticField::ItemQuantity, &["商品数量", "Qty"]),
];

pub static STANDARD_VOCABULARY: Lazy<FieldVocabulary> = Lazy::new(FieldVocabulary::standard);

/// Priority-ordered candidate keys for every semantic field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldVocabulary {
    candidates: HashMap<SemanticField, Vec<String>>,
}

impl FieldVocabulary {
    /// The two built-in header vocabularies.
    pub fn standard() -> Self {
        let candidates = STANDARD_FIELDS
            .iter()
            .map(|(field, keys)| (*field, keys.iter().map(|k| k.to_string()).collect()))
            .collect();
        Self { candidates }
    }

    /// Appends extra candidate keys after the existing ones.
    ///
    /// Keys already present keep their original priority.
    pub fn extend<I, S>(&mut self, field: SemanticField, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = self.candidates.entry(field).or_default();
        for key in keys {
            let key: String = key.into();
            let key = key.trim();
            if !key.is_empty() && !list.iter().any(|k| k == key) {
                list.push(key.to_string());
            }
        }
    }

    pub fn candidates(&self, field: SemanticField) -> &[String] {
        self.candidates
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the first candidate value accepted by `accept`.
    ///
    /// A candidate that is present but rejected falls through to the next key.
    pub fn resolve<T, F>(
        &self,
        field: SemanticField,
        record: &RawRecord,
        mut accept: F,
    ) -> Option<T>
    where
        F: FnMut(&RawValue) -> Option<T>,
    {
        self.candidates(field)
            .iter()
            .filter_map(|key| record.get(key))
            .find_map(|value| accept(value))
    }
}

impl Default for FieldVocabulary {
    fn default() -> Self {
        STANDARD_VOCABULARY.clone()
    }
}

/// Leading-integer quantity parsing.
///
/// `"3.7"` reads as 3 and `"12pcs"` as 12; negative values clamp to zero and
/// anything without leading digits is `None`.
pub fn parse_quantity(value: &RawValue) -> Option<u64> {
    match value {
        RawValue::Number(n) if n.is_finite() => Some(if *n <= 0.0 { 0 } else { n.trunc() as u64 }),
        RawValue::Number(_) => None,
        RawValue::Text(text) => {
            let text = text.trim();
            let (negative, digits) = match text.as_bytes().first() {
                Some(b'-') => (true, &text[1..]),
                Some(b'+') => (false, &text[1..]),
                _ => (false, text),
            };
            let end = digits
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(digits.len());
            if end == 0 {
                return None;
            }
            if negative {
                return Some(0);
            }
            // Saturate absurdly long digit runs rather than reject them.
            Some(digits[..end].parse::<u64>().unwrap_or(u64::MAX))
        }
    }
}

/// Maps raw rows onto [`NormalizedOrder`]s.
#[derive(Debug, Clone, Default)]
pub struct RecordNormalizer {
    vocabulary: FieldVocabulary,
    zone: ZoneMode,
}

impl RecordNormalizer {
    pub fn new(vocabulary: FieldVocabulary, zone: ZoneMode) -> Self {
        Self { vocabulary, zone }
    }

    pub fn vocabulary(&self) -> &FieldVocabulary {
        &self.vocabulary
    }

    pub fn zone(&self) -> ZoneMode {
        self.zone
    }

    pub fn normalize(&self, raw: &RawRecord) -> NormalizedOrder {
        NormalizedOrder {
            completion_time: self.vocabulary.resolve(SemanticField::CompletionTime, raw, |v| {
                parse_completion_time(v, self.zone)
            }),
            worker_name: self.worker_name(raw),
            item_quantity: self.item_quantity(raw),
        }
    }

    pub fn worker_name(&self, raw: &RawRecord) -> String {
        self.vocabulary
            .resolve(SemanticField::WorkerName, raw, |v| {
                (!v.is_blank()).then(|| v.to_text())
            })
            .unwrap_or_else(|| UNKNOWN_WORKER.to_string())
    }

    /// Zero quantities fall through to the next candidate like blanks do.
    pub fn item_quantity(&self, raw: &RawRecord) -> u64 {
        self.vocabulary
            .resolve(SemanticField::ItemQuantity, raw, |v| {
                parse_quantity(v).filter(|q| *q > 0)
            })
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::hour_bucket;

    #[test]
    fn primary_vocabulary_wins_when_both_present() {
        let raw = RawRecord::new()
            .with("打包操作人", "张三")
            .with("Packed by", "Alice")
            .with("商品数量", 4i64)
            .with("Qty", 9i64);
        let order = RecordNormalizer::default().normalize(&raw);
        assert_eq!(order.worker_name, "张三");
        assert_eq!(order.item_quantity, 4);
    }

    #[test]
    fn alternate_vocabulary_used_when_primary_absent_or_blank() {
        let raw = RawRecord::new()
            .with("打包操作人", "  ")
            .with("Packed by", "Alice")
            .with("Packing completion time", "2024-01-01T09:15")
            .with("Qty", "3");
        let order = RecordNormalizer::default().normalize(&raw);
        assert_eq!(order.worker_name, "Alice");
        assert_eq!(order.item_quantity, 3);
        let time = order.completion_time.expect("time should resolve");
        assert_eq!(hour_bucket(&time).as_str(), "2024-01-01 09:00");
    }

    #[test]
    fn defaults_apply_when_nothing_resolves() {
        let order = RecordNormalizer::default().normalize(&RawRecord::new());
        assert_eq!(order.worker_name, UNKNOWN_WORKER);
        assert_eq!(order.item_quantity, 0);
        assert!(order.completion_time.is_none());
    }

    #[test]
    fn unparseable_primary_time_falls_through() {
        let raw = RawRecord::new()
            .with("打包完成时间", "n/a")
            .with("Packing completion time", "2024-01-01 10:05:00");
        let order = RecordNormalizer::default().normalize(&raw);
        assert_eq!(
            hour_bucket(&order.completion_time.unwrap()).as_str(),
            "2024-01-01 10:00"
        );
    }

    #[test]
    fn quantity_parsing_uses_leading_integer() {
        assert_eq!(parse_quantity(&RawValue::from("3.7")), Some(3));
        assert_eq!(parse_quantity(&RawValue::from(" 12pcs")), Some(12));
        assert_eq!(parse_quantity(&RawValue::from("-2")), Some(0));
        assert_eq!(parse_quantity(&RawValue::from("abc")), None);
        assert_eq!(parse_quantity(&RawValue::from("")), None);
        assert_eq!(parse_quantity(&RawValue::Number(5.9)), Some(5));
        assert_eq!(parse_quantity(&RawValue::Number(-1.0)), Some(0));
    }

    #[test]
    fn zero_primary_quantity_falls_through() {
        let raw = RawRecord::new().with("商品数量", 0i64).with("Qty", 2i64);
        assert_eq!(RecordNormalizer::default().item_quantity(&raw), 2);
    }

    #[test]
    fn numeric_worker_ids_render_as_integers() {
        let raw = RawRecord::new().with("Packed by", 1024i64);
        assert_eq!(RecordNormalizer::default().worker_name(&raw), "1024");
    }

    #[test]
    fn extra_candidates_append_after_defaults() {
        let mut vocabulary = FieldVocabulary::standard();
        vocabulary.extend(SemanticField::WorkerName, ["Operator", "Packed by", " "]);
        assert_eq!(
            vocabulary.candidates(SemanticField::WorkerName),
            &["打包操作人", "Packed by", "Operator"]
        );

        let normalizer = RecordNormalizer::new(vocabulary, ZoneMode::Utc);
        let raw = RawRecord::new().with("Operator", "Bob");
        assert_eq!(normalizer.worker_name(&raw), "Bob");
    }
}
