//! Deduplication and natural ordering of identity strings such as `NS-12`.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// The part after the first `-` of an identity string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Suffix {
    Numeric(i64),
    Text(String),
    Missing,
}

/// Identity split on its first `-` into a prefix and a suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaturalKey {
    prefix: String,
    suffix: Suffix,
}

impl NaturalKey {
    pub fn parse(identity: &str) -> Self {
        match identity.split_once('-') {
            Some((prefix, rest)) => {
                let suffix = match rest.trim().parse::<i64>() {
                    Ok(number) => Suffix::Numeric(number),
                    Err(_) => Suffix::Text(rest.to_string()),
                };
                Self {
                    prefix: prefix.to_string(),
                    suffix,
                }
            }
            None => Self {
                prefix: identity.to_string(),
                suffix: Suffix::Missing,
            },
        }
    }
}

impl PartialOrd for NaturalKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NaturalKey {
    fn cmp(&self, other: &Self) -> Ordering {
        locale_cmp(&self.prefix, &other.prefix).then_with(|| self.suffix.cmp(&other.suffix))
    }
}

/// Case- and accent-insensitive comparison, with the raw text as tiebreak so
/// the order stays total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    fold(a).cmp(fold(b)).then_with(|| a.cmp(b))
}

/// Canonical decomposition without combining marks, lowercased.
fn fold(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Stable sort by the natural order of each record's identity.
pub fn sort_naturally<T, F>(records: &mut [T], identity: F)
where
    F: Fn(&T) -> &str,
{
    records.sort_by_cached_key(|record| NaturalKey::parse(identity(record)));
}

/// Keeps the first record for each key, preserving relative order.
pub fn dedup_by_key<T, K, F>(records: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(key(record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn natural_cmp(a: &str, b: &str) -> Ordering {
        NaturalKey::parse(a).cmp(&NaturalKey::parse(b))
    }

    fn sorted(mut codes: Vec<&str>) -> Vec<&str> {
        sort_naturally(&mut codes, |code| *code);
        codes
    }

    #[test]
    fn equal_prefixes_sort_by_numeric_suffix() {
        assert_eq!(
            sorted(vec!["NS-10", "NS-2", "NS-1"]),
            vec!["NS-1", "NS-2", "NS-10"]
        );
    }

    #[test]
    fn differing_prefixes_sort_lexicographically() {
        assert_eq!(
            sorted(vec!["SS-1", "NS-5", "ANC-40"]),
            vec!["ANC-40", "NS-5", "SS-1"]
        );
    }

    #[test]
    fn prefix_comparison_ignores_case_and_accents() {
        assert_eq!(
            sorted(vec!["Ômega-1", "alfa-2", "Beta-1"]),
            vec!["alfa-2", "Beta-1", "Ômega-1"]
        );
        assert_eq!(locale_cmp("ação", "Acao"), Ordering::Greater);
        assert_eq!(locale_cmp("Acao", "acao"), Ordering::Less);
    }

    #[test]
    fn accents_compare_the_same_whether_composed_or_decomposed() {
        assert_eq!(locale_cmp("A\u{301}a", "Ab"), Ordering::Less);
        assert_eq!(locale_cmp("\u{c1}a", "Ab"), Ordering::Less);
        assert_eq!(locale_cmp("\u{d1}andu", "Nova"), Ordering::Less);
        assert_eq!(locale_cmp("N\u{303}andu", "Nova"), Ordering::Less);
        assert_eq!(
            sorted(vec!["Nova-1", "\u{d1}andu-1", "Na-1"]),
            vec!["Na-1", "\u{d1}andu-1", "Nova-1"]
        );
    }

    #[test]
    fn non_numeric_and_missing_suffixes_sort_after_numbers() {
        assert_eq!(
            sorted(vec!["NS", "NS-B", "NS-3", "NS-A", "NS-1"]),
            vec!["NS-1", "NS-3", "NS-A", "NS-B", "NS"]
        );
    }

    #[test]
    fn only_the_first_dash_splits() {
        assert_eq!(
            NaturalKey::parse("7-ABC-1"),
            NaturalKey {
                prefix: "7".into(),
                suffix: Suffix::Text("ABC-1".into()),
            }
        );
    }

    #[test]
    fn natural_order_is_total_and_antisymmetric() {
        let codes = ["NS-1", "ns-1", "NS", "NS-x", "NT-0", "", "-3", "Ná-2"];
        for a in codes {
            for b in codes {
                assert_eq!(natural_cmp(a, b), natural_cmp(b, a).reverse(), "{a} vs {b}");
                if natural_cmp(a, b) == Ordering::Equal {
                    assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn sort_is_stable_for_equal_identities() {
        let mut records = vec![("NS-2", 'a'), ("NS-1", 'b'), ("NS-2", 'c')];
        sort_naturally(&mut records, |record| record.0);
        assert_eq!(records, vec![("NS-1", 'b'), ("NS-2", 'a'), ("NS-2", 'c')]);
    }

    #[test]
    fn dedup_keeps_first_occurrence_in_order() {
        let records = vec![("NS-2", 1), ("NS-1", 2), ("NS-2", 3), ("NS-3", 4)];
        let kept = dedup_by_key(records, |record| record.0);
        assert_eq!(kept, vec![("NS-2", 1), ("NS-1", 2), ("NS-3", 4)]);
    }

    #[test]
    fn dedup_is_idempotent() {
        let records = vec!["a", "b", "a", "c", "b"];
        let once = dedup_by_key(records, |record| *record);
        let twice = dedup_by_key(once.clone(), |record| *record);
        assert_eq!(once, twice);
    }
}
