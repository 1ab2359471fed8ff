// src/common/collation.rs
//
// Name ordering used by every product list and by the suggestion list.

use std::cmp::Ordering;

/// Compares names alphabetically first, ignoring case. Names that differ only
/// in case put the lowercase form first at the first differing letter.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| {
        for (x, y) in a.chars().zip(b.chars()) {
            if x == y {
                continue;
            }
            return match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => x.cmp(&y),
            };
        }
        a.len().cmp(&b.len())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&'static str]) -> Vec<&'static str> {
        let mut names = names.to_vec();
        names.sort_by(|a, b| compare_names(a, b));
        names
    }

    #[test]
    fn letters_decide_before_case() {
        assert_eq!(sorted(&["Gula", "beras"]), vec!["beras", "Gula"]);
        assert_eq!(
            sorted(&["teh", "Apel", "kopi", "Beras", "apel manis"]),
            vec!["Apel", "apel manis", "Beras", "kopi", "teh"]
        );
    }

    #[test]
    fn lowercase_precedes_uppercase_on_a_tie() {
        assert_eq!(sorted(&["Susu", "susu", "SUSU"]), vec!["susu", "Susu", "SUSU"]);
        assert_eq!(compare_names("Kopi", "Kopi"), Ordering::Equal);
    }

    #[test]
    fn shorter_prefix_sorts_first() {
        assert_eq!(compare_names("Roti", "Roti Tawar"), Ordering::Less);
    }
}
