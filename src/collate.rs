//! Title collation.
//!
//! Project titles are ordered with the Unicode Collation Algorithm using the
//! CLDR root locale, not by raw code points. Accented letters sort with their
//! base letter (`"Apple" < "Éclair" < "Orange"`), case is secondary to the
//! letters themselves (`"alpha" < "Beta"`), and when two titles differ only in
//! case the lowercase form comes first (`"alpha" < "Alpha"`).
//!
//! Titles that collate equal compare `Equal`; callers supply their own
//! tie-break.

use icu_collator::{Collator, CollatorError, CollatorOptions};
use std::cmp::Ordering;

/// Root-locale collator for project titles.
pub struct TitleCollator {
    collator: Collator,
}

impl TitleCollator {
    /// Build a collator from the compiled-in CLDR root data.
    pub fn new() -> Result<Self, CollatorError> {
        let collator = Collator::try_new(&Default::default(), CollatorOptions::new())?;
        Ok(Self { collator })
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(titles: &[&'static str]) -> Vec<&'static str> {
        let collator = TitleCollator::new().unwrap();
        let mut titles = titles.to_vec();
        titles.sort_by(|a, b| collator.compare(a, b));
        titles
    }

    #[test]
    fn case_does_not_dominate_order() {
        assert_eq!(
            sorted(&["Zeta", "alpha", "Beta", "gamma"]),
            vec!["alpha", "Beta", "gamma", "Zeta"]
        );
    }

    #[test]
    fn accented_titles_sort_with_base_letter() {
        assert_eq!(
            sorted(&["Zebra", "Éclair", "Apple", "Ölfeld", "Orange"]),
            vec!["Apple", "Éclair", "Ölfeld", "Orange", "Zebra"]
        );
    }

    #[test]
    fn accent_is_secondary_to_letters() {
        let collator = TitleCollator::new().unwrap();
        assert_eq!(collator.compare("Éclair", "Eden"), Ordering::Less);
        assert_eq!(collator.compare("resume", "résumé"), Ordering::Less);
        assert_eq!(collator.compare("Über", "Uhr"), Ordering::Less);
    }

    #[test]
    fn lowercase_precedes_uppercase_on_tie() {
        let collator = TitleCollator::new().unwrap();
        assert_eq!(collator.compare("alpha", "Alpha"), Ordering::Less);
        assert_eq!(collator.compare("Alpha", "alpha"), Ordering::Greater);
        assert_eq!(collator.compare("éclair", "Éclair"), Ordering::Less);
    }

    #[test]
    fn identical_titles_are_equal() {
        let collator = TitleCollator::new().unwrap();
        assert_eq!(collator.compare("Same", "Same"), Ordering::Equal);
    }

    #[test]
    fn prefix_sorts_first() {
        let collator = TitleCollator::new().unwrap();
        assert_eq!(collator.compare("Alpha", "Alpha Project"), Ordering::Less);
    }
}
