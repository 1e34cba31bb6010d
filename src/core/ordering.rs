//! Name ordering for result lists.
//!
//! A collation in the spirit of the Unicode Collation Algorithm, without ICU
//! tables. Levels, first difference wins:
//! 1. base letters: canonical decomposition, accents dropped, case folded;
//! 2. accents: unaccented sorts before accented;
//! 3. case: lowercase before uppercase;
//! 4. code point, so distinct names never compare equal.

use super::FileHandle;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn accented_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.nfd().zip(b.nfd()) {
        if ca == cb {
            continue;
        }
        return match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        };
    }
    Ordering::Equal
}

pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented_letters(a).cmp(accented_letters(b)))
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

/// Stable sort by name. Equal names keep their encounter order.
pub fn sort_by_name(files: &mut [FileHandle]) {
    files.sort_by(|a, b| locale_compare(&a.name, &b.name));
}
