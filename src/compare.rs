use std::cmp::Ordering;
use std::sync::LazyLock;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use rayon::prelude::*;
use tracing::{error, trace};

use crate::table::Row;

/// Sort key of a single cell.
///
/// `numeric` is only set for non empty text that reads as a number. Two cells compare
/// numerically when both carry a number, every other pair falls back to text comparison.
#[derive(Debug, Clone)]
pub struct CellKey<'a> {
    text: &'a str,
    numeric: Option<f64>,
}

impl<'a> CellKey<'a> {
    pub fn new(text: &'a str) -> Self {
        let numeric = if text.is_empty() {
            None
        } else {
            parse_numeric(text)
        };
        Self { text, numeric }
    }

    pub fn compare(&self, other: &CellKey) -> Ordering {
        match (self.numeric, other.numeric) {
            (Some(a), Some(b)) => compare_difference(a - b),
            _ => locale_cmp(self.text, other.text),
        }
    }
}

/// Compares two cell texts the way a sortable column does in ascending order.
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    CellKey::new(a).compare(&CellKey::new(b))
}

// NaN differences (inf - inf) count as equal.
fn compare_difference(diff: f64) -> Ordering {
    if diff < 0.0 {
        Ordering::Less
    } else if diff > 0.0 {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Reads cell text as a number.
///
/// Surrounding whitespace is ignored and whitespace only text reads as 0. Accepts
/// decimal literals with optional sign, fraction and exponent, `Infinity` with optional
/// sign, and unsigned `0x`, `0o`, `0b` integers. `NaN` and anything else is not a number.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let s = text.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        return if digits.is_empty() { None } else { parse_radix(digits, radix) };
    }
    // f64::from_str also takes "inf" and "nan", which are words here.
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    s.parse::<f64>().ok()
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    digits.chars().try_fold(0.0f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
    })
}

// Root locale, tertiary strength, punctuation not ignored.
static ROOT_COLLATOR: LazyLock<Option<CollatorBorrowed<'static>>> = LazyLock::new(|| {
    Collator::try_new(Default::default(), CollatorOptions::default())
        .inspect_err(|e| error!("Root collator unavailable, comparing by code point: {e}"))
        .ok()
});

/// Locale aware text comparison with the root collation order.
///
/// Accented letters sort next to their base letter, lower case before upper case when
/// texts are otherwise equal.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    match ROOT_COLLATOR.as_ref() {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    }
}

/// Sorts rows in place by one column.
///
/// Descending order hands the operands to the ascending comparison in reversed order.
/// The sort is stable, rows comparing equal keep their current relative order in both
/// directions.
pub fn sort_rows(rows: &mut Vec<Row>, column: usize, ascending: bool) {
    let keys: Vec<CellKey> = rows.par_iter().map(|r| CellKey::new(r.cell(column))).collect();
    let numeric = keys.iter().filter(|k| k.numeric.is_some()).count();
    trace!(
        "Sorting {} rows on column {} ({} numeric cells), ascending: {}",
        rows.len(),
        column,
        numeric,
        ascending
    );

    let order = stable_order(keys.len(), |a, b| {
        if ascending {
            keys[a].compare(&keys[b])
        } else {
            keys[b].compare(&keys[a])
        }
    });
    drop(keys);
    permute(rows, order);
}

/// Restores the positional order rows had at attach time.
pub fn restore_original_order(rows: &mut Vec<Row>) {
    let order = stable_order(rows.len(), |a, b| rows[a].index().cmp(&rows[b].index()));
    permute(rows, order);
}

// Mixed numeric and text columns are not a total order ("2" < "10" < "1a" < "2"),
// std's sort may panic on such comparators. Plain merge sort never does.
fn stable_order(len: usize, mut compare: impl FnMut(usize, usize) -> Ordering) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    let mut scratch = order.clone();
    merge_sort(&mut order, &mut scratch, &mut compare);
    order
}

fn merge_sort<F>(v: &mut [usize], buf: &mut [usize], compare: &mut F)
where
    F: FnMut(usize, usize) -> Ordering,
{
    let n = v.len();
    if n <= 1 {
        return;
    }
    let mid = n / 2;
    {
        let (left, right) = v.split_at_mut(mid);
        let (buf_left, buf_right) = buf.split_at_mut(mid);
        merge_sort(left, buf_left, compare);
        merge_sort(right, buf_right, compare);
    }
    buf[..n].copy_from_slice(v);
    let (mut i, mut j) = (0, mid);
    for slot in v.iter_mut() {
        let take_right = j < n && (i >= mid || compare(buf[j], buf[i]) == Ordering::Less);
        if take_right {
            *slot = buf[j];
            j += 1;
        } else {
            *slot = buf[i];
            i += 1;
        }
    }
}

fn permute(rows: &mut Vec<Row>, order: Vec<usize>) {
    let mut slots: Vec<Option<Row>> = rows.drain(..).map(Some).collect();
    rows.extend(order.into_iter().filter_map(|i| slots[i].take()));
}
