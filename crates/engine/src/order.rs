//! Provenance-aware total ordering and serial numbers.
//!
//! Imported entries represent a pre-existing authoritative row order and
//! must keep their exact position; manual entries file in after the
//! imported block in arrival order. The serial number (`sno`) is derived
//! here on every read and is never persisted.

use crate::entries::Entry;

/// An entry paired with its derived serial number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberedEntry {
    pub sno: u64,
    pub entry: Entry,
}

/// Assigns the single total order and serial numbers over the full
/// record set.
///
/// Imported entries sort ascending by `order_index` (ties broken by
/// `id`), manual entries ascending by `created_at` (ties broken by
/// `id`), and the two sorted sequences are merged with the rule
/// "imported fully precedes manual".
pub fn total_order(entries: Vec<Entry>) -> Vec<NumberedEntry> {
    let (mut imported, mut manual): (Vec<Entry>, Vec<Entry>) = entries
        .into_iter()
        .partition(|entry| entry.order_index.is_some());
    imported.sort_by(|a, b| {
        a.order_index
            .cmp(&b.order_index)
            .then_with(|| a.id.cmp(&b.id))
    });
    manual.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    merge_provenances(imported, manual)
}

/// Highest `order_index` among the given entries, or -1 when none carries
/// one. The next import continues at this value plus one.
pub fn max_order_index(entries: &[Entry]) -> i64 {
    entries
        .iter()
        .filter_map(|entry| entry.order_index)
        .max()
        .unwrap_or(-1)
}

/// Stable merge of the two already-sorted provenances.
///
/// Imported serials are `order_index + 1`; manual serials continue
/// consecutively after the highest imported serial (starting at 1 when
/// there are no imported entries).
fn merge_provenances(imported: Vec<Entry>, manual: Vec<Entry>) -> Vec<NumberedEntry> {
    let max_index = imported
        .iter()
        .filter_map(|entry| entry.order_index)
        .max()
        .unwrap_or(-1);

    let mut out = Vec::with_capacity(imported.len() + manual.len());
    for entry in imported {
        let sno = entry.order_index.map_or(0, |index| index + 1) as u64;
        out.push(NumberedEntry { sno, entry });
    }
    let mut sno = (max_index + 2) as u64;
    for entry in manual {
        out.push(NumberedEntry { sno, entry });
        sno += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::MoneyCents;

    fn entry(name: &str, order_index: Option<i64>, created_secs: i64) -> Entry {
        Entry {
            id: Uuid::new_v4(),
            name: name.to_string(),
            place: String::new(),
            amount_received: MoneyCents::ZERO,
            amount_receivable: MoneyCents::ZERO,
            created_at: Utc.timestamp_opt(created_secs, 0).single().unwrap(),
            order_index,
        }
    }

    #[test]
    fn imported_precede_manual_with_dense_serials() {
        let entries = vec![
            entry("a2", Some(2), 50),
            entry("b2", None, 20),
            entry("a0", Some(0), 90),
            entry("b1", None, 10),
            entry("a1", Some(1), 70),
        ];

        let ordered = total_order(entries);
        let names: Vec<&str> = ordered.iter().map(|n| n.entry.name.as_str()).collect();
        let snos: Vec<u64> = ordered.iter().map(|n| n.sno).collect();
        assert_eq!(names, ["a0", "a1", "a2", "b1", "b2"]);
        assert_eq!(snos, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn manual_only_starts_at_one() {
        let entries = vec![entry("late", None, 200), entry("early", None, 100)];

        let ordered = total_order(entries);
        let names: Vec<&str> = ordered.iter().map(|n| n.entry.name.as_str()).collect();
        let snos: Vec<u64> = ordered.iter().map(|n| n.sno).collect();
        assert_eq!(names, ["early", "late"]);
        assert_eq!(snos, [1, 2]);
    }

    #[test]
    fn manual_serials_continue_after_sparse_import_indices() {
        // Imports that ever skipped indices still number manual entries
        // from the highest import serial.
        let entries = vec![entry("a", Some(7), 10), entry("b", None, 20)];

        let ordered = total_order(entries);
        assert_eq!(ordered[0].sno, 8);
        assert_eq!(ordered[1].sno, 9);
    }

    #[test]
    fn duplicate_order_index_is_deterministic() {
        let mut first = entry("x", Some(3), 10);
        let mut second = entry("y", Some(3), 10);
        if second.id < first.id {
            std::mem::swap(&mut first, &mut second);
        }

        let ordered = total_order(vec![second.clone(), first.clone()]);
        assert_eq!(ordered[0].entry.id, first.id);
        assert_eq!(ordered[1].entry.id, second.id);
    }

    #[test]
    fn max_order_index_defaults_to_minus_one() {
        assert_eq!(max_order_index(&[]), -1);
        assert_eq!(max_order_index(&[entry("m", None, 1)]), -1);
        assert_eq!(
            max_order_index(&[entry("m", None, 1), entry("i", Some(4), 1)]),
            4
        );
    }
}
