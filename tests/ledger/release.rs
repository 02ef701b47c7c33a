use crate::support::{bandwidth, consumer, ledger, summary};

fn entries(items: &[(&str, f64)]) -> Vec<(String, f64)> {
    items
        .iter()
        .map(|(consumer_id, value)| (consumer_id.to_string(), *value))
        .collect()
}

#[test]
fn given_single_match_when_release_then_entry_is_dropped() {
    let before = ledger(100.0, &[("c1", 30.0), ("c2", 50.0)]);
    let after = before.release(&bandwidth(30.0), &consumer("c1"));

    assert_eq!(summary(&after), entries(&[("c2", 50.0)]));
    assert_eq!(summary(&before), entries(&[("c1", 30.0), ("c2", 50.0)]));
}

#[test]
fn given_duplicate_matches_when_release_then_exactly_one_is_dropped() {
    let before = ledger(100.0, &[("c1", 10.0), ("c2", 50.0), ("c1", 10.0)]);
    let after = before.release(&bandwidth(10.0), &consumer("c1"));

    assert_eq!(summary(&after), entries(&[("c2", 50.0), ("c1", 10.0)]));
}

#[test]
fn given_three_duplicates_when_released_repeatedly_then_one_disappears_each_time() {
    let mut current = ledger(100.0, &[("c1", 10.0), ("c1", 10.0), ("c1", 10.0)]);
    for remaining in [2, 1, 0] {
        current = current.release(&bandwidth(10.0), &consumer("c1"));
        assert_eq!(current.allocations().len(), remaining);
    }

    let unchanged = current.release(&bandwidth(10.0), &consumer("c1"));
    assert_eq!(unchanged, current);
}

#[test]
fn given_amount_mismatch_when_release_then_ledger_is_unchanged() {
    let before = ledger(100.0, &[("c1", 30.0)]);
    let after = before.release(&bandwidth(40.0), &consumer("c1"));

    assert_eq!(after, before);
}

#[test]
fn given_consumer_mismatch_when_release_then_ledger_is_unchanged() {
    let before = ledger(100.0, &[("c1", 30.0)]);
    let after = before.release(&bandwidth(30.0), &consumer("c2"));

    assert_eq!(after, before);
}

#[test]
fn given_interleaved_entries_when_release_then_non_matching_order_is_stable() {
    let before = ledger(
        100.0,
        &[
            ("c3", 1.0),
            ("c1", 5.0),
            ("c2", 2.0),
            ("c1", 5.0),
            ("c4", 3.0),
            ("c1", 5.0),
        ],
    );
    let after = before.release(&bandwidth(5.0), &consumer("c1"));

    assert_eq!(
        summary(&after),
        entries(&[
            ("c3", 1.0),
            ("c2", 2.0),
            ("c4", 3.0),
            ("c1", 5.0),
            ("c1", 5.0),
        ])
    );
}

#[test]
fn given_nearly_equal_amount_when_release_then_exact_equality_is_required() {
    let reserved = 0.1 + 0.2;
    let before = ledger(100.0, &[("c1", reserved)]);

    let untouched = before.release(&bandwidth(0.3), &consumer("c1"));
    assert_eq!(untouched.allocations().len(), 1);

    let released = before.release(&bandwidth(reserved), &consumer("c1"));
    assert!(released.allocations().is_empty());
}

#[test]
fn given_release_when_repeated_with_same_inputs_then_results_are_equal() {
    let before = ledger(100.0, &[("c1", 10.0), ("c2", 50.0), ("c1", 10.0)]);
    let first = before.release(&bandwidth(10.0), &consumer("c1"));
    let second = before.release(&bandwidth(10.0), &consumer("c1"));

    assert_eq!(first, second);
    assert_eq!(first.original(), before.original());
}
