//! Property-based tests for pagination
//!
//! Uses proptest to verify properties that should hold for all inputs.

use habit_tracker::models::{NewTask, Page, Task};
use habit_tracker::storage::Collection;
use proptest::prelude::*;

fn filled(count: usize) -> Collection<Task> {
    let collection = Collection::new();
    let now = chrono::Utc::now();
    for n in 0..count {
        let fields = NewTask {
            title: format!("task {n}"),
            tags: if n % 2 == 0 { vec!["even".to_string()] } else { Vec::new() },
            ..NewTask::default()
        };
        collection.insert(Task::new(uuid::Uuid::new_v4(), fields, now).unwrap()).unwrap();
    }
    collection
}

proptest! {
    /// Walking every page yields every record exactly once, in insertion order
    #[test]
    fn pages_partition_the_collection(count in 0usize..40, size in 1u32..10) {
        let collection = filled(count);
        let mut seen = Vec::new();
        let mut number = 1;
        loop {
            let page = collection.list(|_| true, Page::new(number, size).unwrap());
            prop_assert!(page.len() <= size as usize);
            if page.is_empty() {
                break;
            }
            seen.extend(page.into_iter().map(|t| t.title));
            number += 1;
        }
        let expected: Vec<_> = (0..count).map(|n| format!("task {n}")).collect();
        prop_assert_eq!(seen, expected);
    }

    /// A page holds min(size, remaining) records
    #[test]
    fn page_length_matches_remaining(count in 0usize..40, number in 1u32..8, size in 1u32..10) {
        let collection = filled(count);
        let page = collection.list(|_| true, Page::new(number, size).unwrap());
        let offset = (number as usize - 1) * size as usize;
        prop_assert_eq!(page.len(), count.saturating_sub(offset).min(size as usize));
    }

    /// Filtering happens before paging
    #[test]
    fn filter_then_page(count in 0usize..40, size in 1u32..10) {
        let collection = filled(count);
        let page = collection.list(|t| t.has_tag("even"), Page::new(1, size).unwrap());
        prop_assert!(page.iter().all(|t| t.has_tag("even")));
        prop_assert_eq!(page.len(), count.div_ceil(2).min(size as usize));
    }

    /// Sizes outside 1..=200 are rejected
    #[test]
    fn out_of_range_sizes_rejected(size in 201u32..10_000) {
        prop_assert!(Page::new(1, size).is_err());
    }
}
