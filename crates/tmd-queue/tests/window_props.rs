//! Property tests for the ring window: for any capacity and append count,
//! the queue retains exactly the most recent samples in append order.

use proptest::prelude::*;
use tmd_queue::{TimeMarkedData, TmdQueue};

proptest! {
    #[test]
    fn window_is_suffix_of_appends(capacity in 1usize..64, appends in 0usize..200) {
        let queue = TmdQueue::new(capacity).unwrap();
        let script: Vec<TimeMarkedData> = (0..appends)
            .map(|i| TimeMarkedData::new(i as u64, (i as i32) * 7 - 3))
            .collect();
        for sample in &script {
            queue.append(*sample).unwrap();
        }

        let expected_len = appends.min(capacity);
        prop_assert_eq!(queue.len().unwrap(), expected_len);

        let window = queue.read_all().unwrap();
        prop_assert_eq!(&window[..], &script[appends - expected_len..]);

        match script.last() {
            Some(last) => prop_assert_eq!(queue.read_latest().unwrap(), Some(*last)),
            None => prop_assert_eq!(queue.read_latest().unwrap(), None),
        }
    }

    #[test]
    fn capacity_is_fixed_and_reported(capacity in 1usize..128) {
        let queue = TmdQueue::new(capacity).unwrap();
        prop_assert_eq!(queue.capacity(), capacity);
        for i in 0..capacity * 2 {
            queue.append(TimeMarkedData::new(i as u64, 0)).unwrap();
        }
        prop_assert_eq!(queue.capacity(), capacity);
        prop_assert_eq!(queue.len().unwrap(), capacity);
    }
}
