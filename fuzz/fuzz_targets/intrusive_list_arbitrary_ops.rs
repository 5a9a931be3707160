#![no_main]

use evictkit::ds::IntrusiveList;
use libfuzzer_sys::fuzz_target;

// Arbitrary sequences of push_front, pop_front, pop_back, move_to_front,
// remove and clear, validating links after every step.
fuzz_target!(|data: &[u8]| {
    let mut list: IntrusiveList<u32> = IntrusiveList::new();
    let mut ids = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 6;
        let arg = pair[1];

        match op {
            0 => {
                let id = list.push_front(u32::from(arg));
                ids.push(id);
                assert_eq!(list.front_id(), Some(id));
                assert_eq!(list.get(id), Some(&u32::from(arg)));
            },
            1 => {
                let old_len = list.len();
                match list.pop_front() {
                    Some(_) => assert_eq!(list.len(), old_len - 1),
                    None => assert_eq!(old_len, 0),
                }
            },
            2 => {
                let old_len = list.len();
                match list.pop_back() {
                    Some(_) => assert_eq!(list.len(), old_len - 1),
                    None => assert_eq!(old_len, 0),
                }
            },
            3 => {
                if let Some(&id) = ids.get(arg as usize % ids.len().max(1)) {
                    let moved = list.move_to_front(id);
                    assert_eq!(moved, list.contains(id));
                    if moved {
                        assert_eq!(list.front_id(), Some(id));
                    }
                }
            },
            4 => {
                if let Some(&id) = ids.get(arg as usize % ids.len().max(1)) {
                    let was_present = list.contains(id);
                    assert_eq!(list.remove(id).is_some(), was_present);
                    assert!(!list.contains(id));
                }
            },
            5 => {
                list.clear();
                ids.clear();
                assert!(list.is_empty());
            },
            _ => unreachable!(),
        }

        assert_eq!(list.iter().count(), list.len());
        list.debug_validate_invariants();
    }
});
