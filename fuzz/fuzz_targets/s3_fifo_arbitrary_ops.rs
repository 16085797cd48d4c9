#![no_main]

use libfuzzer_sys::fuzz_target;
use s3fifo::policy::s3_fifo::{Location, S3FifoCache};

// Fuzz arbitrary operation sequences on S3FifoCache
//
// Random put/get/has/clear sequences over small queue sizes, checking the
// capacity and table-consistency invariants after every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    // First two bytes pick the queue sizes (1-16 each)
    let main = (data[0] as usize % 16) + 1;
    let small = (data[1] as usize % 16) + 1;
    let mut cache: S3FifoCache<u8, u32> = S3FifoCache::new(main, small);

    let mut idx = 2;
    while idx + 1 < data.len() {
        let op = data[idx] % 5;
        let key = data[idx + 1] % 64;

        match op {
            0 | 1 => {
                cache.put(key, u32::from(key));
            }
            2 => {
                let live = matches!(
                    cache.location(&key),
                    Some(Location::Small) | Some(Location::Main)
                );
                assert_eq!(cache.get(&key).is_some(), live);
            }
            3 => {
                let _ = cache.has(&key);
            }
            4 => {
                if data[idx] == 255 {
                    cache.clear();
                }
            }
            _ => unreachable!(),
        }

        #[cfg(debug_assertions)]
        cache.check_invariants().unwrap();

        assert!(cache.small_len() <= small);
        assert!(cache.main_len() <= main);
        assert!(cache.ghost_len() <= small);
        assert_eq!(
            cache.table_len(),
            cache.small_len() + cache.main_len() + cache.ghost_len()
        );

        idx += 2;
    }
});
