#![no_main]

//! Snapshot decoder fuzzer.
//!
//! Feeds arbitrary bytes to the snapshot loader. Any document that restores
//! must describe a consistent game and survive a second save.

use libfuzzer_sys::fuzz_target;
use paddy::game::check_invariants;
use paddy::persist::Snapshot;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(snapshot) = Snapshot::from_json(text) else {
        return;
    };
    let Ok(state) = snapshot.restore() else {
        return;
    };

    assert!(check_invariants(&state).is_empty());
    let again = Snapshot::capture(&state).restore().expect("re-encoded snapshot must restore");
    assert_eq!(again, state);
});
