//! Fuzz target for canonical serialization and id verification
//!
//! Builds events from arbitrary strings (control characters, separators,
//! quotes, invalid-looking ids) and checks that serialization is
//! deterministic and that a filled-in id always verifies.
//!
//! The fuzzer should NEVER panic.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nostrum_proto::{Event, Tag, Timestamp, serialize, verify_id};

#[derive(Debug, Arbitrary)]
struct FuzzEvent {
    id: String,
    pubkey: String,
    created_at: i64,
    kind: i64,
    tags: Vec<Vec<String>>,
    content: String,
}

fuzz_target!(|input: FuzzEvent| {
    let mut event = Event::new(
        input.pubkey,
        Timestamp::from_secs(input.created_at),
        input.kind,
        input.tags.into_iter().map(Tag::from).collect(),
        input.content,
    );
    event.id = input.id;

    assert_eq!(serialize(&event), serialize(&event));
    let _ = verify_id(&event);

    event.fill_id();
    assert!(verify_id(&event));
});
