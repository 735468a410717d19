//! Concurrency guarantees of the in-memory user store.

use std::collections::HashSet;
use std::sync::Barrier;
use std::thread;

use rstest::{fixture, rstest};

use user_registry::domain::ports::{UserStore, UserStoreError};
use user_registry::domain::{UserDraft, UserId};
use user_registry::outbound::memory::InMemoryUserStore;

const WRITERS: usize = 8;
const PER_WRITER: usize = 50;
const RACE_ROUNDS: usize = 200;

#[fixture]
fn store() -> InMemoryUserStore {
    InMemoryUserStore::with_sample_users()
}

fn draft(writer: usize, n: usize) -> UserDraft {
    UserDraft::new(format!("user-{writer}-{n}"), format!("{writer}.{n}@x.com"))
}

#[rstest]
fn concurrent_creates_assign_distinct_increasing_ids(store: InMemoryUserStore) {
    let before = store
        .list()
        .expect("list succeeds")
        .iter()
        .map(|u| u.id().get())
        .max()
        .unwrap_or(0);

    let ids: Vec<u64> = thread::scope(|scope| {
        let handles: Vec<_> = (0..WRITERS)
            .map(|writer| {
                let store = &store;
                scope.spawn(move || {
                    (0..PER_WRITER)
                        .map(|n| store.create(draft(writer, n)).expect("create").id().get())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().expect("writer thread"))
            .collect()
    });

    let distinct: HashSet<u64> = ids.iter().copied().collect();
    assert_eq!(distinct.len(), WRITERS * PER_WRITER);
    assert!(ids.iter().all(|id| *id > before));
}

#[rstest]
fn delete_then_get_is_not_found(store: InMemoryUserStore) {
    let id = UserId::new(1);

    assert!(store.delete(id).expect("delete succeeds"));
    assert_eq!(store.get(id), Err(UserStoreError::not_found(id)));
    assert!(!store.delete(id).expect("second delete succeeds"));
}

#[rstest]
fn update_keeps_id_and_unknown_ids_leave_store_untouched(store: InMemoryUserStore) {
    let snapshot = store.list().expect("list succeeds");

    let missing = store.update(UserId::new(99), UserDraft::new("Ghost", "g@x.com"));
    assert_eq!(missing, Err(UserStoreError::not_found(UserId::new(99))));
    assert_eq!(store.list().expect("list succeeds"), snapshot);

    let updated = store
        .update(UserId::new(2), UserDraft::new("Jane S.", "js@x.com"))
        .expect("update succeeds");
    assert_eq!(updated.id(), UserId::new(2));
    assert_eq!(updated.name(), "Jane S.");
}

#[rstest]
fn listing_during_creates_never_sees_partial_users(store: InMemoryUserStore) {
    thread::scope(|scope| {
        let writer = scope.spawn(|| {
            for n in 0..PER_WRITER * WRITERS {
                store.create(draft(0, n)).expect("create");
            }
        });
        let reader = scope.spawn(|| {
            for _ in 0..200 {
                for user in store.list().expect("list succeeds") {
                    assert!(user.id().get() > 0);
                    assert!(!user.name().is_empty());
                    assert!(!user.email().is_empty());
                }
            }
        });
        writer.join().expect("writer thread");
        reader.join().expect("reader thread");
    });

    assert_eq!(store.list().expect("list succeeds").len(), 2 + PER_WRITER * WRITERS);
}

#[rstest]
fn update_racing_delete_never_resurrects_the_user() {
    for _ in 0..RACE_ROUNDS {
        let store = InMemoryUserStore::with_sample_users();
        let id = UserId::new(1);
        let start = Barrier::new(2);

        let (updated, removed) = thread::scope(|scope| {
            let updater = scope.spawn(|| {
                start.wait();
                store.update(id, UserDraft::new("Johnny", "johnny@example.com"))
            });
            let deleter = scope.spawn(|| {
                start.wait();
                store.delete(id)
            });
            (
                updater.join().expect("updater thread"),
                deleter.join().expect("deleter thread"),
            )
        });

        assert!(removed.expect("delete succeeds"));
        match updated {
            Ok(user) => assert_eq!(user.id(), id),
            Err(err) => assert_eq!(err, UserStoreError::not_found(id)),
        }
        assert_eq!(store.get(id), Err(UserStoreError::not_found(id)));
        assert!(
            store
                .list()
                .expect("list succeeds")
                .iter()
                .all(|user| user.id() != id)
        );
    }
}

#[rstest]
fn racing_updates_never_mix_fields() {
    let id = UserId::new(2);
    let first = UserDraft::new("Ann", "ann@x.com");
    let second = UserDraft::new("Bob", "bob@x.com");

    for _ in 0..RACE_ROUNDS {
        let store = InMemoryUserStore::with_sample_users();
        let start = Barrier::new(2);

        thread::scope(|scope| {
            for draft in [&first, &second] {
                let store = &store;
                let start = &start;
                scope.spawn(move || {
                    start.wait();
                    let user = store.update(id, draft.clone()).expect("update succeeds");
                    assert_eq!(user.id(), id);
                });
            }
        });

        let stored = store.get(id).expect("user still present");
        let fields = (stored.name(), stored.email());
        assert!(
            fields == (first.name.as_str(), first.email.as_str())
                || fields == (second.name.as_str(), second.email.as_str()),
            "mixed fields: {fields:?}"
        );
    }
}
