//! Concurrent enforcement and hot registration stress tests

use authz::{AuthzError, PolicyRegistry, SharedRegistry};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct Account {
    id: usize,
}

struct Document {
    owner: usize,
}

#[test]
fn test_10_concurrent_enforcers_on_frozen_registry() {
    let mut registry = PolicyRegistry::<Account, Document>::new();
    registry
        .add_policy("read", |_: &Account, _: &Document| true)
        .unwrap();
    registry
        .add_policy("write", |account: &Account, doc: &Document| {
            account.id == doc.owner
        })
        .unwrap();

    // Population is over; from here on the registry is only read
    let registry = Arc::new(registry);
    let allowed = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..10)
        .map(|thread_id| {
            let registry = registry.clone();
            let allowed = allowed.clone();
            std::thread::spawn(move || {
                let account = Account { id: thread_id };
                let mut owned: usize = 0;
                for _ in 0..1000 {
                    let owner = rand::random::<usize>() % 10;
                    let doc = Document { owner };
                    if owner == thread_id {
                        owned += 1;
                    }

                    assert!(registry.enforce(&account, "read", &doc).unwrap());
                    if registry.enforce(&account, "write", &doc).unwrap() {
                        allowed.fetch_add(1, Ordering::Relaxed);
                    }
                }
                owned
            })
        })
        .collect();

    let expected: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

    // Exactly the owned documents were writable, across all threads
    assert_eq!(allowed.load(Ordering::Relaxed), expected);
}

#[test]
fn test_hot_registration_while_enforcing() {
    let shared = SharedRegistry::<Account, Document>::new();
    shared
        .add_policy("read", |_: &Account, _: &Document| true)
        .unwrap();

    let writer = {
        let shared = shared.clone();
        std::thread::spawn(move || {
            for i in 0..200 {
                shared
                    .add_policy(format!("action:{}", i), |_: &Account, _: &Document| true)
                    .unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..8)
        .map(|_| {
            let shared = shared.clone();
            std::thread::spawn(move || {
                let account = Account { id: 0 };
                let doc = Document { owner: 1 };
                for _ in 0..1000 {
                    assert!(shared.enforce(&account, "read", &doc).unwrap());

                    // Either not yet registered or registered and allowing
                    let action_name = format!("action:{}", rand::random::<usize>() % 200);
                    match shared.enforce(&account, &action_name, &doc) {
                        Ok(allowed) => assert!(allowed),
                        Err(AuthzError::MissingPolicy(action)) => assert_eq!(action, action_name),
                        Err(e) => panic!("unexpected error: {}", e),
                    }
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for h in readers {
        h.join().unwrap();
    }

    assert_eq!(shared.len(), 201);
}

#[test]
fn test_concurrent_duplicate_registration_has_one_winner() {
    let shared = SharedRegistry::<Account, Document>::new();
    let winners = Arc::new(Mutex::new(Vec::new()));

    let handles: Vec<_> = (0..8)
        .map(|thread_id| {
            let shared = shared.clone();
            let winners = winners.clone();
            std::thread::spawn(move || {
                let result = shared.add_policy("delete", move |account: &Account, _: &Document| {
                    account.id == thread_id
                });
                match result {
                    Ok(()) => winners.lock().push(thread_id),
                    Err(e) => assert!(matches!(e, AuthzError::DuplicatePolicy(_))),
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let winners = winners.lock();
    assert_eq!(winners.len(), 1);

    // The single registered effector is the winner's
    let winner = winners[0];
    let doc = Document { owner: 0 };
    assert!(shared
        .enforce(&Account { id: winner }, "delete", &doc)
        .unwrap());
    assert!(!shared
        .enforce(&Account { id: winner + 1 }, "delete", &doc)
        .unwrap());
}
