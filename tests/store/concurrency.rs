use std::{sync::Arc, thread};

use resource_ledger::{
    config::StoreConfig,
    resource::{ContinuousResource, ResourceConsumerId, ResourceId},
    store::ContinuousResourceStore,
};

const THREADS: usize = 8;
const REQUESTS_PER_THREAD: usize = 10;
const CAPACITY: f64 = 50.0;

fn link(value: f64) -> ContinuousResource {
    ContinuousResource::new(ResourceId::new("link:a"), value)
}

// Every failed compare-and-set means another writer committed, and at most
// a few hundred commits happen across both scenarios, so this bound cannot be hit.
fn contended_store() -> Arc<ContinuousResourceStore> {
    let store = ContinuousResourceStore::in_memory(StoreConfig {
        max_commit_retries: 1_000,
    });
    store.register(link(CAPACITY)).expect("register");
    Arc::new(store)
}

#[test]
fn given_concurrent_allocators_when_capacity_is_contended_then_capacity_is_never_exceeded() {
    let store = contended_store();

    let granted: usize = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|index| {
                let store = Arc::clone(&store);
                scope.spawn(move || {
                    let consumer = ResourceConsumerId::new(format!("c{index}"));
                    (0..REQUESTS_PER_THREAD)
                        .filter(|_| store.allocate(&consumer, &link(1.0)).expect("allocate"))
                        .count()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("allocator thread panicked"))
            .sum()
    });

    let ledger = store
        .lookup(&ResourceId::new("link:a"))
        .expect("lookup")
        .expect("ledger exists");
    assert_eq!(granted, CAPACITY as usize);
    assert_eq!(ledger.allocations().len(), granted);
    assert!(ledger.allocated_value() <= ledger.original().value());
}

#[test]
fn given_concurrent_allocate_and_release_when_settled_then_only_surviving_grants_remain() {
    let store = contended_store();
    let consumers: Vec<ResourceConsumerId> = (0..THREADS)
        .map(|index| ResourceConsumerId::new(format!("c{index}")))
        .collect();

    thread::scope(|scope| {
        for consumer in &consumers {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                for _ in 0..REQUESTS_PER_THREAD {
                    if store.allocate(consumer, &link(2.5)).expect("allocate") {
                        store.release(consumer, &link(2.5)).expect("release");
                    }
                }
                store.allocate(consumer, &link(2.5)).expect("allocate")
            });
        }
    });

    let ledger = store
        .lookup(&ResourceId::new("link:a"))
        .expect("lookup")
        .expect("ledger exists");
    assert_eq!(ledger.allocations().len(), THREADS);
    assert_eq!(ledger.allocated_value(), 2.5 * THREADS as f64);
    for consumer in &consumers {
        assert_eq!(ledger.allocations_of(consumer).count(), 1);
    }
}
