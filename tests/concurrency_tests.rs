//! Concurrency tests for the guarded collections.
//!
//! These tests share one collection instance between several threads and
//! check that every operation is applied atomically under the
//! per-instance lock.
//!
//! # Running these tests
//!
//! ```bash
//! RUST_LOG=guarded_collections=trace cargo test --test concurrency_tests
//! ```

use std::collections::HashSet;
use std::sync::mpsc;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use guarded_collections::{LinkedList, Queue, Set, Stack};
use rstest::rstest;
use tracing_subscriber::EnvFilter;

const THREADS: usize = 8;
const PER_THREAD: usize = 250;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Runs `work(thread_index)` on `THREADS` threads released together.
fn run_concurrently<F>(work: F)
where
    F: Fn(usize) + Send + Sync + 'static,
{
    let work = Arc::new(work);
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|thread_index| {
            let work = Arc::clone(&work);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                work(thread_index);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[rstest]
fn test_concurrent_set_add_with_distinct_values() {
    init_tracing();
    let set = Arc::new(Set::new());

    let shared = Arc::clone(&set);
    run_concurrently(move |thread_index| {
        for offset in 0..PER_THREAD {
            shared.add(thread_index * PER_THREAD + offset);
        }
    });

    assert_eq!(set.size(), THREADS * PER_THREAD);
    for value in 0..THREADS * PER_THREAD {
        assert!(set.has(&value));
    }
}

#[rstest]
fn test_concurrent_opposite_binary_operations_do_not_deadlock() {
    init_tracing();
    let first: Arc<Set<usize>> = Arc::new((0..100).collect());
    let second: Arc<Set<usize>> = Arc::new((50..150).collect());

    let (left, right) = (Arc::clone(&first), Arc::clone(&second));
    run_concurrently(move |thread_index| {
        for round in 0..200 {
            match (thread_index + round) % 4 {
                0 => assert!(left.union(&right).size() >= 100),
                1 => assert!(right.intersection(&left).size() <= 100),
                2 => {
                    left.add(1000 + thread_index);
                    left.delete(&(1000 + thread_index));
                }
                _ => {
                    right.add(2000 + thread_index);
                    assert!(!right.subset(&left));
                    right.delete(&(2000 + thread_index));
                }
            }
        }
    });

    assert_eq!(first.size(), 100);
    assert_eq!(second.size(), 100);
    assert_eq!(first.intersection(&second).size(), 50);
}

#[rstest]
fn test_concurrent_list_appends_keep_counter_and_chain_consistent() {
    init_tracing();
    let list = Arc::new(LinkedList::new());

    let shared = Arc::clone(&list);
    run_concurrently(move |thread_index| {
        for offset in 0..PER_THREAD {
            shared.append(thread_index * PER_THREAD + offset);
        }
    });

    assert_eq!(list.size(), THREADS * PER_THREAD);
    assert_eq!(list.cached_size(), THREADS * PER_THREAD);
    let distinct: HashSet<usize> = list.to_vec().into_iter().collect();
    assert_eq!(distinct.len(), THREADS * PER_THREAD);
}

#[rstest]
fn test_concurrent_list_insert_and_remove_at_head() {
    init_tracing();
    let list: Arc<LinkedList<usize>> = Arc::new((0..10).collect());

    let shared = Arc::clone(&list);
    run_concurrently(move |thread_index| {
        for _ in 0..PER_THREAD {
            shared.insert(0, thread_index).unwrap();
            shared.remove_at(0).unwrap();
        }
    });

    assert_eq!(list.size(), 10);
    assert_eq!(list.cached_size(), 10);
}

#[rstest]
fn test_list_queries_while_holding_head_with_writer_waiting() {
    init_tracing();
    let list: Arc<LinkedList<usize>> = Arc::new((1..=3).collect());
    let (sender, receiver) = mpsc::channel();

    let reader_list = Arc::clone(&list);
    let reader = thread::spawn(move || {
        let head = reader_list.head().unwrap();
        let writer_list = Arc::clone(&reader_list);
        let writer = thread::spawn(move || writer_list.append(4));
        thread::sleep(Duration::from_millis(100));

        let size = reader_list.size();
        let position = reader_list.index_of(head.content());
        drop(head);
        sender.send((size, position)).unwrap();
        writer.join().unwrap();
    });

    let observed = receiver.recv_timeout(Duration::from_secs(5));
    assert_eq!(observed, Ok((3, Some(0))));
    reader.join().unwrap();
    assert_eq!(list.to_vec(), vec![1, 2, 3, 4]);
}

#[rstest]
fn test_concurrent_stack_push_pop_loses_nothing() {
    init_tracing();
    let stack = Arc::new(Stack::new());

    let shared = Arc::clone(&stack);
    run_concurrently(move |thread_index| {
        for offset in 0..PER_THREAD {
            shared.push(thread_index * PER_THREAD + offset);
        }
    });

    let mut popped = HashSet::new();
    while let Ok(value) = stack.pop() {
        assert!(popped.insert(value));
    }
    assert_eq!(popped.len(), THREADS * PER_THREAD);
}

#[rstest]
fn test_concurrent_queue_consumers_receive_each_item_once() {
    init_tracing();
    let queue: Arc<Queue<usize>> = Arc::new((0..THREADS * PER_THREAD).collect());
    let received = Arc::new(Set::new());

    let (shared, sink) = (Arc::clone(&queue), Arc::clone(&received));
    run_concurrently(move |_| {
        while let Ok(value) = shared.dequeue() {
            assert!(!sink.has(&value));
            sink.add(value);
        }
    });

    assert!(queue.is_empty());
    assert_eq!(received.size(), THREADS * PER_THREAD);
}

#[rstest]
fn test_concurrent_queue_preserves_per_producer_order() {
    init_tracing();
    let queue = Arc::new(Queue::new());

    let shared = Arc::clone(&queue);
    run_concurrently(move |thread_index| {
        for sequence in 0..PER_THREAD {
            shared.enqueue((thread_index, sequence));
        }
    });

    let mut last_seen = vec![None; THREADS];
    while let Ok((thread_index, sequence)) = queue.dequeue() {
        if let Some(previous) = last_seen[thread_index] {
            assert!(sequence > previous);
        }
        last_seen[thread_index] = Some(sequence);
    }
    assert!(last_seen.iter().all(|last| *last == Some(PER_THREAD - 1)));
}
