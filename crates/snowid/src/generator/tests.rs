use core::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::thread::scope;

use crate::{Config, Error, Generator, IdGenStatus, Layout, SnowId, TimeSource};

struct MockTime {
    millis: i64,
}

impl TimeSource for MockTime {
    fn current_millis(&self) -> i64 {
        self.millis
    }
}

/// Returns `values[i]` on the i-th read and repeats the last value forever
/// after that.
#[derive(Clone)]
struct ScriptedTime {
    clock: Rc<Script>,
}

struct Script {
    values: Vec<i64>,
    reads: Cell<usize>,
}

impl ScriptedTime {
    fn new(values: Vec<i64>) -> Self {
        Self {
            clock: Rc::new(Script {
                values,
                reads: Cell::new(0),
            }),
        }
    }

    fn reads(&self) -> usize {
        self.clock.reads.get()
    }
}

impl TimeSource for ScriptedTime {
    fn current_millis(&self) -> i64 {
        let i = self.clock.reads.get();
        self.clock.reads.set(i + 1);
        let last = self.clock.values.len() - 1;
        self.clock.values[i.min(last)]
    }
}

/// Stays at `before` for the first `threshold` reads, then jumps to `after`.
#[derive(Clone)]
struct TickAfter {
    before: i64,
    after: i64,
    threshold: usize,
    reads: Rc<Cell<usize>>,
}

impl TimeSource for TickAfter {
    fn current_millis(&self) -> i64 {
        let n = self.reads.get();
        self.reads.set(n + 1);
        if n < self.threshold {
            self.before
        } else {
            self.after
        }
    }
}

trait IdGenStatusExt {
    fn unwrap_ready(self) -> SnowId;
    fn unwrap_pending(self) -> i64;
}

impl IdGenStatusExt for IdGenStatus {
    fn unwrap_ready(self) -> SnowId {
        match self {
            Self::Ready { id } => id,
            Self::Pending { yield_for } => {
                panic!("unexpected pending (yield for: {yield_for})")
            }
        }
    }

    fn unwrap_pending(self) -> i64 {
        match self {
            Self::Ready { id } => panic!("unexpected ready ({id})"),
            Self::Pending { yield_for } => yield_for,
        }
    }
}

#[test]
fn accepts_every_node_in_range() {
    let layout = Layout::new(4, 12).unwrap();
    for node in 0..=layout.node_max() {
        let generator = Generator::with_time(node, layout, MockTime { millis: 1 }).unwrap();
        assert_eq!(generator.node(), node);
    }
}

#[test]
fn rejects_nodes_out_of_range() {
    let layout = Layout::DEFAULT;
    for node in [-1, i64::MIN, 1024, 5000, i64::MAX] {
        let err = Generator::with_time(node, layout, MockTime { millis: 1 }).unwrap_err();
        assert_eq!(err, Error::InvalidNode { node, max: 1023 });
    }
}

#[test]
fn rejects_invalid_layout_from_config() {
    let config = Config {
        node_bits: 20,
        step_bits: 3,
        ..Config::default()
    };
    assert_eq!(
        Generator::with_config(0, &config).unwrap_err(),
        Error::InvalidLayout {
            node_bits: 20,
            step_bits: 3
        }
    );
}

#[test]
fn default_generator_bounds() {
    assert!(Generator::new(0).is_ok());
    assert!(Generator::new(1023).is_ok());
    assert!(Generator::new(1024).is_err());
}

#[test]
fn packs_timestamp_node_and_sequence() {
    let generator = Generator::with_time(1, Layout::DEFAULT, MockTime { millis: 42 }).unwrap();
    let id = generator.generate();
    assert_eq!(id.to_raw(), (42 << 22) | (1 << 12));

    let layout = generator.layout();
    assert_eq!(layout.timestamp(id), 42);
    assert_eq!(layout.node(id), 1);
    assert_eq!(layout.sequence(id), 0);
}

#[test]
fn clock_before_epoch_still_orders_ids() {
    let time = ScriptedTime::new(vec![-1, 0]);
    let generator = Generator::with_time(1, Layout::DEFAULT, time).unwrap();
    let layout = *generator.layout();

    let before = generator.generate();
    let after = generator.generate();

    assert!(before < after);
    assert!(!before.is_valid());
    assert!(before.to_text().is_err());
    assert_eq!(layout.timestamp(before), -1);
    assert_eq!(layout.node(before), 1);
    assert!(after.is_valid());
    assert_eq!(layout.timestamp(after), 0);
}

#[test]
fn sequence_increments_within_same_tick() {
    let generator = Generator::with_time(0, Layout::DEFAULT, MockTime { millis: 42 }).unwrap();
    let layout = *generator.layout();

    let id1 = generator.generate();
    let id2 = generator.generate();
    let id3 = generator.generate();

    for id in [id1, id2, id3] {
        assert_eq!(layout.timestamp(id), 42);
    }
    assert_eq!(layout.sequence(id1), 0);
    assert_eq!(layout.sequence(id2), 1);
    assert_eq!(layout.sequence(id3), 2);
    assert!(id1 < id2 && id2 < id3);
}

#[test]
fn sequence_resets_when_clock_advances() {
    let time = ScriptedTime::new(vec![42, 42, 42, 43]);
    let generator = Generator::with_time(0, Layout::DEFAULT, time).unwrap();
    let layout = *generator.layout();

    assert_eq!(layout.sequence(generator.generate()), 0);
    assert_eq!(layout.sequence(generator.generate()), 1);
    assert_eq!(layout.sequence(generator.generate()), 2);

    let id = generator.generate();
    assert_eq!(layout.timestamp(id), 43);
    assert_eq!(layout.sequence(id), 0);
}

#[test]
fn exhausted_sequence_waits_for_next_millisecond() {
    let layout = Layout::DEFAULT;
    let per_tick = usize::try_from(layout.step_mask()).unwrap() + 1;
    let reads = Rc::new(Cell::new(0));
    let time = TickAfter {
        before: 42,
        after: 43,
        // one read per call for the full tick, plus the read that detects
        // the wrap
        threshold: per_tick + 1,
        reads: Rc::clone(&reads),
    };
    let generator = Generator::with_time(1, layout, time).unwrap();

    let mut last = SnowId::from_raw(-1);
    for i in 0..per_tick {
        let id = generator.generate();
        assert_eq!(layout.timestamp(id), 42);
        assert_eq!(layout.sequence(id), i64::try_from(i).unwrap());
        assert!(id > last);
        last = id;
    }

    let id = generator.generate();
    assert_eq!(layout.timestamp(id), 43);
    assert_eq!(layout.sequence(id), 0);
    assert_eq!(layout.node(id), 1);
    assert!(id > last);
    // the wrap read plus exactly one read inside the wait
    assert_eq!(reads.get(), per_tick + 2);
}

#[test]
fn wait_spins_until_clock_moves() {
    let layout = Layout::new(10, 1).unwrap();
    let time = ScriptedTime::new(vec![7, 7, 7, 7, 7, 7, 8]);
    let generator = Generator::with_time(3, layout, time.clone()).unwrap();

    assert_eq!(layout.sequence(generator.generate()), 0);
    assert_eq!(layout.sequence(generator.generate()), 1);
    let id = generator.generate();
    assert_eq!(layout.timestamp(id), 8);
    assert_eq!(layout.sequence(id), 0);
    assert_eq!(time.reads(), 7);
}

#[test]
fn zero_step_bits_issues_one_id_per_millisecond() {
    let layout = Layout::new(10, 0).unwrap();
    let time = ScriptedTime::new(vec![5, 5, 6, 6, 6, 7]);
    let generator = Generator::with_time(2, layout, time).unwrap();

    let a = generator.generate();
    let b = generator.generate();
    let c = generator.generate();
    assert_eq!(layout.timestamp(a), 5);
    assert_eq!(layout.timestamp(b), 6);
    assert_eq!(layout.timestamp(c), 7);
    assert!(a < b && b < c);
}

#[test]
fn poll_reports_pending_when_sequence_exhausted() {
    let layout = Layout::new(10, 2).unwrap();
    let generator = Generator::with_time(0, layout, MockTime { millis: 9 }).unwrap();

    for seq in 0..=layout.step_mask() {
        let id = generator.poll_id().unwrap_ready();
        assert_eq!(layout.sequence(id), seq);
    }
    assert_eq!(generator.poll_id().unwrap_pending(), 1);
    assert_eq!(generator.poll_id().unwrap_pending(), 1);
}

#[test]
fn poll_reports_pending_when_clock_is_behind() {
    let time = ScriptedTime::new(vec![50, 47, 51]);
    let generator = Generator::with_time(0, Layout::DEFAULT, time).unwrap();
    let layout = *generator.layout();

    let first = generator.poll_id().unwrap_ready();
    assert_eq!(layout.timestamp(first), 50);
    assert_eq!(generator.poll_id().unwrap_pending(), 3);

    let next = generator.poll_id().unwrap_ready();
    assert_eq!(layout.timestamp(next), 51);
    assert!(next > first);
}

#[test]
fn poll_and_generate_share_state() {
    let time = ScriptedTime::new(vec![10, 10, 10, 11]);
    let generator = Generator::with_time(0, Layout::DEFAULT, time).unwrap();
    let layout = *generator.layout();

    let a = generator.generate();
    let b = generator.poll_id().unwrap_ready();
    let c = generator.generate();
    let d = generator.poll_id().unwrap_ready();

    assert_eq!(
        [a, b, c].map(|id| layout.sequence(id)),
        [0, 1, 2],
    );
    assert_eq!(layout.timestamp(d), 11);
    assert_eq!(layout.sequence(d), 0);
}

#[test]
fn generated_ids_strictly_increase() {
    let generator = Generator::new(1).unwrap();
    let mut last = generator.generate();
    for _ in 0..1_000_000 {
        let id = generator.generate();
        assert!(id > last, "{id:?} <= {last:?}");
        last = id;
    }
}

#[test]
fn generated_ids_strictly_increase_with_wide_sequence() {
    let config = Config {
        node_bits: 1,
        step_bits: 21,
        ..Config::default()
    };
    let generator = Generator::with_config(1, &config).unwrap();
    let mut last = generator.generate();
    for _ in 0..100_000 {
        let id = generator.generate();
        assert!(id > last);
        assert_eq!(generator.layout().node(id), 1);
        last = id;
    }
}

#[test]
fn generated_ids_round_trip_through_text() {
    let generator = Generator::new(0).unwrap();
    for _ in 0..10 {
        let id = generator.generate();
        let text = id.to_text().unwrap();
        assert_eq!(SnowId::parse(&text), Ok(id));
    }
}

#[test]
fn threaded_generation_is_unique() {
    const THREADS: usize = 8;
    const TOTAL_IDS: usize = 4096 * 64;
    const IDS_PER_THREAD: usize = TOTAL_IDS / THREADS;

    let generator = Arc::new(Generator::new(0).unwrap());
    let seen_ids = Arc::new(Mutex::new(HashSet::with_capacity(TOTAL_IDS)));

    scope(|s| {
        for _ in 0..THREADS {
            let generator = Arc::clone(&generator);
            let seen_ids = Arc::clone(&seen_ids);

            s.spawn(move || {
                let mut local = Vec::with_capacity(IDS_PER_THREAD);
                let mut last = SnowId::from_raw(-1);
                for _ in 0..IDS_PER_THREAD {
                    let id = generator.generate();
                    assert!(id > last);
                    last = id;
                    local.push(id);
                }
                let mut seen = seen_ids.lock().unwrap();
                for id in local {
                    assert!(seen.insert(id), "duplicate {id:?}");
                }
            });
        }
    });

    let final_count = seen_ids.lock().unwrap().len();
    assert_eq!(final_count, TOTAL_IDS, "Expected {TOTAL_IDS} unique IDs");
}

#[test]
fn threaded_polling_is_unique() {
    const THREADS: usize = 4;
    const IDS_PER_THREAD: usize = 20_000;

    let generator = Generator::new(7).unwrap();
    let seen_ids = Mutex::new(HashSet::with_capacity(THREADS * IDS_PER_THREAD));

    scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..IDS_PER_THREAD {
                    let id = loop {
                        match generator.poll_id() {
                            IdGenStatus::Ready { id } => break id,
                            IdGenStatus::Pending { .. } => std::thread::yield_now(),
                        }
                    };
                    assert!(seen_ids.lock().unwrap().insert(id));
                }
            });
        }
    });

    assert_eq!(seen_ids.lock().unwrap().len(), THREADS * IDS_PER_THREAD);
}
