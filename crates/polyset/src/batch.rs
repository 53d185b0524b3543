//! Parallel batch generation.
//!
//! Model
//! - One task per candidate on a dedicated worker pool. Task `i` draws a ring from
//!   the replay token `(batch_id, i)`, names it `random_poly_{batch_id}_{i}`, and runs
//!   it through [`admit`].
//! - Every task sends exactly one outcome to the orchestrator over a channel; the
//!   orchestrator alone owns the collected results and reads them after the scope
//!   has joined all tasks.
//! - Each candidate was checked against the store as it stood before the batch, so
//!   two accepted candidates may still overlap each other. Reconciliation keeps them
//!   in task order and drops any that touch one already kept.
//! - The survivors go to the store in one `insert_batch`.
//!
//! No cancellation, no timeouts, no retries: a slow task delays the whole batch and
//! a failed task only drops its own candidate.

use std::sync::mpsc;

use rand::Rng;
use rayon::ThreadPoolBuilder;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::admit::{admit, AdmitError, ValidationError};
use crate::geom::rand::{draw_ring, ReplayToken, RingCfg};
use crate::geom::{rings_intersect, Polygon};
use crate::store::{PolygonStore, StoreError};

/// Largest batch id drawn when no seed is given.
const BATCH_ID_RANGE: u64 = 1_000_000;

/// Batch configuration.
#[derive(Clone, Copy, Debug)]
pub struct BatchCfg {
    /// Number of generation attempts.
    pub size: usize,
    pub ring: RingCfg,
    /// Worker threads; `None` uses the available parallelism. Never more than `size`.
    pub threads: Option<usize>,
    /// Fixes the batch id (and with it every candidate) when set.
    pub seed: Option<u64>,
}

impl Default for BatchCfg {
    fn default() -> Self {
        Self {
            size: 100,
            ring: RingCfg::default(),
            threads: None,
            seed: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("could not start batch workers: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What happened to the attempts of one batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub batch_id: u64,
    pub attempted: usize,
    /// Names written to the store, in task order.
    pub accepted: Vec<String>,
    /// Failed a validation gate.
    pub rejected: usize,
    /// Store error while validating.
    pub failed: usize,
    /// Valid alone but overlapping an earlier candidate of the same batch.
    pub conflicts: usize,
}

impl BatchReport {
    #[inline]
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }
}

enum Outcome {
    Accepted(Polygon),
    Rejected(ValidationError),
    Failed(StoreError),
}

/// Deterministic name of candidate `index` in batch `batch_id`.
pub fn candidate_name(batch_id: u64, index: usize) -> String {
    format!("random_poly_{batch_id}_{index}")
}

/// Regenerate candidate `index` of batch `batch_id` (raw, not admitted).
pub fn candidate(batch_id: u64, index: usize, ring: RingCfg) -> Polygon {
    let tok = ReplayToken {
        seed: batch_id,
        index: index as u64,
    };
    Polygon::candidate(candidate_name(batch_id, index), draw_ring(ring, tok))
}

fn attempt<S: PolygonStore + ?Sized>(store: &S, batch_id: u64, index: usize, ring: RingCfg) -> Outcome {
    match admit(store, candidate(batch_id, index, ring)) {
        Ok(p) => Outcome::Accepted(p),
        Err(AdmitError::Validation(v)) => Outcome::Rejected(v),
        Err(AdmitError::Store(e)) => Outcome::Failed(e),
    }
}

/// Run `cfg.size` generate+admit attempts in parallel and insert the survivors.
///
/// Errors only if the workers cannot start or the final batch insert fails; in
/// both cases nothing was written.
pub fn generate_batch<S: PolygonStore + ?Sized>(
    store: &S,
    cfg: &BatchCfg,
) -> Result<BatchReport, BatchError> {
    let batch_id = cfg
        .seed
        .unwrap_or_else(|| rand::thread_rng().gen_range(0..BATCH_ID_RANGE));
    let threads = cfg
        .threads
        .unwrap_or_else(|| std::thread::available_parallelism().map_or(4, |n| n.get()))
        .clamp(1, cfg.size.max(1));
    info!(batch_id, size = cfg.size, threads, "batch started");

    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("polyset-batch-{i}"))
        .build()?;

    let (tx, rx) = mpsc::channel::<(usize, Outcome)>();
    let ring = cfg.ring;
    pool.scope(|s| {
        for index in 0..cfg.size {
            let tx = tx.clone();
            s.spawn(move |_| {
                let outcome = attempt(store, batch_id, index, ring);
                // the receiver outlives the scope
                let _ = tx.send((index, outcome));
            });
        }
    });
    drop(tx);

    let mut report = BatchReport {
        batch_id,
        attempted: cfg.size,
        ..BatchReport::default()
    };
    let mut admitted = Vec::new();
    for (index, outcome) in rx {
        match outcome {
            Outcome::Accepted(p) => admitted.push((index, p)),
            Outcome::Rejected(reason) => {
                debug!(batch_id, index, %reason, "candidate rejected");
                report.rejected += 1;
            }
            Outcome::Failed(error) => {
                debug!(batch_id, index, %error, "candidate check failed");
                report.failed += 1;
            }
        }
    }

    let (kept, conflicts) = reconcile(admitted);
    report.conflicts = conflicts;
    if !kept.is_empty() {
        store.insert_batch(&kept)?;
    }
    report.accepted = kept.into_iter().map(|p| p.name).collect();

    info!(
        batch_id,
        accepted = report.accepted_count(),
        rejected = report.rejected,
        failed = report.failed,
        conflicts = report.conflicts,
        "batch finished"
    );
    Ok(report)
}

/// Keep candidates in task order, dropping any that touch one already kept.
///
/// Returns the survivors and the number dropped.
fn reconcile(mut admitted: Vec<(usize, Polygon)>) -> (Vec<Polygon>, usize) {
    admitted.sort_by_key(|(index, _)| *index);
    let mut kept: Vec<Polygon> = Vec::with_capacity(admitted.len());
    let mut conflicts = 0;
    for (index, p) in admitted {
        if kept.iter().any(|k| rings_intersect(&k.points, &p.points)) {
            debug!(index, name = %p.name, "dropped: overlaps earlier candidate of this batch");
            conflicts += 1;
        } else {
            kept.push(p);
        }
    }
    (kept, conflicts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::rand::VertexCount;
    use crate::geom::{normalize, signed_area, Point};
    use crate::store::MemoryStore;
    use crate::testing::CountingStore;

    fn admitted(name: &str, x: f64, y: f64, side: f64) -> Polygon {
        let points = normalize(vec![
            Point::new(x, y),
            Point::new(x + side, y),
            Point::new(x + side, y + side),
            Point::new(x, y + side),
        ]);
        let area = signed_area(&points).unwrap();
        Polygon {
            name: name.to_string(),
            points,
            area,
        }
    }

    fn seeded(size: usize, seed: u64) -> BatchCfg {
        BatchCfg {
            size,
            seed: Some(seed),
            ..BatchCfg::default()
        }
    }

    #[test]
    fn hundred_attempts_on_empty_store() {
        let store = MemoryStore::new();
        let report = generate_batch(&store, &BatchCfg::default()).unwrap();
        assert_eq!(report.attempted, 100);
        assert!(report.accepted_count() <= 100);
        assert_eq!(
            report.accepted_count() + report.rejected + report.failed + report.conflicts,
            100
        );
        assert_eq!(store.len(), report.accepted_count());
        // the reconciled survivors are exactly what was written
        let stored = store.list_all().unwrap();
        let names: Vec<_> = stored.iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, report.accepted);
        assert!(stored.iter().all(|p| p.points.len() >= 4));
    }

    #[test]
    fn every_attempt_reaches_the_store() {
        let store = CountingStore::new(MemoryStore::new());
        let report = generate_batch(&store, &seeded(40, 9)).unwrap();
        assert_eq!(report.attempted, 40);
        // one name check per attempt, plus intersection checks and the insert
        assert!(store.calls() >= 40);
        assert_eq!(store.inner().len(), report.accepted_count());
    }

    #[test]
    fn stored_batch_has_no_overlapping_pair() {
        // huge radii clamp onto the border, so candidates overlap each other a lot
        let cfg = BatchCfg {
            size: 60,
            seed: Some(77),
            ring: RingCfg {
                vertex_count: VertexCount::Uniform { min: 3, max: 8 },
                radius_min: 300_000.0,
                radius_max: 600_000.0,
            },
            threads: Some(4),
        };
        let store = MemoryStore::new();
        let report = generate_batch(&store, &cfg).unwrap();
        let stored = store.list_all().unwrap();
        assert_eq!(stored.len(), report.accepted_count());
        for (i, a) in stored.iter().enumerate() {
            for b in &stored[i + 1..] {
                assert!(!rings_intersect(&a.points, &b.points), "{} vs {}", a.name, b.name);
            }
        }
        assert!(report.accepted_count() >= 1);
    }

    #[test]
    fn names_follow_batch_id_and_index() {
        let store = MemoryStore::new();
        let report = generate_batch(&store, &seeded(10, 1234)).unwrap();
        assert_eq!(report.batch_id, 1234);
        for name in &report.accepted {
            assert!(name.starts_with("random_poly_1234_"));
        }
        assert_eq!(candidate_name(5, 3), "random_poly_5_3");
    }

    #[test]
    fn seeded_batches_replay_identically() {
        let a = MemoryStore::new();
        let b = MemoryStore::new();
        let ra = generate_batch(&a, &BatchCfg { threads: Some(1), ..seeded(25, 42) }).unwrap();
        let rb = generate_batch(&b, &BatchCfg { threads: Some(8), ..seeded(25, 42) }).unwrap();
        assert_eq!(ra, rb);
        assert_eq!(a.list_all().unwrap(), b.list_all().unwrap());

        // any stored candidate can be regenerated from its token
        let first = &a.list_all().unwrap()[0];
        let index: usize = first.name.rsplit('_').next().unwrap().parse().unwrap();
        let again = admit(&MemoryStore::new(), candidate(42, index, RingCfg::default())).unwrap();
        assert_eq!(&again, first);
    }

    #[test]
    fn rerunning_a_seed_hits_duplicate_names() {
        let store = MemoryStore::new();
        let first = generate_batch(&store, &seeded(10, 5)).unwrap();
        let second = generate_batch(&store, &seeded(10, 5)).unwrap();
        assert_eq!(second.accepted_count(), 0);
        assert_eq!(second.rejected + second.conflicts, 10);
        assert_eq!(store.len(), first.accepted_count());
    }

    #[test]
    fn store_failures_do_not_abort_siblings() {
        let store = CountingStore::new(MemoryStore::new()).failing();
        let report = generate_batch(&store, &seeded(20, 3)).unwrap();
        assert_eq!(report.failed, 20);
        assert_eq!(report.accepted_count(), 0);
    }

    #[test]
    fn final_insert_failure_is_returned() {
        let store = CountingStore::new(MemoryStore::new());
        store.set_fail_insert(true);
        let err = generate_batch(&store, &seeded(10, 8)).unwrap_err();
        assert!(matches!(err, BatchError::Store(StoreError::Unavailable { .. })));
        assert!(store.inner().is_empty());
    }

    #[test]
    fn empty_batch_writes_nothing() {
        let store = CountingStore::new(MemoryStore::new());
        let report = generate_batch(&store, &seeded(0, 1)).unwrap();
        assert_eq!(report.attempted, 0);
        assert_eq!(store.calls(), 0);
    }

    #[test]
    fn reconcile_keeps_first_of_overlapping_pair() {
        let batch = vec![
            (2, admitted("c", 5.0, 5.0, 10.0)),
            (0, admitted("a", 0.0, 0.0, 10.0)),
            (1, admitted("b", 100.0, 100.0, 10.0)),
            (3, admitted("d", 105.0, 95.0, 10.0)),
        ];
        let (kept, conflicts) = reconcile(batch);
        let names: Vec<_> = kept.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(conflicts, 2);
    }
}
