//! Persistent MST worker pool
//!
//! Workers pull jobs from a bounded queue and push one result each into a
//! bounded result queue. The coordinator submits exactly one job per worker
//! and then blocks until the same number of results is back, which makes the
//! result queue a barrier at the end of every round.

use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use log::debug;

use super::graph::DistanceGraph;
use super::mst::Edge;
use crate::error::GenError;

/// Weight reported by a worker that found no edge
pub const INFINITE_WEIGHT: i64 = i64::MAX;

/// Inclusive column range scanned by one worker
pub type ColumnRange = (usize, usize);

/// One worker's share of a round
///
/// The graph and both membership tables are read-only snapshots shared by
/// every job of the round.
#[derive(Debug, Clone)]
pub struct Job {
    pub worker: usize,
    pub graph: Arc<DistanceGraph>,
    pub labelled: Arc<[bool]>,
    pub deleted: Arc<[bool]>,
    /// `None` when the partition left this worker without columns
    pub columns: Option<ColumnRange>,
}

/// Cheapest edge seen by one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobResult {
    pub worker: usize,
    pub edge: Option<Edge>,
    pub weight: i64,
}

impl Job {
    /// Scan rows outside the tree against tree columns in range
    ///
    /// Row-major, ascending; the first strictly smaller weight wins ties.
    pub fn run(&self) -> JobResult {
        let mut best = JobResult {
            worker: self.worker,
            edge: None,
            weight: INFINITE_WEIGHT,
        };
        let Some((start, end)) = self.columns else {
            return best;
        };
        let end = end.min(self.graph.len().saturating_sub(1));

        for from in 0..self.graph.len() {
            if self.deleted[from] || self.labelled[from] {
                continue;
            }
            for to in start..=end {
                if !self.labelled[to] {
                    continue;
                }
                let weight = self.graph.raw(from, to);
                if weight >= 0 && weight < best.weight {
                    best.edge = Some(Edge { from, to });
                    best.weight = weight;
                }
            }
        }

        best
    }
}

/// Fixed set of worker threads, joined on drop
#[derive(Debug)]
pub struct WorkerPool {
    jobs: Option<SyncSender<Job>>,
    results: Receiver<JobResult>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `size` workers
    pub fn new(size: usize) -> Result<Self, GenError> {
        if size == 0 {
            return Err(GenError::WorkerPool("pool needs at least one worker".into()));
        }

        let (job_tx, job_rx) = mpsc::sync_channel::<Job>(size);
        let (result_tx, result_rx) = mpsc::sync_channel::<JobResult>(size);
        let job_rx = Arc::new(Mutex::new(job_rx));

        let mut workers = Vec::with_capacity(size);
        for id in 0..size {
            let jobs = Arc::clone(&job_rx);
            let results = result_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("delve-mst-{id}"))
                .spawn(move || worker_loop(&jobs, &results))
                .map_err(|e| GenError::WorkerPool(e.to_string()))?;
            workers.push(handle);
        }
        debug!("started {size} MST workers");

        Ok(Self {
            jobs: Some(job_tx),
            results: result_rx,
            workers,
        })
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Run one round: one job per range, then wait for every result
    ///
    /// Needs exactly one range per worker and membership tables as long as
    /// the graph; anything else is rejected before a job is queued. Returns
    /// the cheapest edge over all workers, `None` if nobody found one. Ties
    /// go to the lowest worker index, so the answer does not depend on which
    /// thread finishes first.
    pub fn find_minimum(
        &self,
        graph: &Arc<DistanceGraph>,
        labelled: &Arc<[bool]>,
        deleted: &Arc<[bool]>,
        ranges: &[Option<ColumnRange>],
    ) -> Result<Option<(Edge, i64)>, GenError> {
        if ranges.len() != self.size() {
            return Err(GenError::WorkerPool(format!(
                "{} column ranges for {} workers",
                ranges.len(),
                self.size()
            )));
        }
        if labelled.len() != graph.len() || deleted.len() != graph.len() {
            return Err(GenError::WorkerPool(format!(
                "membership tables of {} and {} entries for {} nodes",
                labelled.len(),
                deleted.len(),
                graph.len()
            )));
        }

        let jobs = self
            .jobs
            .as_ref()
            .ok_or_else(|| GenError::WorkerPool("pool is shut down".into()))?;

        for (worker, &columns) in ranges.iter().enumerate() {
            let job = Job {
                worker,
                graph: Arc::clone(graph),
                labelled: Arc::clone(labelled),
                deleted: Arc::clone(deleted),
                columns,
            };
            jobs.send(job)
                .map_err(|_| GenError::WorkerPool("job queue closed".into()))?;
        }

        let mut results = Vec::with_capacity(ranges.len());
        for _ in 0..ranges.len() {
            let result = self
                .results
                .recv()
                .map_err(|_| GenError::WorkerPool("result queue closed".into()))?;
            results.push(result);
        }

        Ok(aggregate(results))
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Closing the job queue ends every worker loop.
        self.jobs.take();
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

fn worker_loop(jobs: &Mutex<Receiver<Job>>, results: &SyncSender<JobResult>) {
    loop {
        let job = match jobs.lock() {
            Ok(rx) => match rx.recv() {
                Ok(job) => job,
                Err(_) => return,
            },
            Err(_) => return,
        };
        if results.send(job.run()).is_err() {
            return;
        }
    }
}

/// Global minimum over worker results, ties to the lowest worker index
pub fn aggregate(mut results: Vec<JobResult>) -> Option<(Edge, i64)> {
    results.sort_by_key(|r| r.worker);

    let mut best: Option<(Edge, i64)> = None;
    for result in results {
        if let Some(edge) = result.edge {
            if best.is_none_or(|(_, w)| result.weight < w) {
                best = Some((edge, result.weight));
            }
        }
    }
    best
}
