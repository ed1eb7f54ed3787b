//! Two-phase fan-out/gather scheduling of dash computations.
//!
//! One evaluation pass over a batch of invocations runs in two phases,
//! both driven strictly in batch order by a single caller: `fan_out`
//! schedules one worker per item without blocking, and `gather` delivers
//! each item's result, falling back to an inline computation when no
//! worker result exists. Every invocation gets exactly one slot, so
//! results stay positionally aligned even when inputs are missing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use dash_core::Diagnostics;
use dash_geometry::Curve;

use crate::dasher::{self, SolveResult};
use crate::pattern::{self, Validation};

/// Pass-scoped cancellation signal.
///
/// Set once by the driver, observed read-only by every worker spawned in
/// the pass. A worker that sees the signal stops without producing a
/// usable result.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One batch item's view of the hosting pipeline: input retrieval and
/// output writing.
pub trait DataAccess {
    /// An owned clone of the item's curve, if one is present.
    fn curve(&self) -> Option<Box<dyn Curve>>;

    /// The item's raw dash pattern, if one is present.
    fn pattern(&self) -> Option<Vec<f64>>;

    /// Write both segment lists back to the item, in walk order.
    fn set_output(
        &mut self,
        dashes: Vec<Option<Box<dyn Curve>>>,
        gaps: Vec<Option<Box<dyn Curve>>>,
    );
}

/// How one invocation's slot resolved at gather time.
pub enum Outcome {
    /// The computation ran to completion. `None` means no pattern was
    /// supplied, so no output is written for the item.
    Completed(Option<SolveResult>),
    /// The pass was cancelled before the worker produced a result;
    /// delivery is skipped rather than recomputed.
    Cancelled,
    /// No worker was ever spawned for this slot; the caller may compute
    /// synchronously instead.
    NeverSpawned,
}

enum Slot {
    NeverSpawned,
    /// Validation settled the invocation at fan-out time without a worker.
    Resolved(Option<SolveResult>),
    Pending(Receiver<SolveResult>),
}

/// Two-phase scheduler for one evaluation pass over a batch.
#[derive(Default)]
pub struct Orchestrator {
    slots: Vec<Slot>,
    cancel: CancelToken,
    diagnostics: Diagnostics,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pass cancellation signal, for sharing with the driver.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Cancel the pass: workers that have not yet finished stop without
    /// sending a result, and their slots gather as `Cancelled`.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Diagnostics accumulated across the whole pass.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Phase 1: collect one item's inputs and schedule its computation.
    ///
    /// Called once per batch item, in batch order; never blocks. Items
    /// with a missing curve or pattern get an explicit never-spawned
    /// slot, and validation failures settle the slot immediately, so the
    /// slot list always stays one-to-one with the batch.
    pub fn fan_out(&mut self, item: &dyn DataAccess) {
        let slot = match (item.curve(), item.pattern()) {
            (Some(curve), Some(raw)) => {
                match pattern::validate(&raw, &mut self.diagnostics) {
                    Validation::Absent => Slot::Resolved(None),
                    Validation::TooShort => Slot::Resolved(Some(SolveResult::empty())),
                    Validation::Valid(pattern) => {
                        let (tx, rx) = mpsc::channel();
                        let token = self.cancel.clone();
                        rayon::spawn(move || {
                            if token.is_cancelled() {
                                return;
                            }
                            let result = dasher::segment(Some(curve.as_ref()), &pattern);
                            if token.is_cancelled() {
                                return;
                            }
                            // The receiver may already be gone if the
                            // pass was dropped; nothing to do then.
                            let _ = tx.send(result);
                        });
                        Slot::Pending(rx)
                    }
                }
            }
            _ => Slot::NeverSpawned,
        };
        self.slots.push(slot);
    }

    /// Resolve the slot at `index`, awaiting its worker if one is still
    /// running. Consumes the slot; this is the only blocking point of a
    /// pass.
    pub fn take_outcome(&mut self, index: usize) -> Outcome {
        if index >= self.slots.len() {
            return Outcome::NeverSpawned;
        }
        match std::mem::replace(&mut self.slots[index], Slot::NeverSpawned) {
            Slot::NeverSpawned => Outcome::NeverSpawned,
            Slot::Resolved(result) => Outcome::Completed(result),
            Slot::Pending(rx) => match rx.recv() {
                Ok(result) => Outcome::Completed(Some(result)),
                // The worker exited without sending. With the pass token
                // set that is a cancellation; otherwise treat the slot as
                // never spawned so the caller can recompute.
                Err(_) if self.cancel.is_cancelled() => Outcome::Cancelled,
                Err(_) => Outcome::NeverSpawned,
            },
        }
    }

    /// Phase 2: deliver one item's result.
    ///
    /// Called once per batch item, after all fan-out calls of the pass.
    /// A never-spawned slot is recomputed synchronously from freshly
    /// collected inputs; a cancelled slot is skipped. Returns whether
    /// output was written to the item.
    pub fn gather(&mut self, index: usize, item: &mut dyn DataAccess) -> bool {
        let result = match self.take_outcome(index) {
            Outcome::Completed(result) => result,
            Outcome::Cancelled => return false,
            Outcome::NeverSpawned => {
                // Compute right here, right now.
                let (Some(curve), Some(raw)) = (item.curve(), item.pattern()) else {
                    return false;
                };
                dasher::solve(Some(curve.as_ref()), &raw, &mut self.diagnostics)
            }
        };

        match result {
            Some(result) => {
                item.set_output(result.dashes, result.gaps);
                true
            }
            None => false,
        }
    }
}
