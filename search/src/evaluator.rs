//! Evaluation entry point and expansion loop.

use std::panic::{catch_unwind, AssertUnwindSafe};

use weave_kernel::tree::StateTree;

use crate::configuration::{ConfigurationV1, ResumePointV1, ScheduleEventV1};
use crate::contract::{ObjectStoreV1, TrackedObjectV1};
use crate::error::{EvaluateError, ViolationReportV1};
use crate::frontier::ExplorationFrontierV1;
use crate::graph::{
    EvaluationStatsV1, ExpandEventV1, ExplorationGraphV1, TerminationV1, TransitionOutcomeV1,
    TransitionRecordV1,
};
use crate::policy::ExplorationPolicyV1;
use crate::process::{ProcessV1, StepFailureV1, StepScopeV1};

/// Result of a completed (non-violating) evaluation.
///
/// Always contains the complete [`ExplorationGraphV1`] audit trail. Check
/// [`EvaluationReportV1::termination`] to distinguish exhaustive coverage
/// from a bounded partial run.
#[derive(Debug, Clone)]
pub struct EvaluationReportV1 {
    /// Why the evaluation stopped (always a normal termination here).
    pub termination: TerminationV1,
    /// Aggregate counters.
    pub stats: EvaluationStatsV1,
    /// The diagnostic expansion log.
    pub graph: ExplorationGraphV1,
}

/// How one step run ended, after panic capture.
enum StepRun {
    Completed,
    Violated(String),
    Chose(weave_kernel::tree::ChoiceSetV1),
}

/// The interleaving search engine.
///
/// Owns the live tracked objects (as scratch space) and the process list.
/// Exploration itself is single-threaded and cooperative: at any instant
/// exactly one configuration is being expanded, and the only suspension
/// points are step boundaries.
pub struct EvaluatorV1 {
    objects: ObjectStoreV1,
    processes: Vec<ProcessV1>,
    stats: EvaluationStatsV1,
    graph: Option<ExplorationGraphV1>,
}

impl EvaluatorV1 {
    /// Build an evaluator over tracked objects and processes.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::Adapter`] for duplicate object ids and
    /// [`EvaluateError::UnknownTarget`] if a process is bound to an object
    /// that was not supplied (pre-flight only; no exploration is run).
    pub fn new(
        objects: Vec<Box<dyn TrackedObjectV1>>,
        processes: Vec<ProcessV1>,
    ) -> Result<Self, EvaluateError> {
        let store = ObjectStoreV1::new(objects)?;
        for process in &processes {
            if !store.contains(process.target()) {
                return Err(EvaluateError::UnknownTarget {
                    process: process.name().to_string(),
                    target: process.target().to_string(),
                });
            }
        }
        Ok(Self {
            objects: store,
            processes,
            stats: EvaluationStatsV1::default(),
            graph: None,
        })
    }

    /// Counters from the most recent run.
    ///
    /// Retained after both normal and violating terminations, so the caller
    /// can inspect how much space was covered before an abort.
    #[must_use]
    pub fn stats(&self) -> &EvaluationStatsV1 {
        &self.stats
    }

    /// Diagnostic expansion log from the most recent run, if any.
    #[must_use]
    pub fn graph(&self) -> Option<&ExplorationGraphV1> {
        self.graph.as_ref()
    }

    /// Run the interleaving search under a policy.
    ///
    /// Returns `Ok` on exhaustion or bound/depth-cutoff termination; the
    /// report says which. The frontier/visited machinery guarantees each
    /// distinct configuration is expanded at most once.
    ///
    /// # Errors
    ///
    /// - [`EvaluateError::Violation`]: a step raised an assertion violation
    ///   (explicitly or by panicking). The search is aborted immediately;
    ///   the report carries the full interleaving schedule.
    /// - [`EvaluateError::Encoding`]: a configuration could not be
    ///   canonically hashed.
    /// - [`EvaluateError::Adapter`]: a tracked-object adapter failed.
    /// - [`EvaluateError::VisitedCorrupted`]: the visited set contradicted
    ///   itself -- an engine defect, surfaced rather than ignored.
    #[allow(clippy::too_many_lines)]
    pub fn evaluate(
        &mut self,
        policy: &ExplorationPolicyV1,
    ) -> Result<EvaluationReportV1, EvaluateError> {
        self.stats = EvaluationStatsV1::default();
        self.graph = None;

        let mut frontier = ExplorationFrontierV1::new();
        let mut expansions: Vec<ExpandEventV1> = Vec::new();
        let mut expansion_count: u64 = 0;
        let mut depth_limited = false;

        let initial = ConfigurationV1::initial(self.objects.snapshot()?, self.processes.len());
        let root_hex = initial.fingerprint()?.hex_digest().to_string();
        frontier.push(initial);

        let termination = loop {
            if expansion_count >= policy.step_bound {
                break TerminationV1::StepBoundReached;
            }
            let Some(config) = frontier.pop_next(policy.order) else {
                break if depth_limited {
                    TerminationV1::DepthBoundReached
                } else {
                    TerminationV1::Exhausted
                };
            };

            let fp_hex = config.fingerprint()?.hex_digest().to_string();
            if frontier.is_visited(&fp_hex) {
                self.stats.duplicates_suppressed += 1;
                continue;
            }
            if !frontier.mark_visited(&fp_hex) {
                return Err(EvaluateError::VisitedCorrupted {
                    fingerprint: fp_hex,
                });
            }
            self.stats.distinct_states += 1;

            // A pending choice pins the expansion to one process; otherwise
            // every enabled process contributes successors.
            let runnable: Vec<usize> = match &config.resume {
                Some(point) => vec![point.process],
                None => (0..self.processes.len())
                    .filter(|&i| self.processes[i].enabled(config.cursors[i]))
                    .collect(),
            };

            let mut transitions: Vec<TransitionRecordV1> = Vec::new();
            let mut successors: Vec<ConfigurationV1> = Vec::new();

            for idx in runnable {
                let process = &self.processes[idx];
                let cursor = config.cursors[idx];
                let Some(step_fn) = process.step_at(cursor) else {
                    continue;
                };
                let resolutions: &[StateTree] = match &config.resume {
                    Some(point) => &point.resolved,
                    None => &[],
                };

                // Copy-on-fork: every branch starts from the parent snapshot.
                self.objects.restore(&config.snapshot)?;
                let Some(target) = self.objects.object_mut(process.target()) else {
                    return Err(EvaluateError::UnknownTarget {
                        process: process.name().to_string(),
                        target: process.target().to_string(),
                    });
                };

                let mut scope = StepScopeV1::new(target, resolutions);
                let outcome = catch_unwind(AssertUnwindSafe(|| step_fn(&mut scope)));
                self.stats.transitions += 1;

                let run = match outcome {
                    Err(payload) => StepRun::Violated(panic_message(&payload)),
                    Ok(Ok(())) => StepRun::Completed,
                    Ok(Err(StepFailureV1::AssertionViolation { message })) => {
                        StepRun::Violated(message)
                    }
                    Ok(Err(StepFailureV1::ChoicePoint { set })) => StepRun::Chose(set),
                    Ok(Err(StepFailureV1::Field(err))) => return Err(err.into()),
                    Ok(Err(StepFailureV1::Encoding(err))) => return Err(err.into()),
                };

                match run {
                    StepRun::Violated(message) => {
                        transitions.push(TransitionRecordV1 {
                            process: process.name().to_string(),
                            outcome: TransitionOutcomeV1::Violation {
                                message: message.clone(),
                            },
                        });
                        expansions.push(ExpandEventV1 {
                            expansion_order: expansion_count,
                            fingerprint: fp_hex.clone(),
                            depth: config.depth,
                            transitions,
                            dead_end: false,
                        });
                        self.stats.frontier_high_water = frontier.high_water();
                        self.graph = Some(ExplorationGraphV1::new(
                            expansions,
                            root_hex,
                            TerminationV1::ViolationFound,
                            policy,
                            self.stats,
                        ));
                        return Err(EvaluateError::Violation(ViolationReportV1 {
                            process: process.name().to_string(),
                            cursor,
                            message,
                            configuration: fp_hex,
                            schedule: config.schedule.clone(),
                        }));
                    }
                    StepRun::Chose(set) => {
                        let members = set.canonical_members()?;
                        if members.is_empty() {
                            transitions.push(TransitionRecordV1 {
                                process: process.name().to_string(),
                                outcome: TransitionOutcomeV1::EmptyChoice,
                            });
                        } else {
                            self.stats.choice_forks += 1;
                            let branches = members.len() as u64;
                            for (_, member) in members {
                                let mut resolved = resolutions.to_vec();
                                resolved.push(member);
                                successors.push(ConfigurationV1 {
                                    snapshot: config.snapshot.clone(),
                                    cursors: config.cursors.clone(),
                                    resume: Some(ResumePointV1 {
                                        process: idx,
                                        resolved,
                                    }),
                                    depth: config.depth,
                                    schedule: config.schedule.clone(),
                                });
                            }
                            transitions.push(TransitionRecordV1 {
                                process: process.name().to_string(),
                                outcome: TransitionOutcomeV1::Forked { branches },
                            });
                        }
                    }
                    StepRun::Completed => {
                        let snapshot = self.objects.snapshot()?;
                        let mut cursors = config.cursors.clone();
                        cursors[idx] = process.advance(cursors[idx]);
                        let mut successor = ConfigurationV1 {
                            snapshot,
                            cursors,
                            resume: None,
                            depth: config.depth + 1,
                            schedule: Vec::new(),
                        };
                        let successor_fp = successor.fingerprint()?;
                        let successor_hex = successor_fp.hex_digest().to_string();
                        let mut schedule = config.schedule.clone();
                        schedule.push(ScheduleEventV1 {
                            process: process.name().to_string(),
                            configuration: successor_fp,
                        });
                        successor.schedule = schedule;

                        if policy.max_depth.is_some_and(|max| successor.depth > max) {
                            depth_limited = true;
                            transitions.push(TransitionRecordV1 {
                                process: process.name().to_string(),
                                outcome: TransitionOutcomeV1::DepthLimited {
                                    successor: successor_hex,
                                },
                            });
                        } else {
                            transitions.push(TransitionRecordV1 {
                                process: process.name().to_string(),
                                outcome: TransitionOutcomeV1::Advanced {
                                    successor: successor_hex,
                                },
                            });
                            successors.push(successor);
                        }
                    }
                }
            }

            let dead_end = successors.is_empty();
            if dead_end {
                frontier.mark_dead_end(&fp_hex);
                self.stats.dead_ends += 1;
            }
            for successor in successors {
                frontier.push(successor);
            }
            expansions.push(ExpandEventV1 {
                expansion_order: expansion_count,
                fingerprint: fp_hex,
                depth: config.depth,
                transitions,
                dead_end,
            });
            expansion_count += 1;
        };

        self.stats.frontier_high_water = frontier.high_water();
        let graph = ExplorationGraphV1::new(expansions, root_hex, termination, policy, self.stats);
        self.graph = Some(graph.clone());
        Ok(EvaluationReportV1 {
            termination,
            stats: self.stats,
            graph,
        })
    }
}

/// Best-effort message extraction from a captured panic payload.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "step panicked".to_string()
    }
}
