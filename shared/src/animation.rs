use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::WheelError;

/// Stage of the wheel's animation state machine.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Rewinding,
    Spinning,
}

impl Phase {
    /// Name written into snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "NONE",
            Phase::Rewinding => "BACK_SPIN",
            Phase::Spinning => "SPIN",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = WheelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NONE" | "IDLE" => Ok(Phase::Idle),
            "BACK_SPIN" | "REWINDING" => Ok(Phase::Rewinding),
            "SPIN" | "SPINNING" => Ok(Phase::Spinning),
            other => Err(WheelError::UnknownPhase(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Rewind,
    Spin,
}

/// One linear interpolation from `start_angle` to `target`.
///
/// `elapsed_base_ms` is the part of the phase already played before this run
/// was started, so resumed runs keep reporting phase-relative time.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub kind: RunKind,
    pub start_angle: f32,
    pub target: f32,
    pub duration_ms: i64,
    pub delay_ms: i64,
    pub elapsed_base_ms: i64,
    played_ms: i64,
}

impl Run {
    pub fn new(kind: RunKind, start_angle: f32, target: f32, duration_ms: i64) -> Self {
        Self {
            kind,
            start_angle,
            target,
            duration_ms,
            delay_ms: 0,
            elapsed_base_ms: 0,
            played_ms: 0,
        }
    }

    pub fn with_delay(mut self, delay_ms: i64) -> Self {
        self.delay_ms = delay_ms.max(0);
        self
    }

    pub fn resumed_at(mut self, elapsed_ms: i64) -> Self {
        self.elapsed_base_ms = elapsed_ms.max(0);
        self
    }

    /// Time spent in the phase, including whatever was played before a resume.
    pub fn elapsed_ms(&self) -> i64 {
        self.elapsed_base_ms + self.played_ms.min(self.duration_ms.max(0))
    }

    pub fn is_finished(&self) -> bool {
        self.delay_ms <= 0 && self.played_ms >= self.duration_ms
    }

    pub fn angle(&self) -> f32 {
        if self.is_finished() {
            return self.target;
        }
        let progress = self.played_ms as f32 / self.duration_ms as f32;
        self.start_angle + (self.target - self.start_angle) * progress
    }
}

/// A single tick of the running animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub kind: RunKind,
    pub angle: f32,
    pub elapsed_ms: i64,
    /// Set on the last frame of a run; no further frames follow for it.
    pub completed: bool,
}

/// Drives at most one [`Run`] at a time. Time only moves through
/// [`AnimationEngine::advance`], so a frame scheduler or a test decides the
/// tick granularity.
#[derive(Debug, Default)]
pub struct AnimationEngine {
    run: Option<Run>,
}

impl AnimationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any active run without completing it.
    pub fn start(&mut self, run: Run) {
        self.run = Some(run);
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Drops the active run. No completion frame is produced for it.
    pub fn cancel(&mut self) -> Option<Run> {
        self.run.take()
    }

    /// Moves the active run forward by `delta_ms`. Negative deltas count as
    /// zero. A run whose remaining duration is zero or negative completes on
    /// the first advance after its delay.
    pub fn advance(&mut self, delta_ms: i64) -> Option<Frame> {
        let run = self.run.as_mut()?;
        let mut delta = delta_ms.max(0);

        if run.delay_ms > 0 {
            let consumed = delta.min(run.delay_ms);
            run.delay_ms -= consumed;
            delta -= consumed;
            if run.delay_ms > 0 {
                return Some(Frame {
                    kind: run.kind,
                    angle: run.start_angle,
                    elapsed_ms: run.elapsed_ms(),
                    completed: false,
                });
            }
        }

        run.played_ms = run.played_ms.saturating_add(delta);
        let frame = Frame {
            kind: run.kind,
            angle: run.angle(),
            elapsed_ms: run.elapsed_ms(),
            completed: run.is_finished(),
        };
        if frame.completed {
            self.run = None;
        }
        Some(frame)
    }
}

/// Source of terminal angles for spin runs.
pub trait SpinTargetSource {
    fn next_target(&mut self, range: RangeInclusive<u32>) -> f32;
}

/// Uniform integer targets drawn from any `rand` generator.
pub struct RandomTargets<R>(pub R);

impl RandomTargets<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl<R: Rng> SpinTargetSource for RandomTargets<R> {
    fn next_target(&mut self, range: RangeInclusive<u32>) -> f32 {
        self.0.gen_range(range) as f32
    }
}

/// Always lands on the same angle, regardless of range.
#[derive(Debug, Clone, Copy)]
pub struct FixedTarget(pub f32);

impl SpinTargetSource for FixedTarget {
    fn next_target(&mut self, _range: RangeInclusive<u32>) -> f32 {
        self.0
    }
}
