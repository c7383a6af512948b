//! Cooperative easing of the orbit toward drag targets.
//!
//! The scheduler never blocks: it records when the next tick is due and the
//! frame loop polls it. Each tick moves every targeted channel a fixed share
//! of the remaining distance and re-arms itself until all channels are within
//! tolerance.

use crate::config::EditorConfig;
use crate::orbit::OrbitState;
use std::time::Duration;

/// Values a drag asks the orbit to settle on. `None` channels are left alone.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitTarget {
    pub semi_major_axis: Option<f64>,
    pub eccentricity: Option<f64>,
    pub inclination_deg: Option<f64>,
}

impl OrbitTarget {
    pub fn shape(semi_major_axis: f64, eccentricity: f64) -> Self {
        Self { semi_major_axis: Some(semi_major_axis), eccentricity: Some(eccentricity), inclination_deg: None }
    }

    pub fn inclination(inclination_deg: f64) -> Self {
        Self { inclination_deg: Some(inclination_deg), ..Self::default() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickState {
    Idle,
    /// A tick is due at `due` seconds on the frame clock.
    Pending { due: f64 },
}

#[derive(Clone, Debug)]
pub struct SmoothingScheduler {
    tick: TickState,
    target: OrbitTarget,
    easing_ratio: f64,
    interval: Duration,
    axis_tolerance: f64,
    eccentricity_tolerance: f64,
    inclination_tolerance_deg: f64,
    ticks_run: u64,
}

fn ease(current: f64, target: f64, ratio: f64) -> f64 {
    current + (target - current) * ratio
}

impl SmoothingScheduler {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            tick: TickState::Idle,
            target: OrbitTarget::default(),
            easing_ratio: config.easing_ratio,
            interval: config.tick_interval,
            axis_tolerance: config.axis_tolerance,
            eccentricity_tolerance: config.eccentricity_tolerance,
            inclination_tolerance_deg: config.inclination_tolerance_deg,
            ticks_run: 0,
        }
    }

    pub fn tick_state(&self) -> TickState {
        self.tick
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.tick_state(), TickState::Pending { .. })
    }

    pub fn ticks_run(&self) -> u64 {
        self.ticks_run
    }

    /// Replaces the target (last write wins) and makes sure a tick is pending.
    pub fn retarget(&mut self, target: OrbitTarget, now: f64) {
        self.target = target;
        self.schedule(now);
    }

    /// Arms the next tick. Returns false when one was already pending, in
    /// which case its deadline is left untouched.
    pub fn schedule(&mut self, now: f64) -> bool {
        match self.tick {
            TickState::Pending { .. } => false,
            TickState::Idle => {
                self.tick = TickState::Pending { due: now + self.interval.as_secs_f64() };
                true
            }
        }
    }

    pub fn time_until_due(&self, now: f64) -> Option<Duration> {
        match self.tick {
            TickState::Idle => None,
            TickState::Pending { due } => Some(Duration::from_secs_f64((due - now).max(0.0))),
        }
    }

    /// Runs the pending tick if its deadline has passed. Returns true when
    /// `state` was stepped, so the caller re-renders and syncs its fields.
    pub fn poll(&mut self, now: f64, state: &mut OrbitState) -> bool {
        match self.tick {
            TickState::Pending { due } if now >= due => {
                self.tick = TickState::Idle;
                self.step(state);
                if !self.has_converged(state) {
                    self.schedule(now);
                }
                true
            }
            _ => false,
        }
    }

    fn step(&mut self, state: &mut OrbitState) {
        let ratio = self.easing_ratio;
        if let Some(a) = self.target.semi_major_axis {
            state.set_semi_major_axis(ease(state.semi_major_axis(), a, ratio));
        }
        if let Some(e) = self.target.eccentricity {
            state.set_eccentricity(ease(state.eccentricity(), e, ratio));
        }
        if let Some(i) = self.target.inclination_deg {
            state.set_inclination_deg(ease(state.inclination_deg(), i, ratio));
        }
        self.ticks_run += 1;
    }

    pub fn has_converged(&self, state: &OrbitState) -> bool {
        let within = |current: f64, target: Option<f64>, tol: f64| target.map_or(true, |t| (current - t).abs() <= tol);
        within(state.semi_major_axis(), self.target.semi_major_axis, self.axis_tolerance)
            && within(state.eccentricity(), self.target.eccentricity, self.eccentricity_tolerance)
            && within(state.inclination_deg(), self.target.inclination_deg, self.inclination_tolerance_deg)
    }
}
