//! Warp overlay sequencing: enter fade, hold, exit fade.
//!
//! Phase changes are deadlines polled once per frame. A zero-length phase
//! completes within the same poll, so reduced-motion timings still emit
//! every signal in order.

use crate::api::config::WarpConfig;
use crate::api::types::WarpTheme;
use crate::core::timer::OneShot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarpPhase {
    Idle,
    Entering,
    Holding,
    Exiting,
}

impl WarpPhase {
    /// Wire code for the frame header.
    pub fn code(self) -> f32 {
        match self {
            WarpPhase::Idle => 0.0,
            WarpPhase::Entering => 1.0,
            WarpPhase::Holding => 2.0,
            WarpPhase::Exiting => 3.0,
        }
    }
}

/// What triggered the warp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarpCause {
    /// The intro start action. Reveals the stage when the enter fade ends.
    Intro,
    /// A ship flight. Visual accompaniment only.
    Flight,
}

/// Transitions reported by [`WarpController::tick`], in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarpSignal {
    /// Enter fade finished on an intro warp: hide intro, show the stage.
    RevealStage,
    /// Hold finished: drop the starfield to cruise and begin the exit fade.
    Cruise,
    /// Overlay fully hidden.
    Hidden,
}

pub struct WarpController {
    config: WarpConfig,
    phase: WarpPhase,
    theme: WarpTheme,
    cause: WarpCause,
    timer: OneShot,
    phase_started_ms: f64,
}

impl WarpController {
    pub fn new(config: &WarpConfig) -> Self {
        Self {
            config: config.clone(),
            phase: WarpPhase::Idle,
            theme: WarpTheme::default(),
            cause: WarpCause::Flight,
            timer: OneShot::new(),
            phase_started_ms: 0.0,
        }
    }

    pub fn phase(&self) -> WarpPhase {
        self.phase
    }

    pub fn theme(&self) -> WarpTheme {
        self.theme
    }

    pub fn cause(&self) -> WarpCause {
        self.cause
    }

    pub fn is_active(&self) -> bool {
        self.phase != WarpPhase::Idle
    }

    /// Begin (or restart) the full sequence with a new tint.
    pub fn start(&mut self, now_ms: f64, theme: WarpTheme, cause: WarpCause) {
        if self.is_active() {
            log::debug!("warp: restarting from {:?}", self.phase);
        }
        self.theme = theme;
        self.cause = cause;
        self.enter(WarpPhase::Entering, now_ms, self.config.enter_ms);
        log::info!("warp: {:?} started ({:?})", cause, theme);
    }

    fn enter(&mut self, phase: WarpPhase, at_ms: f64, duration_ms: f64) {
        self.phase = phase;
        self.phase_started_ms = at_ms;
        if phase == WarpPhase::Idle {
            self.timer.cancel();
        } else {
            self.timer.arm(at_ms, duration_ms);
        }
    }

    fn phase_duration(&self) -> f64 {
        match self.phase {
            WarpPhase::Idle => 0.0,
            WarpPhase::Entering => self.config.enter_ms,
            WarpPhase::Holding => self.config.hold_ms,
            WarpPhase::Exiting => self.config.exit_ms,
        }
    }

    /// Fraction of the current phase elapsed, 0..1.
    pub fn progress(&self, now_ms: f64) -> f32 {
        let duration = self.phase_duration();
        if self.phase == WarpPhase::Idle || duration <= 0.0 {
            return 0.0;
        }
        ((now_ms - self.phase_started_ms) / duration).clamp(0.0, 1.0) as f32
    }

    /// Advance due phases, appending the resulting signals to `out`.
    pub fn tick(&mut self, now_ms: f64, out: &mut Vec<WarpSignal>) {
        while self.timer.fire(now_ms) {
            // Chain from the scheduled deadline so late frames do not stretch phases.
            let due = self.phase_started_ms + self.phase_duration();
            match self.phase {
                WarpPhase::Entering => {
                    if self.cause == WarpCause::Intro {
                        out.push(WarpSignal::RevealStage);
                    }
                    self.enter(WarpPhase::Holding, due, self.config.hold_ms);
                }
                WarpPhase::Holding => {
                    out.push(WarpSignal::Cruise);
                    self.enter(WarpPhase::Exiting, due, self.config.exit_ms);
                }
                WarpPhase::Exiting => {
                    out.push(WarpSignal::Hidden);
                    self.enter(WarpPhase::Idle, due, 0.0);
                    log::debug!("warp: hidden");
                }
                WarpPhase::Idle => break,
            }
        }
    }
}
