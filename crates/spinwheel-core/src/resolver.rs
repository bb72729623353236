use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strum::Display;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::resolve::{resolve_winner, Resolution, Winner};
use crate::wheel::WheelConfig;

/// The two states of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SpinPhase {
    Idle,
    Spinning,
}

/// Observable snapshot of the wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinState {
    /// Total rotation accrued this session. Never wraps.
    pub cumulative_rotation_degrees: f64,
    pub is_spinning: bool,
    pub winner: Option<Winner>,
    pub winning_index: Option<usize>,
    pub spins_completed: u64,
}

impl SpinState {
    fn new() -> Self {
        Self {
            cumulative_rotation_degrees: 0.0,
            is_spinning: false,
            winner: None,
            winning_index: None,
            spins_completed: 0,
        }
    }

    pub fn phase(&self) -> SpinPhase {
        if self.is_spinning {
            SpinPhase::Spinning
        } else {
            SpinPhase::Idle
        }
    }
}

/// Authorises exactly one resolution. Only [`SpinResolver::spin`] creates these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinTicket {
    generation: u64,
    delay: Duration,
}

impl SpinTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// How long after the spin the resolution should fire.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Owns the wheel configuration and spin state, and turns tickets into winners.
pub struct SpinResolver<R = StdRng> {
    config: WheelConfig,
    state: SpinState,
    rng: R,
    generation: u64,
    pending: Option<u64>,
    publisher: watch::Sender<SpinState>,
}

impl SpinResolver<StdRng> {
    /// Create a resolver seeded from OS entropy.
    pub fn new(config: WheelConfig) -> Result<Self, CoreError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a resolver with a fixed seed for reproducible spins.
    pub fn seeded(config: WheelConfig, seed: u64) -> Result<Self, CoreError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SpinResolver<R> {
    pub fn with_rng(config: WheelConfig, rng: R) -> Result<Self, CoreError> {
        config.validate()?;
        let state = SpinState::new();
        let (publisher, _) = watch::channel(state.clone());
        Ok(Self {
            config,
            state,
            rng,
            generation: 0,
            pending: None,
            publisher,
        })
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn phase(&self) -> SpinPhase {
        self.state.phase()
    }

    /// Receive a fresh snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<SpinState> {
        self.publisher.subscribe()
    }

    /// Start a spin. Returns `None` while a spin is already in flight.
    pub fn spin(&mut self) -> Option<SpinTicket> {
        if self.state.is_spinning {
            debug!("Spin ignored: wheel is already spinning");
            return None;
        }

        let increment = self
            .rng
            .gen_range(self.config.min_spin_degrees..=self.config.max_spin_degrees);

        self.state.is_spinning = true;
        self.state.winner = None;
        self.state.winning_index = None;
        self.state.cumulative_rotation_degrees += increment;

        self.generation += 1;
        self.pending = Some(self.generation);

        info!(
            "Spin {} started: +{:.1} degrees (total {:.1})",
            self.generation, increment, self.state.cumulative_rotation_degrees
        );
        self.publish();

        Some(SpinTicket {
            generation: self.generation,
            delay: self.config.resolve_delay(),
        })
    }

    /// Complete the spin that issued `ticket`. Tickets from superseded or
    /// cancelled spins are ignored.
    pub fn resolve(&mut self, ticket: &SpinTicket) -> Option<Resolution> {
        if self.pending != Some(ticket.generation) {
            debug!("Stale resolution for spin {} ignored", ticket.generation);
            return None;
        }
        self.pending = None;

        let resolution = resolve_winner(&self.config, self.state.cumulative_rotation_degrees);

        self.state.winner = Some(resolution.winner.clone());
        self.state.winning_index = Some(resolution.index);
        self.state.is_spinning = false;
        self.state.spins_completed += 1;

        info!(
            "Spin {} resolved: segment {} -> {}",
            ticket.generation, resolution.index, resolution.winner
        );
        self.publish();

        Some(resolution)
    }

    /// Drop any pending resolution and return to idle without a winner.
    pub fn cancel(&mut self) {
        if let Some(generation) = self.pending.take() {
            debug!("Spin {} cancelled", generation);
        }
        if self.state.is_spinning {
            self.state.is_spinning = false;
            self.state.winner = None;
            self.state.winning_index = None;
            self.publish();
        }
    }

    /// Swap in a new wheel. Any spin in flight is cancelled; the accumulated
    /// rotation is kept so the wheel does not jump.
    pub fn reconfigure(&mut self, config: WheelConfig) -> Result<(), CoreError> {
        config.validate()?;
        self.cancel();
        self.config = config;
        self.state.winner = None;
        self.state.winning_index = None;
        info!("Wheel reconfigured with {} segments", self.config.segments.len());
        self.publish();
        Ok(())
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}
