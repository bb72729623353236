use rand::rngs::StdRng;
use rand::Rng;

use crate::error::CoreError;
use crate::resolve::Resolution;
use crate::resolver::{SpinResolver, SpinTicket};
use crate::scheduler::Scheduler;
use crate::wheel::WheelConfig;

/// A resolver wired to a scheduler: spinning arms the timer, the timer's
/// ticket comes back through [`SpinSession::on_ticket`].
pub struct SpinSession<S: Scheduler, R = StdRng> {
    resolver: SpinResolver<R>,
    scheduler: S,
}

impl<S: Scheduler, R: Rng> SpinSession<S, R> {
    pub fn new(resolver: SpinResolver<R>, scheduler: S) -> Self {
        Self {
            resolver,
            scheduler,
        }
    }

    pub fn resolver(&self) -> &SpinResolver<R> {
        &self.resolver
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Start a spin and arm its resolution. Returns false if the wheel was
    /// already spinning.
    pub fn spin(&mut self) -> bool {
        match self.resolver.spin() {
            Some(ticket) => {
                self.scheduler.schedule(ticket);
                true
            }
            None => false,
        }
    }

    /// Called by the control loop when a scheduled ticket is delivered.
    pub fn on_ticket(&mut self, ticket: &SpinTicket) -> Option<Resolution> {
        self.resolver.resolve(ticket)
    }

    pub fn reconfigure(&mut self, config: WheelConfig) -> Result<(), CoreError> {
        self.resolver.reconfigure(config)?;
        self.scheduler.cancel();
        Ok(())
    }

    /// Tear down: nothing pending survives.
    pub fn cancel(&mut self) {
        self.scheduler.cancel();
        self.resolver.cancel();
    }
}
