use alloc::rc::Rc;
use core::cell::Cell as Shared;

/// Something that can invoke [`Engine::tick`](crate::Engine::tick) once per second.
///
/// The returned handle owns the periodic callback; dropping it must cancel the
/// callback so it never fires again.
pub trait TickSource {
    type Handle;

    fn start_ticking(&mut self) -> Self::Handle;
}

/// Headless tick source for tests and callers that drive ticks themselves.
///
/// It schedules nothing, but tracks how many handles are alive so the one-timer
/// rule can be observed.
#[derive(Clone, Debug, Default)]
pub struct ManualTicks {
    live: Rc<Shared<usize>>,
    started: Rc<Shared<usize>>,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles started and not yet dropped.
    pub fn live_timers(&self) -> usize {
        self.live.get()
    }

    pub fn started_timers(&self) -> usize {
        self.started.get()
    }
}

impl TickSource for ManualTicks {
    type Handle = ManualTickHandle;

    fn start_ticking(&mut self) -> Self::Handle {
        self.live.set(self.live.get() + 1);
        self.started.set(self.started.get() + 1);
        ManualTickHandle {
            live: Rc::clone(&self.live),
        }
    }
}

#[derive(Debug)]
pub struct ManualTickHandle {
    live: Rc<Shared<usize>>,
}

impl Drop for ManualTickHandle {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_the_handle_cancels() {
        let mut ticks = ManualTicks::new();
        let observer = ticks.clone();

        let first = ticks.start_ticking();
        let second = ticks.start_ticking();
        assert_eq!(observer.live_timers(), 2);

        drop(first);
        assert_eq!(observer.live_timers(), 1);
        drop(second);
        assert_eq!(observer.live_timers(), 0);
        assert_eq!(observer.started_timers(), 2);
    }
}
