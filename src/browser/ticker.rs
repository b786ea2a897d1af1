use gloo_timers::callback::Interval;

use crate::model::countdown::Ticker;

/// `setInterval`-backed ticker calling `on_tick` every period.
pub struct IntervalTicker {
    on_tick: fn(),
}

impl IntervalTicker {
    pub fn new(on_tick: fn()) -> Self {
        Self { on_tick }
    }
}

impl Ticker for IntervalTicker {
    type Handle = Interval;

    fn start(&mut self, period_ms: u32) -> Interval {
        Interval::new(period_ms, self.on_tick)
    }

    fn cancel(&mut self, handle: Interval) {
        // The interval may be cancelled from inside its own callback (expiry
        // stops the engine), and a closure must not be freed while it runs.
        let callback = handle.cancel();
        wasm_bindgen_futures::spawn_local(async move {
            drop(callback);
        });
    }
}
