use std::time::{Duration, Instant};

/// Tick length used when a measured delta is unusable.
pub const FALLBACK_DT: f32 = 1.0 / 60.0;

/// Return `dt` if it is finite and strictly positive, otherwise [`FALLBACK_DT`].
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        FALLBACK_DT
    }
}

/// Measures wall-clock time between ticks and hands out sanitized deltas.
#[derive(Debug)]
pub struct FrameClock {
    last: Option<Instant>,
    timer: FrameTimer,
}

impl FrameClock {
    pub fn new(history: usize) -> Self {
        Self {
            last: None,
            timer: FrameTimer::new(history),
        }
    }

    /// Seconds since the previous call. The first call yields [`FALLBACK_DT`].
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Like [`tick`](Self::tick) with an explicit timestamp.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let raw = match self.last {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f32(),
            None => 0.0,
        };
        self.last = Some(now);
        let dt = sanitize_dt(raw);
        self.timer.record(Duration::from_secs_f32(dt));
        dt
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }
}

/// Rolling frame-time history.
#[derive(Debug)]
pub struct FrameTimer {
    history: Vec<Duration>,
    capacity: usize,
    index: usize,
    filled: bool,
}

impl FrameTimer {
    /// A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: vec![Duration::ZERO; capacity],
            capacity,
            index: 0,
            filled: false,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        self.history[self.index] = dt;
        self.index = (self.index + 1) % self.capacity;
        if self.index == 0 {
            self.filled = true;
        }
    }

    fn recorded(&self) -> &[Duration] {
        &self.history[..self.count()]
    }

    pub fn average(&self) -> Duration {
        let count = self.count();
        if count == 0 {
            return Duration::ZERO;
        }
        self.recorded().iter().sum::<Duration>() / count as u32
    }

    pub fn max(&self) -> Duration {
        self.recorded().iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.recorded().iter().copied().min().unwrap_or(Duration::ZERO)
    }

    pub fn count(&self) -> usize {
        if self.filled { self.capacity } else { self.index }
    }
}
