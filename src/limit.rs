use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

pub const LOGIN_WINDOW: Duration = Duration::from_secs(15 * 60);
pub const LOGIN_MAX_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: Instant,
}

/// Fixed-window attempt counter keyed by client.
#[derive(Debug, Clone)]
pub struct LoginLimiter {
    max_attempts: u32,
    window: Duration,
    windows: Arc<Mutex<HashMap<String, Window>>>,
}

impl Default for LoginLimiter {
    fn default() -> Self {
        Self::new(LOGIN_MAX_ATTEMPTS, LOGIN_WINDOW)
    }
}

impl LoginLimiter {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
            windows: Arc::default(),
        }
    }

    /// Records an attempt and reports whether it is allowed.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut windows = self.windows.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        windows.retain(|_, window| window.reset_at > now);

        let entry = windows.entry(key.to_owned()).or_insert(Window {
            count: 0,
            reset_at: now + self.window,
        });

        if entry.count >= self.max_attempts {
            return false;
        }
        entry.count += 1;
        true
    }
}
