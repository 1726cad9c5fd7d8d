use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const MAX_ATTEMPTS: usize = 5;
const WINDOW: Duration = Duration::from_secs(900);

/// Failed sign-in attempts per client address. The backend owns the
/// credential store; this only keeps a single browser from hammering it
/// through the login form.
#[derive(Clone)]
pub struct LoginThrottle {
    attempts: Arc<Mutex<HashMap<IpAddr, Vec<Instant>>>>,
    max_attempts: usize,
    window: Duration,
}

impl Default for LoginThrottle {
    fn default() -> Self {
        Self::with_limits(MAX_ATTEMPTS, WINDOW)
    }
}

impl LoginThrottle {
    pub fn with_limits(max_attempts: usize, window: Duration) -> Self {
        Self {
            attempts: Arc::new(Mutex::new(HashMap::new())),
            max_attempts,
            window,
        }
    }

    /// True once `ip` has reached the attempt limit inside the window.
    /// Stale entries for `ip` are dropped on the way.
    pub fn is_blocked(&self, ip: IpAddr) -> bool {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        let Some(cutoff) = Instant::now().checked_sub(self.window) else {
            return map.get(&ip).is_some_and(|t| t.len() >= self.max_attempts);
        };
        match map.get_mut(&ip) {
            Some(timestamps) => {
                timestamps.retain(|t| *t > cutoff);
                timestamps.len() >= self.max_attempts
            }
            None => false,
        }
    }

    /// Record a rejected sign-in (bad credentials reported by the backend).
    /// Addresses whose latest failure has left the window are forgotten.
    pub fn record_failure(&self, ip: IpAddr) {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(cutoff) = Instant::now().checked_sub(self.window) {
            map.retain(|_, timestamps| timestamps.last().is_some_and(|t| *t > cutoff));
        }
        map.entry(ip).or_default().push(Instant::now());
    }

    /// Number of addresses currently tracked.
    pub fn tracked(&self) -> usize {
        self.attempts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn clear(&self, ip: IpAddr) {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(&ip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const IP: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    #[test]
    fn test_blocks_after_limit() {
        let throttle = LoginThrottle::with_limits(2, Duration::from_secs(60));
        assert!(!throttle.is_blocked(IP));
        throttle.record_failure(IP);
        assert!(!throttle.is_blocked(IP));
        throttle.record_failure(IP);
        assert!(throttle.is_blocked(IP));

        let other = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
        assert!(!throttle.is_blocked(other));
    }

    #[test]
    fn test_clear_resets() {
        let throttle = LoginThrottle::with_limits(1, Duration::from_secs(60));
        throttle.record_failure(IP);
        assert!(throttle.is_blocked(IP));
        throttle.clear(IP);
        assert!(!throttle.is_blocked(IP));
    }

    #[test]
    fn test_stale_addresses_are_forgotten() {
        let throttle = LoginThrottle::with_limits(5, Duration::from_millis(1));
        for last in 1..=3 {
            throttle.record_failure(IpAddr::V4(Ipv4Addr::new(10, 0, 0, last)));
        }
        std::thread::sleep(Duration::from_millis(5));
        throttle.record_failure(IP);
        assert_eq!(throttle.tracked(), 1);
    }

    #[test]
    fn test_attempts_expire() {
        let throttle = LoginThrottle::with_limits(1, Duration::from_millis(1));
        throttle.record_failure(IP);
        std::thread::sleep(Duration::from_millis(5));
        assert!(!throttle.is_blocked(IP));
    }
}
