//! Relógio lógico

use qel_dispatch::Millis;

/// Tempo lógico em ms, avançado um intervalo por tick. Nunca volta atrás.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalClock {
    interval_ms: Millis,
    now_ms: Millis,
    ticks: u64,
}

impl LogicalClock {
    pub fn new(interval_ms: Millis) -> Self {
        Self {
            interval_ms,
            now_ms: 0,
            ticks: 0,
        }
    }

    /// Avança um tick e retorna o novo instante
    pub fn advance(&mut self) -> Millis {
        self.now_ms += self.interval_ms;
        self.ticks += 1;
        self.now_ms
    }

    pub fn now(&self) -> Millis {
        self.now_ms
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn interval_ms(&self) -> Millis {
        self.interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance() {
        let mut clock = LogicalClock::new(1000);
        assert_eq!(clock.interval_ms(), 1000);
        assert_eq!(clock.now(), 0);
        assert_eq!(clock.advance(), 1000);
        assert_eq!(clock.advance(), 2000);
        assert_eq!(clock.ticks(), 2);
    }
}
