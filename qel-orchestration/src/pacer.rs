//! Ritmo de execução dos ticks em tempo de parede
//!
//! A simulação avança por tempo lógico; o pacer só decide quanto esperar
//! entre um tick e outro quando ela roda ao vivo.

use std::time::{Duration, Instant};
use serde::{Deserialize, Serialize};

/// Modo de ritmo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PacingMode {
    /// Um tick por intervalo de relógio
    RealTime,
    /// Sem espera: roda o mais rápido possível
    #[default]
    BestEffort,
}

/// Configuração do pacer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacerConfig {
    pub mode: PacingMode,
}

/// Controla o intervalo entre ticks
#[derive(Debug)]
pub struct TickPacer {
    interval: Duration,
    mode: PacingMode,
    last_tick: Option<Instant>,
    tick_count: u64,
    late_ticks: u64,
    total_execution_time: Duration,
    min_execution_time: Option<Duration>,
    max_execution_time: Option<Duration>,
}

impl TickPacer {
    /// Cria novo pacer
    pub fn new(interval: Duration, mode: PacingMode) -> Self {
        Self {
            interval,
            mode,
            last_tick: None,
            tick_count: 0,
            late_ticks: 0,
            total_execution_time: Duration::ZERO,
            min_execution_time: None,
            max_execution_time: None,
        }
    }

    /// Pacer sem espera
    pub fn best_effort() -> Self {
        Self::new(Duration::ZERO, PacingMode::BestEffort)
    }

    /// Intervalo alvo entre ticks
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn mode(&self) -> PacingMode {
        self.mode
    }

    /// Aguarda até o próximo tick
    pub fn wait_for_next_tick(&mut self) -> TickInfo {
        let now = Instant::now();
        let mut waited = Duration::ZERO;
        let mut on_time = true;

        if self.mode == PacingMode::RealTime {
            if let Some(last) = self.last_tick {
                let elapsed = now.duration_since(last);
                if elapsed < self.interval {
                    waited = self.interval - elapsed;
                    std::thread::sleep(waited);
                } else if elapsed > self.interval * 2 {
                    on_time = false;
                    self.late_ticks += 1;
                    tracing::warn!(?elapsed, interval = ?self.interval, "tick running late");
                }
            }
        }

        self.last_tick = Some(Instant::now());
        self.tick_count += 1;

        TickInfo {
            tick_number: self.tick_count,
            waited,
            on_time,
        }
    }

    /// Registra tempo de execução de um tick
    pub fn record_execution_time(&mut self, duration: Duration) {
        self.total_execution_time += duration;
        self.min_execution_time = Some(self.min_execution_time.map_or(duration, |d| d.min(duration)));
        self.max_execution_time = Some(self.max_execution_time.map_or(duration, |d| d.max(duration)));
    }

    /// Estatísticas acumuladas
    pub fn stats(&self) -> PacerStats {
        let avg_execution_time = match u32::try_from(self.tick_count) {
            Ok(count) if count > 0 => self.total_execution_time / count,
            _ => Duration::ZERO,
        };

        PacerStats {
            tick_count: self.tick_count,
            late_ticks: self.late_ticks,
            avg_execution_time,
            min_execution_time: self.min_execution_time.unwrap_or(Duration::ZERO),
            max_execution_time: self.max_execution_time.unwrap_or(Duration::ZERO),
        }
    }

    /// Zera contadores
    pub fn reset(&mut self) {
        self.last_tick = None;
        self.tick_count = 0;
        self.late_ticks = 0;
        self.total_execution_time = Duration::ZERO;
        self.min_execution_time = None;
        self.max_execution_time = None;
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn late_ticks(&self) -> u64 {
        self.late_ticks
    }
}

/// Informações sobre um tick
#[derive(Debug, Clone, Copy)]
pub struct TickInfo {
    pub tick_number: u64,
    /// Tempo dormido antes do tick
    pub waited: Duration,
    /// Tick dentro do intervalo esperado
    pub on_time: bool,
}

/// Estatísticas do pacer
#[derive(Debug, Clone)]
pub struct PacerStats {
    pub tick_count: u64,
    pub late_ticks: u64,
    pub avg_execution_time: Duration,
    pub min_execution_time: Duration,
    pub max_execution_time: Duration,
}

impl Default for TickPacer {
    fn default() -> Self {
        Self::best_effort()
    }
}
