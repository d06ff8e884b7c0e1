//! Sensor de presença por andar
//!
//! O despacho só lê o estado atual de cada andar. A origem das leituras fica
//! atrás de [`PresenceSource`]: [`SimulatedPresence`] gera um feed aleatório
//! e [`FixedPresence`] mantém leituras fixas para testes.

use std::collections::BTreeMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::config::BuildingConfig;
use crate::types::{ConfidenceMap, LocationId, Millis, PresenceSnapshot};

/// Confiança após pressionar o botão de chamada
pub const TRIGGER_CONFIDENCE: f64 = 0.95;
/// Confiança de um override manual com presença
pub const FORCED_PRESENT_CONFIDENCE: f64 = 0.9;
/// Confiança de um override manual sem presença
pub const FORCED_ABSENT_CONFIDENCE: f64 = 0.1;

/// Fonte de leituras de presença, atualizada ao menos uma vez por tick
pub trait PresenceSource {
    /// Leitura de um andar
    fn snapshot(&self, location: LocationId) -> Option<PresenceSnapshot>;

    /// Leituras de todos os andares
    fn snapshots(&self) -> Vec<PresenceSnapshot>;

    /// Eleva a confiança após uma chamada
    fn trigger_elevated(&mut self, location: LocationId, now: Millis);

    /// Override manual do estado detectado
    fn force_state(&mut self, location: LocationId, detected: bool, now: Millis);

    /// Atualiza as leituras para o tick atual
    fn refresh(&mut self, now: Millis);

    /// Volta ao estado inicial (nenhuma presença)
    fn reinitialize(&mut self, now: Millis);

    /// Confiança por andar
    fn confidence_map(&self) -> ConfidenceMap {
        self.snapshots()
            .into_iter()
            .map(|s| (s.location, s.confidence))
            .collect()
    }
}

fn absent_readings(building: &BuildingConfig, now: Millis) -> BTreeMap<LocationId, PresenceSnapshot> {
    building
        .floors()
        .map(|floor| (floor, PresenceSnapshot::absent(floor, now)))
        .collect()
}

fn set_reading(
    readings: &mut BTreeMap<LocationId, PresenceSnapshot>,
    location: LocationId,
    detected: bool,
    confidence: f64,
    now: Millis,
) {
    if let Some(reading) = readings.get_mut(&location) {
        reading.detected = detected;
        reading.confidence = confidence;
        reading.last_update = now;
    }
}

// =============================================================================
// Simulador
// =============================================================================

/// Feed sintético de presença.
///
/// A cada refresh:
/// - andar detectado há menos de `sticky_window_ms` continua detectado com
///   probabilidade 0.7 (confiança 0.8–1.0);
/// - caso contrário detecta com 0.3 nas extremidades e 0.15 nos demais
///   andares (confiança 0.6–1.0 se detectado, 0–0.3 se não).
#[derive(Debug, Clone)]
pub struct SimulatedPresence<R: Rng = StdRng> {
    building: BuildingConfig,
    readings: BTreeMap<LocationId, PresenceSnapshot>,
    rng: R,
    sticky_window_ms: Millis,
    refresh_count: u64,
}

impl SimulatedPresence<StdRng> {
    /// Cria com semente fixa
    pub fn seeded(building: BuildingConfig, seed: u64) -> Self {
        Self::with_rng(building, StdRng::seed_from_u64(seed))
    }

    /// Cria com semente do sistema
    pub fn from_entropy(building: BuildingConfig) -> Self {
        Self::with_rng(building, StdRng::from_entropy())
    }
}

impl<R: Rng> SimulatedPresence<R> {
    /// Cria com gerador fornecido
    pub fn with_rng(building: BuildingConfig, rng: R) -> Self {
        Self {
            readings: absent_readings(&building, 0),
            building,
            rng,
            sticky_window_ms: 5000,
            refresh_count: 0,
        }
    }

    /// Número de refreshes desde a criação
    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    fn sample(&mut self, previous: PresenceSnapshot, now: Millis) -> PresenceSnapshot {
        let roll: f64 = self.rng.gen_range(0.0..1.0);
        let recent = now.saturating_sub(previous.last_update) < self.sticky_window_ms;

        let (detected, confidence) = if previous.detected && recent {
            let detected = roll < 0.7;
            let confidence = if detected { self.rng.gen_range(0.8..=1.0) } else { 0.0 };
            (detected, confidence)
        } else {
            let base_chance = if self.building.is_edge(previous.location) { 0.3 } else { 0.15 };
            let detected = roll < base_chance;
            let confidence = if detected {
                self.rng.gen_range(0.6..=1.0)
            } else {
                self.rng.gen_range(0.0..0.3)
            };
            (detected, confidence)
        };

        PresenceSnapshot {
            location: previous.location,
            detected,
            confidence,
            last_update: now,
        }
    }
}

impl<R: Rng> PresenceSource for SimulatedPresence<R> {
    fn snapshot(&self, location: LocationId) -> Option<PresenceSnapshot> {
        self.readings.get(&location).copied()
    }

    fn snapshots(&self) -> Vec<PresenceSnapshot> {
        self.readings.values().copied().collect()
    }

    fn trigger_elevated(&mut self, location: LocationId, now: Millis) {
        set_reading(&mut self.readings, location, true, TRIGGER_CONFIDENCE, now);
    }

    fn force_state(&mut self, location: LocationId, detected: bool, now: Millis) {
        let confidence = if detected { FORCED_PRESENT_CONFIDENCE } else { FORCED_ABSENT_CONFIDENCE };
        set_reading(&mut self.readings, location, detected, confidence, now);
    }

    fn refresh(&mut self, now: Millis) {
        let previous: Vec<PresenceSnapshot> = self.readings.values().copied().collect();
        for reading in previous {
            let next = self.sample(reading, now);
            self.readings.insert(next.location, next);
        }
        self.refresh_count += 1;
        tracing::trace!(refresh = self.refresh_count, "presence feed refreshed");
    }

    fn reinitialize(&mut self, now: Millis) {
        self.readings = absent_readings(&self.building, now);
        self.refresh_count = 0;
    }
}

// =============================================================================
// Fixture determinística
// =============================================================================

/// Leituras fixas: `refresh` não altera nada, só os overrides mudam o estado
#[derive(Debug, Clone)]
pub struct FixedPresence {
    building: BuildingConfig,
    readings: BTreeMap<LocationId, PresenceSnapshot>,
}

impl FixedPresence {
    /// Todos os andares sem presença
    pub fn new(building: BuildingConfig) -> Self {
        Self {
            readings: absent_readings(&building, 0),
            building,
        }
    }

    /// Define uma leitura
    pub fn set(&mut self, location: LocationId, detected: bool, confidence: f64) {
        let last_update = self.readings.get(&location).map(|r| r.last_update).unwrap_or(0);
        self.readings.insert(
            location,
            PresenceSnapshot { location, detected, confidence, last_update },
        );
    }

    /// Builder de [`FixedPresence::set`]
    pub fn with(mut self, location: LocationId, detected: bool, confidence: f64) -> Self {
        self.set(location, detected, confidence);
        self
    }
}

impl Default for FixedPresence {
    fn default() -> Self {
        Self::new(BuildingConfig::default())
    }
}

impl PresenceSource for FixedPresence {
    fn snapshot(&self, location: LocationId) -> Option<PresenceSnapshot> {
        self.readings.get(&location).copied()
    }

    fn snapshots(&self) -> Vec<PresenceSnapshot> {
        self.readings.values().copied().collect()
    }

    fn trigger_elevated(&mut self, location: LocationId, now: Millis) {
        set_reading(&mut self.readings, location, true, TRIGGER_CONFIDENCE, now);
    }

    fn force_state(&mut self, location: LocationId, detected: bool, now: Millis) {
        let confidence = if detected { FORCED_PRESENT_CONFIDENCE } else { FORCED_ABSENT_CONFIDENCE };
        set_reading(&mut self.readings, location, detected, confidence, now);
    }

    fn refresh(&mut self, _now: Millis) {}

    fn reinitialize(&mut self, now: Millis) {
        self.readings = absent_readings(&self.building, now);
    }
}
