//! Simulação: um laço cooperativo dirigido pelo relógio lógico

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use qel_dispatch::{
    DispatchOutcome, DispatchPolicy, ElevatorMotionState, Expiry, ExpiryReason, FloorRequest,
    LocationId, Millis, MotionController, MotionEvent, PresenceSnapshot, PresenceSource,
    RequestId, RequestRegistry, SimulatedPresence,
};
use qel_quantum::{GateOp, QuantumRegister};
use crate::clock::LogicalClock;
use crate::config::SimulationConfig;
use crate::error::OrchestrationResult;
use crate::events::{EventKind, EventLog, LogEntry};
use crate::pacer::TickPacer;

/// Mistura aplicada à semente da medição; o sensor usa a semente original
const MEASUREMENT_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Semente do gerador de medição derivada da semente da configuração
pub(crate) fn measurement_seed(seed: u64) -> u64 {
    seed ^ MEASUREMENT_SEED_MIX
}

/// O que aconteceu em um tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub now: Millis,
    /// Chamadas removidas por timeout ou abandono
    pub expired: Vec<Expiry>,
    pub motion: Option<MotionEvent>,
    /// Chamada escolhida pela política neste tick
    pub dispatched: Option<FloorRequest>,
}

/// Visão completa para consumidores
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSnapshot {
    pub tick: u64,
    pub now_ms: Millis,
    pub policy: DispatchPolicy,
    pub motion: ElevatorMotionState,
    pub requests: Vec<FloorRequest>,
    pub presence: Vec<PresenceSnapshot>,
    pub probabilities: Vec<f64>,
    pub gates: Vec<GateOp>,
    pub log: Vec<LogEntry>,
}

/// Simulação do elevador com registrador quântico
///
/// Dono de todos os motores. Cada [`tick`](Self::tick) executa, nesta ordem:
/// refresh do sensor, expiração das chamadas, passo do movimento e, se o
/// elevador estiver livre, despacho da próxima chamada.
#[derive(Debug)]
pub struct ElevatorSimulation<P: PresenceSource = SimulatedPresence> {
    config: SimulationConfig,
    clock: LogicalClock,
    registry: RequestRegistry,
    motion: MotionController,
    policy: DispatchPolicy,
    presence: P,
    register: QuantumRegister,
    rng: StdRng,
    log: EventLog,
}

impl ElevatorSimulation<SimulatedPresence> {
    /// Cria com o sensor simulado
    pub fn new(config: SimulationConfig) -> OrchestrationResult<Self> {
        let presence = match config.seed {
            Some(seed) => SimulatedPresence::seeded(config.building.clone(), seed),
            None => SimulatedPresence::from_entropy(config.building.clone()),
        };
        Self::with_presence(config, presence)
    }
}

impl<P: PresenceSource> ElevatorSimulation<P> {
    /// Cria com uma fonte de presença qualquer
    pub fn with_presence(config: SimulationConfig, presence: P) -> OrchestrationResult<Self> {
        config.validate()?;

        let register = QuantumRegister::new(config.qubits)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(measurement_seed(seed)),
            None => StdRng::from_entropy(),
        };

        tracing::debug!(
            floors = ?config.building.floors(),
            qubits = config.qubits,
            policy = %config.policy,
            "simulation created"
        );

        Ok(Self {
            clock: LogicalClock::new(config.tick_interval_ms),
            registry: RequestRegistry::new(config.registry.clone(), config.building.clone()),
            motion: MotionController::new(config.building.home_floor, config.motion.clone()),
            policy: config.policy,
            log: EventLog::with_capacity(config.log_capacity),
            presence,
            register,
            rng,
            config,
        })
    }

    // =========================================================================
    // Ações do usuário
    // =========================================================================

    /// Registra uma chamada no andar
    pub fn submit_request(&mut self, location: LocationId) -> OrchestrationResult<RequestId> {
        let now = self.clock.now();

        match self.registry.submit(location, now, &mut self.presence) {
            Ok(id) => {
                self.log.push(now, EventKind::Info, format!("Call received from Floor {}", location));
                self.log.push(
                    now,
                    EventKind::Sensor,
                    format!("Sensor: Enhanced detection triggered at Floor {}", location),
                );
                Ok(id)
            }
            Err(err) => {
                self.log.push(now, EventKind::Warning, err.to_string());
                Err(err.into())
            }
        }
    }

    /// Troca a política de despacho
    pub fn select_policy(&mut self, policy: DispatchPolicy) {
        self.policy = policy;
        self.log.push(
            self.clock.now(),
            EventKind::Info,
            format!("Dispatch policy set to {}", policy),
        );
    }

    /// Aplica uma porta ao registrador. Porta inválida não altera o estado.
    pub fn apply_gate(&mut self, op: GateOp) -> OrchestrationResult<()> {
        let now = self.clock.now();

        if let Err(err) = self.register.apply(op) {
            self.log.push(now, EventKind::Warning, format!("Gate {} rejected: {}", op, err));
            return Err(err.into());
        }

        self.log.push(now, EventKind::Quantum, format!("Applied {} gate: {}", op.kind, op));
        Ok(())
    }

    /// Mede e colapsa o registrador
    pub fn measure(&mut self) -> usize {
        let outcome = self.register.measure_with(&mut self.rng);
        let label = self.register.basis_label(outcome);
        self.log.push(
            self.clock.now(),
            EventKind::Quantum,
            format!("Measurement collapsed to {}", label),
        );
        outcome
    }

    /// Volta o registrador para |0…0⟩
    pub fn reset_circuit(&mut self) {
        self.register.reset();
        self.log.push(self.clock.now(), EventKind::Quantum, "Quantum circuit reset");
    }

    /// Reset completo: chamadas, movimento, sensor e log.
    ///
    /// O relógio continua e o registrador quântico não é tocado.
    pub fn reset(&mut self) {
        let now = self.clock.now();

        self.registry.clear();
        self.motion.reset();
        self.presence.reinitialize(now);
        self.log.clear();
        self.log.push(now, EventKind::Info, "Simulation reset - All systems reinitialized");
    }

    /// Inverte a presença detectada no andar. Retorna o novo estado.
    pub fn toggle_sensor_override(&mut self, location: LocationId) -> OrchestrationResult<bool> {
        let now = self.clock.now();
        self.config.building.check(location)?;

        let detected = !self.presence.snapshot(location).is_some_and(|s| s.detected);
        self.presence.force_state(location, detected, now);

        let state = if detected { "enabled" } else { "disabled" };
        self.log.push(
            now,
            EventKind::Sensor,
            format!("Manual override: Presence {} at Floor {}", state, location),
        );
        Ok(detected)
    }

    // =========================================================================
    // Laço
    // =========================================================================

    /// Avança um tick
    pub fn tick(&mut self) -> TickReport {
        let now = self.clock.advance();
        let tick = self.clock.ticks();

        // 1. Sensor
        self.presence.refresh(now);
        let snapshots = self.presence.snapshots();

        // 2. Expiração
        let expired = self.registry.tick(&snapshots);
        for expiry in &expired {
            self.log_expiry(now, expiry);
        }

        // 3. Movimento
        let motion = self.motion.step(now);
        match motion {
            Some(MotionEvent::Moved { position, direction }) => {
                tracing::debug!(position, %direction, "elevator moved");
            }
            Some(MotionEvent::Arrived { position }) => {
                self.log.push(
                    now,
                    EventKind::Success,
                    format!("Arrived at Floor {} - Doors opening", position),
                );
            }
            Some(MotionEvent::DoorsClosed { position }) => {
                self.log.push(
                    now,
                    EventKind::Info,
                    format!("Floor {} service complete - Doors closed", position),
                );
            }
            None => {}
        }

        // 4. Despacho
        let dispatched = if self.motion.is_idle() && !self.registry.is_empty() {
            self.dispatch_next(now)
        } else {
            None
        };

        TickReport { tick, now, expired, motion, dispatched }
    }

    /// Roda `ticks` ticks no ritmo do pacer, chamando `on_tick` após cada um
    pub fn run<F>(&mut self, ticks: u64, pacer: &mut TickPacer, mut on_tick: F)
    where
        F: FnMut(&mut Self, &TickReport),
    {
        for _ in 0..ticks {
            let info = pacer.wait_for_next_tick();
            tracing::trace!(
                tick = info.tick_number,
                waited = ?info.waited,
                on_time = info.on_time,
                "tick paced"
            );
            let started = std::time::Instant::now();
            let report = self.tick();
            pacer.record_execution_time(started.elapsed());
            on_tick(self, &report);
        }
    }

    fn log_expiry(&mut self, now: Millis, expiry: &Expiry) {
        let location = expiry.request.location;
        match expiry.reason {
            ExpiryReason::Timeout => self.log.push(
                now,
                EventKind::Quantum,
                format!("Request at Floor {} timed out (quantum collapse)", location),
            ),
            ExpiryReason::Abandoned => self.log.push(
                now,
                EventKind::Presence,
                format!("Request at Floor {} collapsed (no person detected)", location),
            ),
        }
    }

    fn dispatch_next(&mut self, now: Millis) -> Option<FloorRequest> {
        let confidence = self.presence.confidence_map();
        let next = self
            .policy
            .select(self.registry.active_requests(), self.motion.position(), &confidence)
            .cloned()?;

        self.registry.remove(&next.id);
        self.log.push(
            now,
            EventKind::Quantum,
            format!("Next destination: Floor {} ({})", next.location, self.policy),
        );

        match self.motion.dispatch(next.location) {
            DispatchOutcome::Started { target, direction } => {
                tracing::info!(target, %direction, "dispatch started");
                self.log.push(
                    now,
                    EventKind::Quantum,
                    format!("{} routing: Moving to Floor {}", self.policy, target),
                );
            }
            DispatchOutcome::AlreadyAtTarget => {
                self.log.push(
                    now,
                    EventKind::Info,
                    format!("Already at Floor {} - Request served", next.location),
                );
            }
            DispatchOutcome::Busy => {
                tracing::debug!(location = next.location, "dispatch ignored while busy");
            }
        }

        Some(next)
    }

    // =========================================================================
    // Visões
    // =========================================================================

    pub fn motion_state(&self) -> ElevatorMotionState {
        self.motion.state()
    }

    /// Chamadas ativas em ordem de chegada
    pub fn active_requests(&self) -> &[FloorRequest] {
        self.registry.active_requests()
    }

    /// Probabilidades das bases
    pub fn probabilities(&self) -> Vec<f64> {
        self.register.probabilities()
    }

    pub fn register(&self) -> &QuantumRegister {
        &self.register
    }

    /// Log, mais recente primeiro
    pub fn logs(&self) -> &EventLog {
        &self.log
    }

    pub fn presence(&self) -> &P {
        &self.presence
    }

    /// Acesso ao sensor (ex.: fixtures em testes)
    pub fn presence_mut(&mut self) -> &mut P {
        &mut self.presence
    }

    pub fn presence_snapshots(&self) -> Vec<PresenceSnapshot> {
        self.presence.snapshots()
    }

    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Tempo lógico atual (ms)
    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    pub fn tick_count(&self) -> u64 {
        self.clock.ticks()
    }

    /// Fotografia serializável do estado
    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            tick: self.clock.ticks(),
            now_ms: self.clock.now(),
            policy: self.policy,
            motion: self.motion.state(),
            requests: self.registry.active_requests().to_vec(),
            presence: self.presence.snapshots(),
            probabilities: self.register.probabilities(),
            gates: self.register.history().to_vec(),
            log: self.log.to_vec(),
        }
    }
}
