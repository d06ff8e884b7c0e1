//! # 🎭 qel-orchestration — Simulação do Elevador Quântico
//!
//! Junta o registrador quântico, o registro de chamadas, as políticas de
//! despacho, o movimento e o sensor de presença em um único laço dirigido
//! por um relógio lógico.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  ElevatorSimulation                         │
//! │  ┌───────────────────────────────────────────────────────┐  │
//! │  │            tick()                                     │  │
//! │  │  Presence → Registry → Motion → Dispatch             │  │
//! │  └───────────────────────────────────────────────────────┘  │
//! │  ┌──────────────────────┐   ┌────────────────────────────┐  │
//! │  │  QuantumRegister     │   │  EventLog (≤ 25)           │  │
//! │  │  H | X | Y | Z | CNOT│   │  Info | Quantum | Sensor   │  │
//! │  └──────────────────────┘   └────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//!            ↑ TickPacer (tempo real | best effort)
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qel_orchestration::*;
//! use qel_dispatch::FixedPresence;
//!
//! let config = SimulationConfig::default();
//! let presence = FixedPresence::new(config.building.clone());
//! let mut sim = ElevatorSimulation::with_presence(config, presence).unwrap();
//!
//! sim.submit_request(3).unwrap();
//! sim.tick();
//! assert!(sim.motion_state().is_moving);
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod pacer;
pub mod simulation;

pub use clock::LogicalClock;
pub use config::SimulationConfig;
pub use error::{OrchestrationError, OrchestrationResult};
pub use events::{DEFAULT_LOG_CAPACITY, EventKind, EventLog, LogEntry, MAX_LOG_CAPACITY};
pub use pacer::{PacerConfig, PacerStats, PacingMode, TickInfo, TickPacer};
pub use simulation::{ElevatorSimulation, SimulationSnapshot, TickReport};

#[cfg(test)]
mod tests;
