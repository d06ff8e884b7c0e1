//! # 🛗 qel-dispatch — Despacho do Elevador
//!
//! Registro de chamadas com expiração, políticas de seleção (FCFS e custo),
//! máquina de estados do movimento e a interface do sensor de presença.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   PresenceSource                            │
//! │        SimulatedPresence | FixedPresence                   │
//! └──────────────────────────┬──────────────────────────────────┘
//!                            ↓ snapshots / confidence
//! ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │ RequestRegistry  │ → │  DispatchPolicy  │ → │ MotionController │
//! │ timeout | grace  │   │  FCFS | Cost     │   │ Idle→Moving→Open │
//! └──────────────────┘   └──────────────────┘   └──────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qel_dispatch::*;
//!
//! let building = BuildingConfig::default();
//! let mut presence = FixedPresence::new(building.clone());
//! let mut registry = RequestRegistry::new(RegistryConfig::default(), building);
//! let mut motion = MotionController::new(1, MotionConfig::default());
//!
//! registry.submit(4, 0, &mut presence).unwrap();
//!
//! let confidence = presence.confidence_map();
//! let next = DispatchPolicy::CostBased
//!     .select(registry.active_requests(), motion.position(), &confidence)
//!     .cloned()
//!     .unwrap();
//!
//! registry.remove(&next.id);
//! motion.dispatch(next.location);
//! assert!(motion.state().is_moving);
//! ```

pub mod config;
pub mod error;
pub mod motion;
pub mod policy;
pub mod presence;
pub mod registry;
pub mod types;

pub use config::{BuildingConfig, MAX_FLOORS, MotionConfig, RegistryConfig};
pub use error::{DispatchError, DispatchResult};
pub use motion::{DispatchOutcome, ElevatorMotionState, MotionController, MotionEvent, MotionPhase};
pub use policy::{DispatchPolicy, cost_based, dispatch_cost, fcfs};
pub use presence::{FixedPresence, PresenceSource, SimulatedPresence};
pub use registry::{Expiry, ExpiryReason, FloorRequest, RequestRegistry};
pub use types::{ConfidenceMap, Direction, LocationId, Millis, PresenceSnapshot, RequestId};
