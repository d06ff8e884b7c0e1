//! # ⚛️ qel-quantum — Registrador Quântico
//!
//! Simulação de vetor de estado para `n` qubits com as portas H, X, Y, Z e
//! CNOT, medição probabilística e colapso.
//!
//! ## Computational Complexity
//!
//! **Gate — O(2^n):** cada porta visita cada amplitude uma vez.
//!
//! **Measure — O(2^n):** soma acumulada linear seguida do colapso.
//!
//! **Memória:** `2^n × 16` bytes (`Complex64`). Com o limite de
//! [`MAX_QUBITS`] o vetor não passa de 256 MiB.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          QuantumRegister                        │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Amplitudes: Vec<Complex64> (2^n)         │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Gate kernels: H | X | Y | Z | CNOT       │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Measure → Collapse                       │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qel_quantum::{GateKind, GateOp, QuantumRegister};
//!
//! let mut reg = QuantumRegister::new(2).unwrap();
//! reg.apply(GateOp::single(GateKind::H, 0)).unwrap();
//! reg.apply(GateOp::cnot(0, 1)).unwrap();
//!
//! let probs = reg.probabilities();
//! assert!((probs[0] - 0.5).abs() < 1e-12);
//! assert!((probs[3] - 0.5).abs() < 1e-12);
//! ```

pub mod error;
pub mod gates;
pub mod state;

pub use error::{QuantumError, QuantumResult};
pub use gates::{GateKind, GateOp};
pub use num_complex::Complex64;
pub use state::{MAX_QUBITS, QuantumRegister, basis_label};
