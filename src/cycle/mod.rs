//! Thermal calculation of the working cycle.
//!
//! The cycle runs from the intake BDC (-180 CA deg) to the expansion BDC (+180 CA deg)
//! in four phases, each one seeded by the last state of the previous phase:
//! intake state, polytropic compression up to ignition, Vibe combustion and
//! polytropic expansion.
pub mod combustion;
pub mod intake;
pub mod kinematics;
pub mod performance;
pub mod point;
pub mod polytropic;
pub mod simulator;

pub use intake::{BoostState, IntakeState};
pub use performance::{EffectiveParameters, IndicatedParameters};
pub use point::{CombustionPoint, CyclePoint};
pub use simulator::{CycleResult, CycleSimulator};
