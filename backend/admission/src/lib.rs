//! CamGate Admission
//!
//! The admission gate allows exactly one successful admission per camera key
//! per rolling window and rejects every other attempt until the window
//! elapses. Two interchangeable stores implement the gate: an in-process map
//! for single-instance deployments and a Redis-backed store whose atomic
//! set-if-absent-with-TTL primitive shares admission state across instances.
//! The store is selected once at startup, never per call.

pub mod clock;
pub mod distributed;
pub mod gate;
pub mod local;

pub use clock::{Clock, ManualClock, SystemClock};
pub use distributed::{AdmissionBackend, BackendError, DistributedAdmissionStore, RedisBackend};
pub use gate::AdmissionGate;
pub use local::LocalAdmissionStore;
