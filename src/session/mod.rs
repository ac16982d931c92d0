//! Asynchronous request/response boundary around the blur engine.

/// Background worker thread owning one backend.
pub mod worker;
