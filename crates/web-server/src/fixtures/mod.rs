//! Literal payloads served by the plan endpoints.
//!
//! The legacy and viewer builders are deliberately independent and share no
//! types.

pub mod legacy;
pub mod viewer;
