//! Lantern server library (router and handlers, used by the binary and
//! integration tests).

pub mod gateway;
