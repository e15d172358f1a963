//! Bench simulator for the EZ-Bake thermal/humidity chamber.
//!
//! Stands in for the physical chamber while its controller firmware is
//! developed: speaks the chamber's TCODE serial protocol on one side and
//! runs a believable thermal model on the other.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │   StdioLink                LogIndicator                      │
//! │   (SerialLink)             (StatusIndicator)                 │
//! │                                                              │
//! │   ─────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │   ┌──────────────┐   ProcessState   ┌───────────────────┐    │
//! │   │ LineSession  │◀──(mutex-shared)─▶│ ThermalEngine     │    │
//! │   │ parser +     │                  │ hysteresis modes, │    │
//! │   │ interpreter  │                  │ delayed switching │    │
//! │   └──────────────┘                  └───────────────────┘    │
//! │     event-driven                       fixed 100 ms period   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two activities run as independent threads for the process lifetime.
//! The session owns setpoint writes; the engine owns readings, actuator
//! flags, mode, and alarm.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod buildinfo;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;
pub mod tcode;
