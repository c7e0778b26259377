//! Command parsing and types for the OM tracker protocol.
//!
//! This module contains command-specific parsing logic and type
//! definitions for the uplink reports sent by OM lock trackers.

pub mod command_code;
pub mod heartbeat;
pub mod lock;
pub mod position;
pub mod signin;
pub mod update;

pub use command_code::{CommandCode, CommandFamily};
pub use heartbeat::Heartbeat;
pub use lock::LockEvent;
pub use position::{
    FixStatus, LatitudeHemisphere, LongitudeHemisphere, PositionMode, PositionReport,
};
pub use signin::SignInReport;
pub use update::UpdateReport;

// Re-export types from lockwire-core for convenience
pub use lockwire_core::{BatteryVoltage, TrackerTimestamp};
