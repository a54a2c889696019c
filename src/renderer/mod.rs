//! Rendering support
//!
//! The cage is drawn by the host; this module only packs snapshots into
//! GPU-ready instance data.

pub mod instance;

pub use instance::{BallInstance, build_instances, instance_bytes};
