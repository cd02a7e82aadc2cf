//! Adapter implementations for the port traits.

pub mod capturing;
pub mod live;
pub mod recording;
pub mod replaying;
