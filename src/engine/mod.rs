/// Inbound commands and outbound events.
pub mod command;
/// Resize Coordinator.
pub mod resize;
/// The single-owner engine state machine.
pub mod track;
