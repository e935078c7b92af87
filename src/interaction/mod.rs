/// Autoplay Scheduler.
pub mod autoplay;
/// Drag/Inertia Controller.
pub mod drag;
