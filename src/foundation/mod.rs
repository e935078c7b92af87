/// Shared enums and value types.
pub mod core;
/// Error taxonomy.
pub mod error;
/// Wrap-around time math.
pub mod math;
