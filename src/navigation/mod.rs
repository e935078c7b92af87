/// `Navigate` trait with loop and finite implementations.
pub mod navigator;
/// The single mutable navigation state.
pub mod state;
