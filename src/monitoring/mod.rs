/*!
 * Monitoring Module
 * Subscriber setup for the crate's structured `tracing` events
 */

mod tracer;

pub use tracer::init_tracing;
