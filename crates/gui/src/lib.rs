// Library crate: renderer, host contract, settings and the headless harness.
// The eframe window glue stays in the binary crate.

pub mod harness;
pub mod host;
pub mod render;
pub mod state;
