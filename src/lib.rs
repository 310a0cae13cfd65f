// hd-tabs Library Entry Point
// This file exposes all modules so they can be imported by the demo shell
// and tested independently.

// Core modules
pub mod settings;
pub mod store;

// Shared state
pub mod state;

// Pure logic modules (no host imports)
pub mod modules;
