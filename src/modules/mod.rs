// Module exports for pure logic
pub mod controller;   // Intent state machine
pub mod navigation;   // Href normalization
pub mod registry;     // Tab list logic + persistence round-trips
pub mod render;       // NodeSpec projection of the strip
