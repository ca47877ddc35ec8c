//! # Voxel World Entry Point
//!
//! Runs the headless streaming demo from the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json]
//! ```

fn main() -> Result<(), voxel_world::ConfigError> {
    voxel_world::run()
}
