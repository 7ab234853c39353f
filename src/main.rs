//! # Voxel World Entry Point
//!
//! Generates and meshes a world headless, logging what it did.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- world.json
//! ```

fn main() {
    voxel_world::run();
}
