pub mod color_map;
pub mod console;
pub mod emulator;
pub mod inputs;
pub mod renderer;
pub mod vram;
