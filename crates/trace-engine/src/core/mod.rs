pub mod sampler;
pub mod stroke_path;
pub mod timers;
