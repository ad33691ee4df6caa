pub mod binding;
pub mod oscillator;
pub mod sequence;
