pub mod lpf;

pub use lpf::LPF;
