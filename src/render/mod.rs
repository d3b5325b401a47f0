pub mod sink;

pub use sink::WgpuSink;
