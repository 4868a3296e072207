//! Per-sample sinks driven by the relay loop

mod publish;
mod status;

pub use publish::PublishSink;
pub use status::{StatusSink, DEFAULT_RENDER_INTERVAL};
