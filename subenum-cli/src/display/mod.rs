mod progress;
mod spinner;

pub use progress::ProgressWriterFactory;
pub use spinner::FanOutProgress;
