//! Adapter implementations

pub mod encoder;
pub mod presets;
pub mod sink;
pub mod structured;
pub mod timestamp;

pub use encoder::{Encoder, EncoderConfig, Encoding, LevelCase, SEVERITY_KEY};
pub use presets::{Kind, LoggerBuilder, OutputPath, PresetConfig, LEVEL_ENV, OUTPUT_ENV};
pub use sink::EncodedLog;
pub use structured::{new_dev_logger, new_logger, new_prod_logger, FatalHook, StructuredLogger};
pub use timestamp::TimestampFormat;
