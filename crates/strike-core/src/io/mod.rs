pub mod image_sequence;
pub mod memory;
pub mod ser;
pub mod source;

pub use image_sequence::ImageSequenceSource;
pub use memory::MemorySource;
pub use ser::{SerReader, SerSource};
pub use source::{open_source, source_info, FrameSource};
