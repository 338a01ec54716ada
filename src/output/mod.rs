//! Writing rendered pages to disk in bounded-size chunk files.

mod chunk_writer;
mod summary;

pub use chunk_writer::{ChunkInfo, ChunkWriter};
pub use summary::write_summary;
