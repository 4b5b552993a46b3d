//! Huffman compression for UTF-8 text files.
//!
//! Symbols are Unicode scalar values, so multi-byte text round-trips exactly.
//!
//! ```no_run
//! text_huffman::compress("input.txt", "input.huff")?;
//! text_huffman::decompress("input.huff", "restored.txt")?;
//! # Ok::<(), text_huffman::CodecError>(())
//! ```

pub mod bits;
pub mod code_table;
pub mod coding;
pub mod container;
mod error;
mod file_codec;
pub mod frequency;
pub mod tree;

pub use bits::{pack, unpack, BitString, PackedBits};
pub use code_table::CodeTable;
pub use coding::{decode, encode};
pub use container::CompressedContainer;
pub use error::{CodecError, Result};
pub use file_codec::{
    compress, compress_text, compress_with_report, decompress, decompress_bytes,
    CompressionReport,
};
pub use frequency::FrequencyTable;
pub use tree::{HuffmanNode, HuffmanTree};
