//! On-disk layout, all integers big-endian:
//!
//! ```text
//! u32                 number of distinct symbols (n)
//! n * (u32, u64)      code point and frequency, ascending by code point
//! u8                  padding bits in the last payload byte (0-7)
//! [u8]                packed payload, to end of file
//! ```

use std::fmt::Display;

use binary_rw::{BinaryReader, BinaryWriter, Endian, MemoryStream, SliceStream};
use log::{debug, trace};

use crate::bits::{pack, unpack, PackedBits};
use crate::code_table::CodeTable;
use crate::coding::{decode, encode};
use crate::error::{CodecError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;

const COUNT_SIZE: u64 = 4;
const ENTRY_SIZE: u64 = 4 + 8;
const PADDING_SIZE: u64 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressedContainer {
    pub frequencies: FrequencyTable,
    pub packed: PackedBits,
}

impl CompressedContainer {
    pub fn from_text(text: &str) -> Result<Self> {
        let frequencies = FrequencyTable::from_text(text);
        let tree = HuffmanTree::build(&frequencies);
        let codes = CodeTable::from_tree(tree.as_ref());

        for (symbol, code) in codes.iter() {
            trace!("code {symbol:?} -> {code}");
        }

        let bits = encode(text, &codes)?;
        let packed = pack(&bits)?;
        debug!(
            "encoded {} symbols ({} distinct) into {} bits, padding {}",
            frequencies.total(),
            frequencies.len(),
            bits.len(),
            packed.padding
        );

        Ok(Self {
            frequencies,
            packed,
        })
    }

    pub fn decode_text(&self) -> Result<String> {
        check_symbol_total(&self.frequencies, &self.packed)?;

        let tree = HuffmanTree::build(&self.frequencies);
        let bits = unpack(&self.packed)?;
        let text = decode(&bits, tree.as_ref())?;

        let decoded = text.chars().count() as u64;
        if decoded != self.frequencies.total() {
            return Err(CodecError::decode(format!(
                "Payload decodes to {decoded} symbols, header declares {}",
                self.frequencies.total()
            )));
        }

        debug!("decoded {} bits into {decoded} symbols", bits.len());
        Ok(text)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut stream = MemoryStream::new();
        {
            let mut writer = BinaryWriter::new(&mut stream, Endian::Big);

            writer
                .write_u32(self.frequencies.len() as u32)
                .map_err(write_error)?;
            for (symbol, count) in self.frequencies.iter() {
                writer.write_u32(symbol as u32).map_err(write_error)?;
                writer.write_u64(count).map_err(write_error)?;
            }
            writer.write_u8(self.packed.padding).map_err(write_error)?;
            writer
                .write_bytes(&self.packed.bytes)
                .map_err(write_error)?;
        }

        Ok(stream.into())
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if (data.len() as u64) < COUNT_SIZE + PADDING_SIZE {
            return Err(CodecError::decode(format!(
                "Truncated header: {} byte(s)",
                data.len()
            )));
        }

        let mut stream = SliceStream::new(data);
        let mut reader = BinaryReader::new(&mut stream, Endian::Big);

        let symbol_count = reader.read_u32().map_err(read_error)?;
        let header_len = COUNT_SIZE + ENTRY_SIZE * symbol_count as u64 + PADDING_SIZE;
        if (data.len() as u64) < header_len {
            return Err(CodecError::decode(format!(
                "Truncated header: {symbol_count} symbol(s) need {header_len} bytes, file has {}",
                data.len()
            )));
        }

        let mut entries = Vec::with_capacity(symbol_count as usize);
        let mut previous = None;
        for _ in 0..symbol_count {
            let code_point = reader.read_u32().map_err(read_error)?;
            let count = reader.read_u64().map_err(read_error)?;

            let symbol = char::from_u32(code_point).ok_or_else(|| {
                CodecError::TextEncoding(format!("Invalid code point {code_point:#x}"))
            })?;
            if previous.map_or(false, |p| p >= symbol) {
                return Err(CodecError::decode(format!(
                    "Symbol {symbol:?} out of order or duplicated"
                )));
            }
            if count == 0 {
                return Err(CodecError::decode(format!(
                    "Symbol {symbol:?} stored with zero frequency"
                )));
            }

            previous = Some(symbol);
            entries.push((symbol, count));
        }

        let padding = reader.read_u8().map_err(read_error)?;
        if padding > 7 {
            return Err(CodecError::decode(format!(
                "Padding count {padding} out of range"
            )));
        }

        let bytes = data[header_len as usize..].to_vec();
        if symbol_count == 0 && (!bytes.is_empty() || padding != 0) {
            return Err(CodecError::decode(
                "Empty symbol table with a non-empty payload",
            ));
        }

        let frequencies: FrequencyTable = entries.into_iter().collect();
        let packed = PackedBits { bytes, padding };
        check_symbol_total(&frequencies, &packed)?;

        Ok(Self {
            frequencies,
            packed,
        })
    }
}

/// Every symbol costs at least one bit, so the declared total can never
/// exceed the payload's bit count.
fn check_symbol_total(frequencies: &FrequencyTable, packed: &PackedBits) -> Result<()> {
    let total = frequencies
        .checked_total()
        .ok_or_else(|| CodecError::decode("Symbol frequencies overflow a u64"))?;

    let payload_bits = (packed.bytes.len() as u64 * 8)
        .checked_sub(packed.padding as u64)
        .ok_or_else(|| {
            CodecError::decode(format!(
                "Padding count {} with an empty payload",
                packed.padding
            ))
        })?;

    if total > payload_bits {
        return Err(CodecError::decode(format!(
            "Header declares {total} symbols, payload holds only {payload_bits} bits"
        )));
    }
    Ok(())
}

fn read_error<E: Display>(e: E) -> CodecError {
    CodecError::decode(format!("Failed to read header: {e}"))
}

fn write_error<E: Display>(e: E) -> CodecError {
    CodecError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        e.to_string(),
    ))
}
