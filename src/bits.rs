use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::error::{CodecError, Result};

/// A logical sequence of bits, written and parsed as a string of '0'/'1'.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn extend_from(&mut self, other: &BitString) {
        self.bits.extend_from_slice(&other.bits);
    }

    pub fn starts_with(&self, prefix: &BitString) -> bool {
        self.bits.starts_with(&prefix.bits)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromStr for BitString {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        let bits = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(CodecError::decode(format!("Invalid bit character {c:?}"))),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { bits })
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Packed payload bytes plus the number of filler bits at the end of the
/// last byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedBits {
    pub bytes: Vec<u8>,
    pub padding: u8,
}

pub fn pack(bits: &BitString) -> Result<PackedBits> {
    let padding = ((8 - bits.len() % 8) % 8) as u8;

    let mut writer = BitWriter::endian(Vec::with_capacity(bits.len() / 8 + 1), BigEndian);
    for bit in bits.iter() {
        writer.write_bit(bit)?;
    }
    // Pads the final byte with zeros on its low end
    writer.byte_align()?;

    Ok(PackedBits {
        bytes: writer.into_writer(),
        padding,
    })
}

pub fn unpack(packed: &PackedBits) -> Result<BitString> {
    let PackedBits { bytes, padding } = packed;
    let padding = *padding as usize;

    if padding > 7 {
        return Err(CodecError::decode(format!(
            "Padding count {padding} out of range"
        )));
    }
    if bytes.is_empty() && padding != 0 {
        return Err(CodecError::decode(format!(
            "Padding count {padding} with an empty payload"
        )));
    }

    let bit_count = bytes.len() * 8 - padding;
    let mut reader = BitReader::endian(Cursor::new(bytes), BigEndian);
    let mut bits = Vec::with_capacity(bit_count);
    for _ in 0..bit_count {
        bits.push(reader.read_bit()?);
    }

    Ok(BitString { bits })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitString {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(bits("0110").to_string(), "0110");
        assert_eq!(bits("").len(), 0);
        assert!("01x".parse::<BitString>().is_err());
    }

    #[test]
    fn test_exact_bytes() {
        let packed = pack(&bits("10101010")).unwrap();
        assert_eq!(packed.bytes, vec![0xAA]);
        assert_eq!(packed.padding, 0);
        assert_eq!(unpack(&packed).unwrap(), bits("10101010"));
    }

    #[test]
    fn test_partial_byte() {
        let packed = pack(&bits("101")).unwrap();
        assert_eq!(packed.bytes, vec![0b1010_0000]);
        assert_eq!(packed.padding, 5);
        assert_eq!(unpack(&packed).unwrap(), bits("101"));
    }

    #[test]
    fn test_multiple_bytes() {
        let packed = pack(&bits("1010101011110000")).unwrap();
        assert_eq!(packed.bytes, vec![0xAA, 0xF0]);
        assert_eq!(packed.padding, 0);
        assert_eq!(unpack(&packed).unwrap(), bits("1010101011110000"));
    }

    #[test]
    fn test_empty_bits() {
        let packed = pack(&BitString::new()).unwrap();
        assert!(packed.bytes.is_empty());
        assert_eq!(packed.padding, 0);
        assert_eq!(unpack(&packed).unwrap(), BitString::new());
    }

    #[test]
    fn test_round_trip_all_lengths() {
        let pattern = "1101001110001011011";
        for len in 0..=pattern.len() {
            let original = bits(&pattern[..len]);
            let packed = pack(&original).unwrap();
            assert_eq!(packed.bytes.len(), (len + 7) / 8);
            assert_eq!(unpack(&packed).unwrap(), original);
        }
    }

    #[test]
    fn test_bad_padding() {
        let packed = PackedBits {
            bytes: vec![0xFF],
            padding: 8,
        };
        assert!(matches!(unpack(&packed), Err(CodecError::Decode(_))));

        let packed = PackedBits {
            bytes: vec![],
            padding: 3,
        };
        assert!(matches!(unpack(&packed), Err(CodecError::Decode(_))));
    }
}
