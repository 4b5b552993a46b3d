use std::path::Path;

use log::info;

use crate::container::CompressedContainer;
use crate::error::Result;

/// Summary of a finished compression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionReport {
    pub input_bytes: usize,
    pub output_bytes: usize,
    pub distinct_symbols: usize,
    pub payload_bits: usize,
}

impl CompressionReport {
    /// Output size as a fraction of the input size; 0 for empty input.
    pub fn ratio(&self) -> f64 {
        match self.input_bytes {
            0 => 0.0,
            n => self.output_bytes as f64 / n as f64,
        }
    }
}

pub fn compress_text(text: &str) -> Result<Vec<u8>> {
    CompressedContainer::from_text(text)?.to_bytes()
}

pub fn decompress_bytes(data: &[u8]) -> Result<String> {
    CompressedContainer::from_bytes(data)?.decode_text()
}

pub fn compress<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<()> {
    compress_with_report(input, output).map(|_| ())
}

pub fn compress_with_report<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
) -> Result<CompressionReport> {
    let (input, output) = (input.as_ref(), output.as_ref());

    let text = String::from_utf8(std::fs::read(input)?)?;
    let container = CompressedContainer::from_text(&text)?;
    let bytes = container.to_bytes()?;
    std::fs::write(output, &bytes)?;

    let report = CompressionReport {
        input_bytes: text.len(),
        output_bytes: bytes.len(),
        distinct_symbols: container.frequencies.len(),
        payload_bits: container.packed.bytes.len() * 8 - container.packed.padding as usize,
    };
    info!(
        "compressed {} ({} bytes) to {} ({} bytes)",
        input.display(),
        report.input_bytes,
        output.display(),
        report.output_bytes
    );
    Ok(report)
}

pub fn decompress<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<()> {
    let (input, output) = (input.as_ref(), output.as_ref());

    let data = std::fs::read(input)?;
    let text = decompress_bytes(&data)?;
    std::fs::write(output, text.as_bytes())?;

    info!(
        "decompressed {} ({} bytes) to {} ({} bytes)",
        input.display(),
        data.len(),
        output.display(),
        text.len()
    );
    Ok(())
}
