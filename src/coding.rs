use crate::bits::BitString;
use crate::code_table::CodeTable;
use crate::error::{CodecError, Result};
use crate::tree::{HuffmanNode, HuffmanTree};

pub fn encode(text: &str, codes: &CodeTable) -> Result<BitString> {
    let mut bits = BitString::new();
    for symbol in text.chars() {
        let code = codes.get(symbol).ok_or(CodecError::MissingCode(symbol))?;
        bits.extend_from(code);
    }
    Ok(bits)
}

/// Walks `tree` once per symbol. Every bit must be consumed by a complete
/// path; leftover bits mean the stream was damaged.
pub fn decode(bits: &BitString, tree: Option<&HuffmanTree>) -> Result<String> {
    match tree {
        None if bits.is_empty() => Ok(String::new()),
        None => Err(CodecError::CorruptBitstream {
            trailing_bits: bits.len(),
        }),
        Some(HuffmanTree::Single(leaf)) => decode_single(bits, leaf),
        Some(HuffmanTree::Branching(root)) => decode_branching(bits, root),
    }
}

fn decode_single(bits: &BitString, leaf: &HuffmanNode) -> Result<String> {
    let symbol = match leaf {
        HuffmanNode::Leaf { symbol, .. } => *symbol,
        // A single-symbol tree with branches has no valid path for any bit
        HuffmanNode::Internal { .. } if bits.is_empty() => return Ok(String::new()),
        HuffmanNode::Internal { .. } => {
            return Err(CodecError::CorruptBitstream {
                trailing_bits: bits.len(),
            })
        }
    };

    let mut output = String::with_capacity(bits.len());
    for (position, bit) in bits.iter().enumerate() {
        if bit {
            return Err(CodecError::CorruptBitstream {
                trailing_bits: bits.len() - position,
            });
        }
        output.push(symbol);
    }
    Ok(output)
}

fn decode_branching(bits: &BitString, root: &HuffmanNode) -> Result<String> {
    let mut output = String::new();
    let mut current = root;
    let mut pending = 0;

    for bit in bits.iter() {
        if let HuffmanNode::Internal { left, right, .. } = current {
            current = if bit { right } else { left };
            pending += 1;
        }

        if let HuffmanNode::Leaf { symbol, .. } = current {
            output.push(*symbol);
            current = root;
            pending = 0;
        }
    }

    if pending > 0 {
        return Err(CodecError::CorruptBitstream {
            trailing_bits: pending,
        });
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;

    fn round_trip(text: &str) -> String {
        let tree = HuffmanTree::build(&FrequencyTable::from_text(text));
        let codes = CodeTable::from_tree(tree.as_ref());
        let encoded = encode(text, &codes).unwrap();
        decode(&encoded, tree.as_ref()).unwrap()
    }

    #[test]
    fn test_round_trip_simple() {
        assert_eq!(round_trip("hello"), "hello");
    }

    #[test]
    fn test_round_trip_complex() {
        let text = "The quick brown fox jumps over the lazy dog!";
        assert_eq!(round_trip(text), text);
    }

    #[test]
    fn test_round_trip_unicode() {
        let text = "Hello, 世界! 🌍";
        assert_eq!(round_trip(text), text);
    }

    #[test]
    fn test_round_trip_single_symbol() {
        assert_eq!(round_trip("zzzzzz"), "zzzzzz");
    }

    #[test]
    fn test_empty_string() {
        let tree = HuffmanTree::build(&FrequencyTable::from_text(""));
        assert!(tree.is_none());
        assert_eq!(decode(&BitString::new(), None).unwrap(), "");
        assert_eq!(encode("", &CodeTable::from_tree(None)).unwrap(), BitString::new());
    }

    #[test]
    fn test_encode_concatenates_codes() {
        let freq = [('a', 1), ('b', 2)].into_iter().collect::<FrequencyTable>();
        let tree = HuffmanTree::build(&freq);
        let codes = CodeTable::from_tree(tree.as_ref());
        assert_eq!(encode("abba", &codes).unwrap().to_string(), "0110");
    }

    #[test]
    fn test_missing_code() {
        let tree = HuffmanTree::build(&FrequencyTable::from_text("ab"));
        let codes = CodeTable::from_tree(tree.as_ref());
        assert!(matches!(
            encode("abc", &codes),
            Err(CodecError::MissingCode('c'))
        ));
    }

    #[test]
    fn test_trailing_bits_are_corrupt() {
        let freq = [('a', 1), ('b', 1), ('c', 2)]
            .into_iter()
            .collect::<FrequencyTable>();
        let tree = HuffmanTree::build(&freq);
        let codes = CodeTable::from_tree(tree.as_ref());
        // 'a' and 'b' sit at depth two, so a lone half of their path is incomplete
        let half = codes.get('a').unwrap().to_string()[..1].to_string();
        let bits = format!("{}{}", codes.get('c').unwrap(), half)
            .parse::<BitString>()
            .unwrap();

        assert!(matches!(
            decode(&bits, tree.as_ref()),
            Err(CodecError::CorruptBitstream { trailing_bits: 1 })
        ));
    }

    #[test]
    fn test_single_tree_with_branches_is_rejected() {
        let tree = HuffmanTree::Single(HuffmanNode::merge(
            HuffmanNode::leaf('a', 1),
            HuffmanNode::leaf('b', 1),
        ));
        let bits = "01".parse::<BitString>().unwrap();
        assert!(matches!(
            decode(&bits, Some(&tree)),
            Err(CodecError::CorruptBitstream { trailing_bits: 2 })
        ));
    }

    #[test]
    fn test_bits_without_tree_are_corrupt() {
        let bits = "010".parse::<BitString>().unwrap();
        assert!(matches!(
            decode(&bits, None),
            Err(CodecError::CorruptBitstream { trailing_bits: 3 })
        ));
    }

    #[test]
    fn test_single_symbol_rejects_one_bit() {
        let tree = HuffmanTree::build(&FrequencyTable::from_text("aa"));
        let bits = "0010".parse::<BitString>().unwrap();
        assert!(matches!(
            decode(&bits, tree.as_ref()),
            Err(CodecError::CorruptBitstream { trailing_bits: 2 })
        ));
    }
}
