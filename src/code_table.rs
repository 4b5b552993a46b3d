use std::collections::BTreeMap;

use crate::bits::BitString;
use crate::tree::{HuffmanNode, HuffmanTree};

/// Prefix code derived from a tree: `0` for a left edge, `1` for a right one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<char, BitString>,
}

impl CodeTable {
    pub fn from_tree(tree: Option<&HuffmanTree>) -> Self {
        let mut codes = BTreeMap::new();
        match tree {
            None => {}
            Some(HuffmanTree::Single(leaf)) => {
                collect_codes(leaf, BitString::from(vec![false]), &mut codes)
            }
            Some(HuffmanTree::Branching(root)) => collect_codes(root, BitString::new(), &mut codes),
        }
        Self { codes }
    }

    pub fn get(&self, symbol: char) -> Option<&BitString> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &BitString)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    pub fn is_prefix_free(&self) -> bool {
        let codes = self.codes.values().collect::<Vec<_>>();
        codes.iter().enumerate().all(|(i, a)| {
            codes[i + 1..]
                .iter()
                .all(|b| !a.starts_with(b) && !b.starts_with(a))
        })
    }
}

fn collect_codes(node: &HuffmanNode, prefix: BitString, codes: &mut BTreeMap<char, BitString>) {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            codes.insert(*symbol, prefix);
        }
        HuffmanNode::Internal { left, right, .. } => {
            let mut left_code = prefix.clone();
            left_code.push(false);
            collect_codes(left, left_code, codes);

            let mut right_code = prefix;
            right_code.push(true);
            collect_codes(right, right_code, codes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;

    fn codes_for(pairs: &[(char, u64)]) -> CodeTable {
        let freq = pairs.iter().copied().collect::<FrequencyTable>();
        CodeTable::from_tree(HuffmanTree::build(&freq).as_ref())
    }

    #[test]
    fn test_no_tree() {
        assert!(CodeTable::from_tree(None).is_empty());
    }

    #[test]
    fn test_single_symbol() {
        let codes = codes_for(&[('a', 5)]);
        assert_eq!(codes.len(), 1);
        assert_eq!(codes.get('a').unwrap().to_string(), "0");
    }

    #[test]
    fn test_two_symbols() {
        let codes = codes_for(&[('a', 1), ('b', 2)]);
        assert_eq!(codes.get('a').unwrap().to_string(), "0");
        assert_eq!(codes.get('b').unwrap().to_string(), "1");
    }

    #[test]
    fn test_prefix_property() {
        let codes = codes_for(&[('a', 5), ('b', 9), ('c', 12)]);
        assert_eq!(codes.len(), 3);
        assert!(codes.iter().all(|(_, code)| !code.is_empty()));
        assert!(codes.is_prefix_free());
    }

    #[test]
    fn test_frequent_symbols_get_shorter_codes() {
        let codes = codes_for(&[
            ('a', 5),
            ('b', 9),
            ('c', 12),
            ('d', 13),
            ('e', 16),
            ('f', 45),
        ]);
        assert!(codes.is_prefix_free());
        assert_eq!(codes.get('f').unwrap().len(), 1);
        assert_eq!(codes.get('a').unwrap().len(), 4);
        assert_eq!(codes.get('b').unwrap().len(), 4);
    }

    #[test]
    fn test_detects_prefix_clash() {
        let mut codes = BTreeMap::new();
        codes.insert('x', "01".parse().unwrap());
        codes.insert('y', "011".parse().unwrap());
        assert!(!CodeTable { codes }.is_prefix_free());
    }
}
