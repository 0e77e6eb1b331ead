// vim: set ai et ts=4 sts=4 sw=4:
use std::fmt;
use std::rc::Rc;
use std::collections::HashMap;
use log::debug;

use crate::config::ABSOLUTE_MAX_SIZE;
use crate::error::Error;
use crate::hint::HintKey;

/// One possible content of a line of up to 32 squares; bit `i` set means square `i` is filled.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone, Debug)]
pub struct LineContent(u32);

impl LineContent {
    pub fn from_bits(bits: u32) -> Self {
        LineContent(bits)
    }
    pub fn from_squares(filled: &[bool]) -> Self {
        LineContent(filled.iter()
                          .enumerate()
                          .filter(|(_, f)| **f)
                          .fold(0u32, |acc, (i, _)| acc | (1u32 << i)))
    }
    pub fn is_filled(&self, at: usize) -> bool {
        (self.0 >> at) & 1 == 1
    }

    /// Lengths of the maximal runs of filled squares, in order.
    pub fn signature(&self, length: usize) -> Signature {
        let mut runs = Vec::new();
        let mut current: u32 = 0;
        for at in 0..length {
            if self.is_filled(at) {
                current += 1;
            } else if current > 0 {
                runs.push(current);
                current = 0;
            }
        }
        if current > 0 {
            runs.push(current);
        }
        Signature(runs)
    }
}

/// Run-length sequence of a line. The all-empty line has the empty signature.
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct Signature(Vec<u32>);

impl Signature {
    pub fn new(lengths: Vec<u32>) -> Self {
        Signature(lengths)
    }
    pub fn empty() -> Self {
        Signature(Vec::new())
    }
    pub fn lengths(&self) -> &[u32] {
        &self.0
    }
}
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let parts = self.0.iter().map(|l| l.to_string()).collect::<Vec<_>>();
        write!(f, "[{}]", parts.join(","))
    }
}

/// Every line content of a fixed length, grouped by signature.
///
/// Building it enumerates all `2^length` contents once, so it is only sensible
/// for small lengths; `build` refuses anything above [`ABSOLUTE_MAX_SIZE`].
/// The index never changes after construction.
#[derive(Debug)]
pub struct CandidateIndex {
    length: usize,
    buckets: HashMap<Signature, Vec<LineContent>>,
    universal: Vec<LineContent>,
}

impl CandidateIndex {
    pub fn build(length: usize) -> Result<Self, Error> {
        if length == 0 || length > ABSOLUTE_MAX_SIZE {
            return Err(Error::InvalidInput(format!(
                "cannot index lines of length {} (supported: 1 to {})", length, ABSOLUTE_MAX_SIZE)));
        }
        let count: u32 = 1 << length;
        let mut buckets = HashMap::<Signature, Vec<LineContent>>::new();
        let mut universal = Vec::with_capacity(count as usize);

        for bits in 0..count {
            let content = LineContent(bits);
            buckets.entry(content.signature(length))
                   .or_insert_with(Vec::new)
                   .push(content);
            universal.push(content);
        }
        debug!("built candidate index for length {}: {} contents in {} buckets",
               length, universal.len(), buckets.len());

        Ok(CandidateIndex { length, buckets, universal })
    }

    pub fn length(&self) -> usize { self.length }

    pub fn bucket(&self, signature: &Signature) -> Option<&[LineContent]> {
        self.buckets.get(signature).map(|v| v.as_slice())
    }
    pub fn universal(&self) -> &[LineContent] {
        &self.universal
    }

    /// All contents matching the given key; empty when no line of this length realizes it.
    pub fn lookup(&self, key: &HintKey) -> &[LineContent] {
        match key {
            HintKey::Unconstrained        => self.universal(),
            HintKey::Signature(signature) => self.bucket(signature).unwrap_or(&[]),
        }
    }
}

/// Candidate indexes keyed by line length, built on first use.
#[derive(Debug, Default)]
pub struct IndexCache {
    indexes: HashMap<usize, Rc<CandidateIndex>>,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn get_or_build(&mut self, length: usize) -> Result<Rc<CandidateIndex>, Error> {
        if let Some(index) = self.indexes.get(&length) {
            return Ok(Rc::clone(index));
        }
        let index = Rc::new(CandidateIndex::build(length)?);
        self.indexes.insert(length, Rc::clone(&index));
        Ok(index)
    }
    pub fn len(&self) -> usize { self.indexes.len() }
    pub fn is_empty(&self) -> bool { self.indexes.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(s: &str) -> LineContent {
        LineContent::from_squares(&s.chars().map(|c| c == '1').collect::<Vec<_>>())
    }

    #[test]
    fn signature_of_runs() {
        assert_eq!(content("110111").signature(6), Signature::new(vec![2, 3]));
        assert_eq!(content("000000").signature(6), Signature::empty());
        assert_eq!(content("101").signature(3), Signature::new(vec![1, 1]));
        assert_eq!(content("0110").signature(4), Signature::new(vec![2]));
    }

    #[test]
    fn every_content_lands_in_exactly_one_bucket() {
        let index = CandidateIndex::build(5).unwrap();
        assert_eq!(index.universal().len(), 32);
        let total: usize = index.buckets.values().map(|b| b.len()).sum();
        assert_eq!(total, 32);
        assert!(index.buckets.values().all(|b| !b.is_empty()));
    }

    #[test]
    fn lookup_by_key() {
        let index = CandidateIndex::build(4).unwrap();
        let threes = index.lookup(&HintKey::Signature(Signature::new(vec![3])));
        assert_eq!(threes, &[content("1110"), content("0111")]);

        let empty = index.lookup(&HintKey::Signature(Signature::empty()));
        assert_eq!(empty, &[content("0000")]);

        assert_eq!(index.lookup(&HintKey::Unconstrained).len(), 16);

        // no line of length 4 has a run of 5, or two runs of 2
        assert!(index.lookup(&HintKey::Signature(Signature::new(vec![5]))).is_empty());
        assert!(index.bucket(&Signature::new(vec![2, 2])).is_none());
        assert!(index.bucket(&Signature::new(vec![0, 1])).is_none());
    }

    #[test]
    fn rejects_unsupported_lengths() {
        assert!(CandidateIndex::build(0).is_err());
        assert!(CandidateIndex::build(ABSOLUTE_MAX_SIZE + 1).is_err());
    }

    #[test]
    fn cache_reuses_indexes() {
        let mut cache = IndexCache::new();
        let a = cache.get_or_build(3).unwrap();
        let b = cache.get_or_build(3).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        cache.get_or_build(4).unwrap();
        assert_eq!(cache.len(), 2);
    }
}
