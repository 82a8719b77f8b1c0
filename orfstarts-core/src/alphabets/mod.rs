pub mod dna;
pub mod protein;

use bit_set::BitSet;
use std::borrow::Borrow;
use vector_map::VecMap;

pub type SymbolRanks = VecMap<usize, u8>;

#[derive(Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Alphabet {
    pub symbols: BitSet,
}

impl Alphabet {
    pub fn new<C, T>(symbols: T) -> Self
    where
        C: Borrow<u8>,
        T: IntoIterator<Item = C>,
    {
        let mut s = BitSet::new();
        s.extend(symbols.into_iter().map(|c| *c.borrow() as usize));

        Alphabet { symbols: s }
    }

    /// Position and value of the first byte outside the alphabet.
    pub fn first_foreign(&self, text: &[u8]) -> Option<(usize, u8)> {
        text.iter()
            .enumerate()
            .find(|(_, &b)| !self.symbols.contains(b as usize))
            .map(|(pos, &b)| (pos, b))
    }
}

/// Dense ranks for the symbols of an alphabet, in ascending byte order.
#[derive(Default, Clone, Debug)]
pub struct RankTransform {
    pub ranks: SymbolRanks,
}

impl RankTransform {
    pub fn new(alphabet: &Alphabet) -> Self {
        let mut ranks = VecMap::new();
        for (r, c) in alphabet.symbols.iter().enumerate() {
            ranks.insert(c, r as u8);
        }
        RankTransform { ranks }
    }

    #[inline]
    pub fn get(&self, a: u8) -> Option<u8> {
        self.ranks.get(&(a as usize)).copied()
    }
}
