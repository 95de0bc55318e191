//! Character categories, their alphabets, and per-category requirements.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::cli::ParseError;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SPECIALS: &[u8] = b"!\"#$%&()*+',-./:;<=>?\\@[]^_`{|}~";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Lower,
    Upper,
    Digit,
    Special,
}

impl Category {
    pub const COUNT: usize = 4;

    /// Processing and precedence order.
    pub const ALL: [Category; Category::COUNT] = [
        Category::Lower,
        Category::Upper,
        Category::Digit,
        Category::Special,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn alphabet(self) -> &'static [u8] {
        match self {
            Category::Lower => LOWERCASE,
            Category::Upper => UPPERCASE,
            Category::Digit => DIGITS,
            Category::Special => SPECIALS,
        }
    }

    #[cfg(test)]
    pub fn contains(self, c: char) -> bool {
        c.is_ascii() && self.alphabet().contains(&(c as u8))
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Lower => "Lowercase",
            Category::Upper => "Uppercase",
            Category::Digit => "Digits",
            Category::Special => "Special",
        }
    }
}

/// What a password must (or must not) contain from one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Forbidden,
    AtLeast(usize),
}

impl Requirement {
    #[inline]
    pub fn is_permitted(self) -> bool {
        self != Requirement::Forbidden
    }

    /// Number of positions reserved for this category.
    #[inline]
    pub fn mandatory(self) -> usize {
        match self {
            Requirement::Forbidden => 0,
            Requirement::AtLeast(n) => n,
        }
    }
}

impl Default for Requirement {
    fn default() -> Self {
        Requirement::AtLeast(0)
    }
}

/// `-1` for forbidden, the minimum count otherwise.
impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Forbidden => write!(f, "-1"),
            Requirement::AtLeast(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for Requirement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "-1" | "off" => Ok(Requirement::Forbidden),
            t => t
                .parse::<usize>()
                .map(Requirement::AtLeast)
                .map_err(|_| ParseError::InvalidRequirement(s.to_string())),
        }
    }
}

/// One requirement per category, indexed by [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Requirements([Requirement; Category::COUNT]);

impl Requirements {
    pub fn new(lower: Requirement, upper: Requirement, digit: Requirement, special: Requirement) -> Self {
        Self([lower, upper, digit, special])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, Requirement)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self[c]))
    }

    pub fn total_mandatory(&self) -> usize {
        self.0.iter().map(|r| r.mandatory()).sum()
    }

    pub fn any_permitted(&self) -> bool {
        self.0.iter().any(|r| r.is_permitted())
    }

    /// Alphabet for positions no category reserved: every permitted
    /// category's alphabet, in category order.
    pub fn fill_alphabet(&self) -> Vec<u8> {
        self.iter()
            .filter(|(_, r)| r.is_permitted())
            .flat_map(|(c, _)| c.alphabet().iter().copied())
            .collect()
    }

    pub fn fill_size(&self) -> usize {
        self.iter()
            .filter(|(_, r)| r.is_permitted())
            .map(|(c, _)| c.alphabet().len())
            .sum()
    }
}

impl Index<Category> for Requirements {
    type Output = Requirement;

    fn index(&self, c: Category) -> &Requirement {
        &self.0[c.index()]
    }
}

impl IndexMut<Category> for Requirements {
    fn index_mut(&mut self, c: Category) -> &mut Requirement {
        &mut self.0[c.index()]
    }
}

/// Entropy in bits of a password drawn under `reqs`.
pub fn entropy_bits(length: usize, reqs: &Requirements) -> f64 {
    let reserved: f64 = reqs
        .iter()
        .map(|(c, r)| r.mandatory() as f64 * (c.alphabet().len() as f64).log2())
        .sum();
    let free = length.saturating_sub(reqs.total_mandatory());
    let fill = reqs.fill_size();
    if fill == 0 {
        return reserved;
    }
    reserved + free as f64 * (fill as f64).log2()
}
