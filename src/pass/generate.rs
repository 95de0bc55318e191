//! Password generation.

use super::charset::{Category, Requirements};
use super::reserve::Reservation;
use crate::error::GenerateError;
use rand::Rng;

/// Check the generator's own preconditions.
pub fn check(length: usize, reqs: &Requirements) -> Result<(), GenerateError> {
    if length == 0 {
        return Err(GenerateError::ZeroLength);
    }
    if !reqs.any_permitted() {
        return Err(GenerateError::NothingPermitted);
    }
    let required = reqs.total_mandatory();
    if required > length {
        return Err(GenerateError::TooManyRequired { required, length });
    }
    Ok(())
}

/// Generate a password of exactly `length` characters that meets every
/// minimum in `reqs` and uses no forbidden category.
pub fn generate<R: Rng>(
    length: usize,
    reqs: &Requirements,
    rng: &mut R,
) -> Result<String, GenerateError> {
    let mut buf = Vec::with_capacity(length);
    generate_into(length, reqs, rng, &mut buf)?;
    Ok(buf.into_iter().map(char::from).collect())
}

/// Same as [`generate`], writing ASCII bytes into `buf`.
/// Caller owns the buffer; it is cleared first and should be zeroized after use.
pub fn generate_into<R: Rng>(
    length: usize,
    reqs: &Requirements,
    rng: &mut R,
    buf: &mut Vec<u8>,
) -> Result<(), GenerateError> {
    check(length, reqs)?;

    let reserved = Reservation::draw(length, reqs, rng);
    debug_assert_eq!(reserved.total() + reserved.free().len(), length);
    let fill = reqs.fill_alphabet();
    let mut consumed = [0usize; Category::COUNT];

    buf.clear();
    for position in 0..length {
        let owner = Category::ALL
            .into_iter()
            .find(|c| reserved.of(*c).get(consumed[c.index()]) == Some(&position));

        let alphabet = match owner {
            Some(cat) => {
                consumed[cat.index()] += 1;
                cat.alphabet()
            }
            None => fill.as_slice(),
        };

        if alphabet.is_empty() {
            return Err(GenerateError::EmptyFill { position });
        }
        buf.push(alphabet[rng.random_range(0..alphabet.len())]);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pass::charset::Requirement::{self, AtLeast, Forbidden};
    use crate::rng::{Global, seeded};

    fn count(password: &str, cat: Category) -> usize {
        password.chars().filter(|c| cat.contains(*c)).count()
    }

    fn assert_meets(password: &str, length: usize, reqs: &Requirements) {
        assert_eq!(password.len(), length, "wrong length: {password}");
        for (cat, req) in reqs.iter() {
            match req {
                Requirement::Forbidden => {
                    assert_eq!(count(password, cat), 0, "{cat:?} leaked into {password}")
                }
                Requirement::AtLeast(n) => {
                    assert!(count(password, cat) >= n, "{cat:?} below {n} in {password}")
                }
            }
        }
    }

    #[test]
    fn lower_and_digits_only() {
        let reqs = Requirements::new(AtLeast(2), Forbidden, AtLeast(1), Forbidden);
        for seed in 0..200 {
            let pass = generate(8, &reqs, &mut seeded(seed)).unwrap();
            assert_meets(&pass, 8, &reqs);
            assert!(pass.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn no_minimums_draws_from_full_union() {
        let reqs = Requirements::default();
        let mut rng = seeded(5);
        let mut seen = [false; Category::COUNT];
        for _ in 0..100 {
            let pass = generate(12, &reqs, &mut rng).unwrap();
            assert_eq!(pass.len(), 12);
            for c in pass.chars() {
                let cat = Category::ALL
                    .into_iter()
                    .find(|cat| cat.contains(c))
                    .expect("character outside every alphabet");
                seen[cat.index()] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn one_of_each_fills_every_position() {
        let reqs = Requirements::new(AtLeast(1), AtLeast(1), AtLeast(1), AtLeast(1));
        for seed in 0..200 {
            let pass = generate(4, &reqs, &mut seeded(seed)).unwrap();
            for cat in Category::ALL {
                assert_eq!(count(&pass, cat), 1, "{pass}");
            }
        }
    }

    #[test]
    fn reserved_positions_hold_their_category() {
        let reqs = Requirements::new(AtLeast(3), AtLeast(0), AtLeast(2), AtLeast(4));
        let seed = 77;

        let reserved = Reservation::draw(16, &reqs, &mut seeded(seed));
        let pass = generate(16, &reqs, &mut seeded(seed)).unwrap();
        let chars: Vec<char> = pass.chars().collect();

        for cat in Category::ALL {
            for &pos in reserved.of(cat) {
                assert!(cat.contains(chars[pos]), "{pos} in {pass}");
            }
        }
    }

    #[test]
    fn too_many_required_is_rejected() {
        let reqs = Requirements::new(AtLeast(3), Forbidden, AtLeast(3), Forbidden);
        let err = generate(5, &reqs, &mut seeded(0)).unwrap_err();
        assert_eq!(err, GenerateError::TooManyRequired { required: 6, length: 5 });
    }

    #[test]
    fn all_forbidden_is_rejected() {
        let reqs = Requirements::new(Forbidden, Forbidden, Forbidden, Forbidden);
        let err = generate(8, &reqs, &mut seeded(0)).unwrap_err();
        assert_eq!(err, GenerateError::NothingPermitted);
    }

    #[test]
    fn zero_length_is_rejected() {
        let err = generate(0, &Requirements::default(), &mut Global).unwrap_err();
        assert_eq!(err, GenerateError::ZeroLength);
    }

    #[test]
    fn same_seed_same_password() {
        let reqs = Requirements::new(AtLeast(1), AtLeast(2), AtLeast(0), Forbidden);
        let a = generate(24, &reqs, &mut seeded(1234)).unwrap();
        let b = generate(24, &reqs, &mut seeded(1234)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn alphabets_untouched_by_generation() {
        let before: Vec<Vec<u8>> = Category::ALL.iter().map(|c| c.alphabet().to_vec()).collect();
        let reqs = Requirements::new(AtLeast(2), AtLeast(2), AtLeast(2), AtLeast(2));
        for seed in 0..20 {
            generate(32, &reqs, &mut seeded(seed)).unwrap();
        }
        let after: Vec<Vec<u8>> = Category::ALL.iter().map(|c| c.alphabet().to_vec()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn generate_into_reuses_buffer() {
        let reqs = Requirements::default();
        let mut buf = b"stale contents".to_vec();
        generate_into(10, &reqs, &mut Global, &mut buf).unwrap();
        assert_eq!(buf.len(), 10);
        assert!(buf.iter().all(|b| (b'!'..=b'~').contains(b)));
    }
}
