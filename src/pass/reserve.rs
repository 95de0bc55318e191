//! Position reservation for mandatory characters.

use super::charset::{Category, Requirements};
use rand::Rng;

/// Positions pre-assigned to each category, plus the positions left over
/// for the fill alphabet. Every list is ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    slots: [Vec<usize>; Category::COUNT],
    free: Vec<usize>,
}

impl Reservation {
    /// Reserve `reqs[c].mandatory()` distinct positions in `0..length` for
    /// each category, drawing without replacement from one shared pool in
    /// category order.
    ///
    /// The caller guarantees the mandatory total fits in `length`.
    pub fn draw<R: Rng>(length: usize, reqs: &Requirements, rng: &mut R) -> Self {
        let mut pool: Vec<usize> = (0..length).collect();
        let mut slots: [Vec<usize>; Category::COUNT] = Default::default();

        for (cat, req) in reqs.iter() {
            let taken = &mut slots[cat.index()];
            for _ in 0..req.mandatory() {
                // Order-preserving removal keeps draws reproducible per seed.
                let pick = rng.random_range(0..pool.len());
                taken.push(pool.remove(pick));
            }
            taken.sort_unstable();
        }

        Self { slots, free: pool }
    }

    pub fn of(&self, cat: Category) -> &[usize] {
        &self.slots[cat.index()]
    }

    pub fn free(&self) -> &[usize] {
        &self.free
    }

    pub fn total(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pass::charset::Requirement::{AtLeast, Forbidden};
    use crate::rng::seeded;
    use rand::RngCore;

    /// Always yields zero, so every draw takes the lowest remaining position.
    struct Lowest;

    impl RngCore for Lowest {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    fn reqs(l: i64, u: i64, d: i64, s: i64) -> Requirements {
        let r = |n: i64| if n < 0 { Forbidden } else { AtLeast(n as usize) };
        Requirements::new(r(l), r(u), r(d), r(s))
    }

    #[test]
    fn reserved_lists_are_disjoint_and_sorted() {
        let reqs = reqs(3, 2, 4, 1);
        for seed in 0..50 {
            let res = Reservation::draw(16, &reqs, &mut seeded(seed));

            let mut all: Vec<usize> = Category::ALL
                .iter()
                .flat_map(|c| res.of(*c).iter().copied())
                .collect();
            for cat in Category::ALL {
                assert!(res.of(cat).windows(2).all(|w| w[0] < w[1]));
            }
            assert_eq!(res.of(Category::Lower).len(), 3);
            assert_eq!(res.of(Category::Upper).len(), 2);
            assert_eq!(res.of(Category::Digit).len(), 4);
            assert_eq!(res.of(Category::Special).len(), 1);
            assert_eq!(res.total(), 10);
            assert_eq!(res.free().len(), 6);

            all.extend_from_slice(res.free());
            all.sort_unstable();
            assert_eq!(all, (0..16).collect::<Vec<_>>());
        }
    }

    #[test]
    fn nothing_reserved_without_minimums() {
        let res = Reservation::draw(12, &reqs(0, 0, -1, 0), &mut seeded(3));
        assert_eq!(res.total(), 0);
        assert_eq!(res.free(), (0..12).collect::<Vec<_>>().as_slice());
    }

    #[test]
    fn every_position_reserved_when_minimums_fill_length() {
        let res = Reservation::draw(4, &reqs(1, 1, 1, 1), &mut seeded(9));
        assert!(res.free().is_empty());
        for pos in 0..4 {
            assert!(Category::ALL.iter().any(|c| res.of(*c).contains(&pos)));
        }
    }

    #[test]
    fn same_seed_same_reservation() {
        let reqs = reqs(2, 2, 2, 2);
        let a = Reservation::draw(20, &reqs, &mut seeded(11));
        let b = Reservation::draw(20, &reqs, &mut seeded(11));
        assert_eq!(a, b);
    }

    #[test]
    fn categories_draw_in_fixed_order() {
        let res = Reservation::draw(8, &reqs(2, 1, 3, 1), &mut Lowest);
        assert_eq!(res.of(Category::Lower), &[0, 1]);
        assert_eq!(res.of(Category::Upper), &[2]);
        assert_eq!(res.of(Category::Digit), &[3, 4, 5]);
        assert_eq!(res.of(Category::Special), &[6]);
        assert_eq!(res.free(), &[7]);
    }

    #[test]
    fn forbidden_categories_take_no_draws() {
        let res = Reservation::draw(6, &reqs(-1, 2, -1, 1), &mut Lowest);
        assert!(res.of(Category::Lower).is_empty());
        assert_eq!(res.of(Category::Upper), &[0, 1]);
        assert!(res.of(Category::Digit).is_empty());
        assert_eq!(res.of(Category::Special), &[2]);
        assert_eq!(res.free(), &[3, 4, 5]);
    }
}
