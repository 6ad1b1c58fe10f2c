/// Iterator over every `K`-element index combination drawn from `0..n`,
/// in lexicographic order.
///
/// Yields nothing when `n < K`.
pub struct Combinations<const K: usize> {
    n: usize,
    indices: [usize; K],
    done: bool,
}

impl<const K: usize> Combinations<K> {
    pub fn new(n: usize) -> Self {
        let mut indices = [0usize; K];
        for (i, slot) in indices.iter_mut().enumerate() {
            *slot = i;
        }
        Self { n, indices, done: K == 0 || n < K }
    }
}

impl<const K: usize> Iterator for Combinations<K> {
    type Item = [usize; K];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.indices;

        // Find the rightmost index that can still move right.
        let mut i = K - 1;
        loop {
            if self.indices[i] < self.n - (K - i) {
                self.indices[i] += 1;
                for j in (i + 1)..K {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seven_choose_five_yields_21() {
        assert_eq!(Combinations::<5>::new(7).count(), 21);
    }

    #[test]
    fn six_choose_five_yields_6() {
        assert_eq!(Combinations::<5>::new(6).count(), 6);
    }

    #[test]
    fn exactly_k_yields_one() {
        let combos: Vec<[usize; 5]> = Combinations::<5>::new(5).collect();
        assert_eq!(combos, vec![[0, 1, 2, 3, 4]]);
    }

    #[test]
    fn too_few_yields_none() {
        assert_eq!(Combinations::<5>::new(4).count(), 0);
    }

    #[test]
    fn first_and_last_combination() {
        let combos: Vec<[usize; 5]> = Combinations::<5>::new(7).collect();
        assert_eq!(combos.first(), Some(&[0, 1, 2, 3, 4]));
        assert_eq!(combos.last(), Some(&[2, 3, 4, 5, 6]));
    }

    #[test]
    fn combinations_are_unique_ascending_and_lexicographic() {
        let combos: Vec<[usize; 5]> = Combinations::<5>::new(7).collect();
        let mut seen = HashSet::new();
        for c in &combos {
            assert!(seen.insert(*c), "duplicate combination {c:?}");
            assert!(c.windows(2).all(|w| w[0] < w[1]));
            assert!(c.iter().all(|&i| i < 7));
        }
        assert!(combos.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn iterator_stays_exhausted() {
        let mut it = Combinations::<2>::new(3);
        assert_eq!(it.by_ref().count(), 3);
        assert!(it.next().is_none());
    }
}
