use crate::{
    error::Error, generate::Generate, replicate::Replicate, shrink::Shrink, state::State,
};

/// Produces `count` equal values out of a single draw of its generator.
#[derive(Clone, Debug)]
pub struct Dedup<G: ?Sized> {
    pub(crate) count: usize,
    pub(crate) generator: G,
}

#[derive(Clone, Debug)]
pub struct Shrinker<S> {
    count: usize,
    shrinker: S,
}

impl<G: Generate + ?Sized> Generate for Dedup<G>
where
    G::Item: Replicate,
{
    type Item = Vec<G::Item>;
    type Shrink = Shrinker<G::Shrink>;

    fn generate(&self, state: &mut State) -> Result<Self::Shrink, Error> {
        Ok(Shrinker {
            count: self.count,
            shrinker: self.generator.generate(state)?,
        })
    }
}

impl<S: Shrink<Item: Replicate>> Shrink for Shrinker<S> {
    type Item = Vec<S::Item>;

    fn item(&self) -> Self::Item {
        if self.count == 0 {
            return Vec::new();
        }

        // The first read is canonical; the others are replicas of it.
        let first = self.shrinker.item();
        let mut items = Vec::with_capacity(self.count);
        items.extend(Iterator::map(1..self.count, |_| first.replicate()));
        items.insert(0, first);
        items
    }

    fn shrink(&mut self) -> Option<Self> {
        Some(Self {
            count: self.count,
            shrinker: self.shrinker.shrink()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generate::FullGenerate, state::Sizes};

    #[test]
    fn consumes_a_single_draw() {
        for count in [0, 1, 3, 17] {
            let mut state = State::random(0, 1, Sizes::DEFAULT, 9);
            let _ = (0u64..=1000).dedup(count).generate(&mut state).unwrap();
            assert_eq!(state.consumed(), 1);
        }
    }

    #[test]
    fn candidates_stay_uniform() {
        let generator = u16::generator().dedup(3);
        for index in 0..50 {
            let mut state = State::random(index, 50, Sizes::DEFAULT, 2);
            let mut shrinker = generator.generate(&mut state).unwrap();
            let item = shrinker.item();
            assert_eq!(item.len(), 3);
            assert!(item.iter().all(|&value| value == item[0]));
            while let Some(candidate) = shrinker.shrink() {
                let candidate = candidate.item();
                assert!(candidate.iter().all(|&value| value == candidate[0]));
                assert!(candidate[0] < item[0]);
            }
        }
    }
}
