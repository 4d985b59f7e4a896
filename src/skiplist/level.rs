use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::options::Options;

/// Draws node heights. Seeded once, at index construction.
pub struct LevelGenerator {
    rand: StdRng,
    max_level: usize,
    branching_factor: u32,
    histogram: Vec<u64>,
}

impl LevelGenerator {
    pub fn new(options: &Options) -> Self {
        let rand = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        LevelGenerator {
            rand,
            max_level: options.max_level,
            branching_factor: options.branching_factor,
            histogram: vec![0; options.max_level],
        }
    }

    pub fn random_height(&mut self) -> usize {
        let mut height = 1;
        while height < self.max_level && self.rand.next_u32() % self.branching_factor == 0 {
            height += 1;
        }
        self.histogram[height - 1] += 1;
        height
    }

    /// `histogram[h - 1]` counts how often height `h` was drawn.
    pub fn histogram(&self) -> &[u64] {
        &self.histogram
    }
}
