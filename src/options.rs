use crate::error::{Error, Result};

pub const DEFAULT_MAX_LEVEL: usize = 16;
/// Upper bound for `max_level`; descent keeps one predecessor per level on
/// the stack.
pub const MAX_LEVEL_LIMIT: usize = 32;
pub const DEFAULT_BRANCHING_FACTOR: u32 = 2;

#[derive(Clone, Debug)]
pub struct Options {
    pub max_level: usize,
    /// A node grows one level with probability `1 / branching_factor`.
    pub branching_factor: u32,
    /// `None` seeds the level generator from OS entropy.
    pub seed: Option<u64>,
    /// Nodes reserved up front by the arena.
    pub capacity: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_level: DEFAULT_MAX_LEVEL,
            branching_factor: DEFAULT_BRANCHING_FACTOR,
            seed: None,
            capacity: 0,
        }
    }
}

impl Options {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_level == 0 || self.max_level > MAX_LEVEL_LIMIT {
            return Err(Error::InvalidArgument(format!(
                "max_level must be in 1..={}, got {}",
                MAX_LEVEL_LIMIT, self.max_level
            )));
        }
        if self.branching_factor < 2 {
            return Err(Error::InvalidArgument(format!(
                "branching_factor must be at least 2, got {}",
                self.branching_factor
            )));
        }
        Ok(())
    }
}
