mod arena;
mod level;

use std::{cmp::Ordering, fmt, iter};

use log::{debug, trace};

use crate::{
    cmp::{Comparator, OrdComparator},
    error::Result,
    index::OrderedIndex,
    options::{Options, MAX_LEVEL_LIMIT},
};

use self::{
    arena::{Arena, NodeId},
    level::LevelGenerator,
};

/// A descent position: the keyless head sentinel or a real node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pos {
    Head,
    Node(NodeId),
}

/// Probabilistic ordered set of unique keys.
///
/// Every node lives in the arena. Level 0 threads all nodes in key order;
/// level `L` threads the nodes whose height is greater than `L`. The head
/// holds no key, so the comparator only ever sees real keys.
pub struct SkipList<K, C = OrdComparator> {
    arena: Arena<K>,
    head: Vec<Option<NodeId>>,
    height: usize,
    max_level: usize,
    levels: LevelGenerator,
    comparator: C,
}

impl<K: Ord> SkipList<K, OrdComparator> {
    pub fn new() -> Self {
        let options = Options::default();
        let head = vec![None; options.max_level];
        Self::from_parts(&options, OrdComparator, head, Arena::new())
    }

    pub fn with_options(options: Options) -> Result<Self> {
        Self::with_comparator(options, OrdComparator)
    }
}

impl<K: Ord> Default for SkipList<K, OrdComparator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C: Comparator<K>> SkipList<K, C> {
    pub fn with_comparator(options: Options, comparator: C) -> Result<Self> {
        options.validate()?;

        let mut head = Vec::new();
        head.try_reserve_exact(options.max_level)?;
        head.resize(options.max_level, None);
        let arena = Arena::with_capacity(options.capacity)?;

        Ok(Self::from_parts(&options, comparator, head, arena))
    }

    fn from_parts(
        options: &Options,
        comparator: C,
        head: Vec<Option<NodeId>>,
        arena: Arena<K>,
    ) -> Self {
        debug!(
            "new skiplist: comparator={} max_level={} branching_factor={} seeded={}",
            comparator.name(),
            options.max_level,
            options.branching_factor,
            options.seed.is_some()
        );
        SkipList {
            arena,
            head,
            height: 1,
            max_level: options.max_level,
            levels: LevelGenerator::new(options),
            comparator,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// Tallest level any present node participates in, at least 1.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// `height_histogram()[h - 1]` is the number of times the level policy
    /// picked height `h`, duplicates included.
    pub fn height_histogram(&self) -> &[u64] {
        self.levels.histogram()
    }

    pub fn memory_usage(&self) -> usize {
        self.arena.memory_usage() + self.head.capacity() * std::mem::size_of::<Option<NodeId>>()
    }

    pub fn find(&self, key: &K) -> bool {
        let pos = self.descend(key, |_, _| {});
        self.successor_eq(pos, key).is_some()
    }

    /// Returns `Ok(false)` without touching the structure if `key` is
    /// already present.
    pub fn insert(&mut self, key: K) -> Result<bool> {
        let height = self.levels.random_height();
        self.insert_with_height(key, height)
    }

    pub(crate) fn insert_with_height(&mut self, key: K, height: usize) -> Result<bool> {
        debug_assert!(
            (1..=self.max_level).contains(&height),
            "height {} out of 1..={}",
            height,
            self.max_level
        );

        // Levels at or above the current height keep `Head` as predecessor.
        let mut update = [Pos::Head; MAX_LEVEL_LIMIT];
        let pos = self.descend(&key, |level, pos| update[level] = pos);
        if self.successor_eq(pos, &key).is_some() {
            return Ok(false);
        }

        let id = self.arena.alloc(key, height)?;
        for (level, &prev) in update.iter().enumerate().take(height) {
            let next = self.next(prev, level);
            self.arena.get_mut(id).links[level] = next;
            self.set_next(prev, level, Some(id));
        }

        if height > self.height {
            trace!("skiplist height {} -> {}", self.height, height);
            self.height = height;
        }
        Ok(true)
    }

    /// Returns `false` without touching the structure if `key` is absent.
    pub fn remove(&mut self, key: &K) -> bool {
        let mut update = [Pos::Head; MAX_LEVEL_LIMIT];
        let pos = self.descend(key, |level, pos| update[level] = pos);
        let target = match self.successor_eq(pos, key) {
            Some(id) => id,
            None => return false,
        };

        for (level, &prev) in update
            .iter()
            .enumerate()
            .take(self.arena.get(target).height())
        {
            let next = self.arena.get(target).links[level];
            self.set_next(prev, level, next);
        }
        self.arena.free(target);

        let old_height = self.height;
        while self.height > 1 && self.head[self.height - 1].is_none() {
            self.height -= 1;
        }
        if self.height != old_height {
            trace!("skiplist height {} -> {}", old_height, self.height);
        }
        true
    }

    /// Walks from the current height down to level 0, advancing while the
    /// next key is less than `key`. `visit` sees the position each level
    /// ends on; the returned position is the one level 0 ends on.
    fn descend(&self, key: &K, mut visit: impl FnMut(usize, Pos)) -> Pos {
        let mut pos = Pos::Head;
        for level in (0..self.height).rev() {
            while let Some(next) = self.next(pos, level) {
                match self.comparator.compare(&self.arena.get(next).key, key) {
                    Ordering::Less => pos = Pos::Node(next),
                    Ordering::Equal | Ordering::Greater => break,
                }
            }
            visit(level, pos);
        }
        pos
    }

    fn successor_eq(&self, pos: Pos, key: &K) -> Option<NodeId> {
        self.next(pos, 0).filter(|&id| {
            self.comparator.compare(&self.arena.get(id).key, key) == Ordering::Equal
        })
    }
}

impl<K, C> SkipList<K, C> {
    fn next(&self, pos: Pos, level: usize) -> Option<NodeId> {
        match pos {
            Pos::Head => self.head[level],
            Pos::Node(id) => self.arena.get(id).links[level],
        }
    }

    fn set_next(&mut self, pos: Pos, level: usize, link: Option<NodeId>) {
        match pos {
            Pos::Head => self.head[level] = link,
            Pos::Node(id) => self.arena.get_mut(id).links[level] = link,
        }
    }

    fn level_ids(&self, level: usize) -> impl Iterator<Item = NodeId> + '_ {
        iter::successors(self.head[level], move |&id| self.arena.get(id).links[level])
    }

    pub(crate) fn level_keys(&self, level: usize) -> impl Iterator<Item = &K> + '_ {
        self.level_ids(level).map(move |id| &self.arena.get(id).key)
    }
}

impl<K: fmt::Debug, C> fmt::Debug for SkipList<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in (0..self.height).rev() {
            write!(f, "L{}:", level)?;
            for key in self.level_keys(level) {
                write!(f, " {:?}", key)?;
            }
            if level > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl<K, C: Comparator<K>> OrderedIndex<K> for SkipList<K, C> {
    fn insert(&mut self, key: K) -> Result<bool> {
        SkipList::insert(self, key)
    }

    fn find(&self, key: &K) -> bool {
        SkipList::find(self, key)
    }

    fn remove(&mut self, key: &K) -> bool {
        SkipList::remove(self, key)
    }

    fn len(&self) -> usize {
        SkipList::len(self)
    }
}
