use crate::error::Result;

/// The request/response surface a key-value front end talks to.
pub trait OrderedIndex<K> {
    /// Returns `false` when the key was already present.
    fn insert(&mut self, key: K) -> Result<bool>;

    fn find(&self, key: &K) -> bool;

    /// Returns `false` when the key was absent.
    fn remove(&mut self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
