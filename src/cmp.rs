use std::cmp::Ordering;

pub trait Comparator<K: ?Sized> {
    fn compare(&self, left: &K, right: &K) -> Ordering;

    fn name(&self) -> &'static str;
}

/// Orders keys by their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrdComparator;

impl<K: Ord + ?Sized> Comparator<K> for OrdComparator {
    fn compare(&self, left: &K, right: &K) -> Ordering {
        left.cmp(right)
    }

    fn name(&self) -> &'static str {
        "skipindex.OrdComparator"
    }
}
