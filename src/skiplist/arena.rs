use std::mem::size_of;

use crate::error::Result;

/// Stable handle to a node slot. Stays valid until the slot is freed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

pub struct Node<K> {
    pub key: K,
    /// One forward link per level the node participates in.
    pub links: Vec<Option<NodeId>>,
}

impl<K> Node<K> {
    pub fn height(&self) -> usize {
        self.links.len()
    }
}

enum Slot<K> {
    Occupied(Node<K>),
    Vacant { next_free: Option<usize> },
}

/// Owns every node of a skiplist. Freed slots are reused LIFO.
pub struct Arena<K> {
    slots: Vec<Slot<K>>,
    free: Option<usize>,
    len: usize,
}

impl<K> Arena<K> {
    pub fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: None,
            len: 0,
        }
    }

    pub fn with_capacity(cap: usize) -> Result<Self> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(cap)?;
        Ok(Arena {
            slots,
            free: None,
            len: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn memory_usage(&self) -> usize {
        let links: usize = self
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Occupied(node) => node.links.capacity() * size_of::<Option<NodeId>>(),
                Slot::Vacant { .. } => 0,
            })
            .sum();
        self.slots.capacity() * size_of::<Slot<K>>() + links
    }

    /// Builds a node with `height` empty links and stores it. Nothing is
    /// stored if any allocation fails.
    pub fn alloc(&mut self, key: K, height: usize) -> Result<NodeId> {
        let mut links = Vec::new();
        links.try_reserve_exact(height)?;
        links.resize(height, None);
        let node = Node { key, links };

        match self.free {
            Some(idx) => {
                let next_free = match self.slots[idx] {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => unreachable!("free list points at a live slot"),
                };
                self.free = next_free;
                self.slots[idx] = Slot::Occupied(node);
                self.len += 1;
                Ok(NodeId(idx))
            }
            None => {
                self.slots.try_reserve(1)?;
                self.slots.push(Slot::Occupied(node));
                self.len += 1;
                Ok(NodeId(self.slots.len() - 1))
            }
        }
    }

    pub fn free(&mut self, id: NodeId) -> Node<K> {
        let vacant = Slot::Vacant {
            next_free: self.free,
        };
        match std::mem::replace(&mut self.slots[id.0], vacant) {
            Slot::Occupied(node) => {
                self.free = Some(id.0);
                self.len -= 1;
                node
            }
            Slot::Vacant { .. } => panic!("double free of node slot {}", id.0),
        }
    }

    pub fn get(&self, id: NodeId) -> &Node<K> {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("access to freed node slot {}", id.0),
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<K> {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("access to freed node slot {}", id.0),
        }
    }
}
