//! Mark Pool
//!
//! Fixed-capacity arena of mark records with two intrusive, index-linked lists:
//!
//! - **Active list**: doubly linked and circular through a sentinel slot that
//!   never holds mark data. New marks go in at the head, so walking from the
//!   head visits marks newest first and the tail is always the oldest.
//! - **Free list**: singly linked through the same `next` links, order
//!   irrelevant.
//!
//! Every slot is on exactly one of the two lists at all times. Allocation
//! never fails: with no free slot left, the oldest batch of marks (all marks
//! sharing the tail's timestamp, e.g. one shotgun blast) is evicted at once.
//!
//! # Usage
//!
//! ```rust
//! use impact_marks::render::marks::MarkPool;
//!
//! let mut pool = MarkPool::new(64);
//! let allocation = pool.allocate().expect("pool is consistent");
//! pool.get_mut(allocation.id).time = 1000;
//! assert_eq!(pool.head(), Some(allocation.id));
//! ```

use super::data_structures::{MarkError, MarkId, MarkPoly};

/// Link value meaning "not on any list"
const NIL: usize = usize::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Link {
    prev: usize,
    next: usize,
}

impl Link {
    const UNLINKED: Self = Self { prev: NIL, next: NIL };
}

/// Result of a successful allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    /// The freshly zeroed mark, now at the head of the active list
    pub id: MarkId,
    /// Number of old marks evicted to make room
    pub evicted: usize,
}

/// Fixed-capacity pool of mark records
#[derive(Debug)]
pub struct MarkPool {
    marks: Box<[MarkPoly]>,
    /// One entry per mark plus the active-list sentinel at index `capacity`
    links: Box<[Link]>,
    free_head: usize,
}

impl MarkPool {
    /// Create a pool with `capacity` slots, all free
    ///
    /// All storage is allocated here; nothing is allocated per mark.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Mark pool capacity must be greater than zero");

        let mut pool = Self {
            marks: vec![MarkPoly::default(); capacity].into_boxed_slice(),
            links: vec![Link::UNLINKED; capacity + 1].into_boxed_slice(),
            free_head: NIL,
        };
        pool.init();
        pool
    }

    /// Reset every slot and rebuild both lists
    ///
    /// Called at startup and on every level or session restart. Anything left
    /// over from the previous session is discarded.
    pub fn init(&mut self) {
        let capacity = self.capacity();

        for mark in self.marks.iter_mut() {
            *mark = MarkPoly::default();
        }

        for (index, link) in self.links[..capacity].iter_mut().enumerate() {
            *link = Link {
                prev: NIL,
                next: if index + 1 < capacity { index + 1 } else { NIL },
            };
        }
        self.free_head = 0;

        let sentinel = self.sentinel();
        self.links[sentinel] = Link {
            prev: sentinel,
            next: sentinel,
        };

        log::info!("Mark pool initialized with {} slots", capacity);
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.marks.len()
    }

    fn sentinel(&self) -> usize {
        self.marks.len()
    }

    /// Take a slot for a new mark
    ///
    /// Always succeeds on a consistent pool. When no slot is free, every mark
    /// created at the same instant as the oldest one is evicted first.
    pub fn allocate(&mut self) -> Result<Allocation, MarkError> {
        let sentinel = self.sentinel();
        let mut evicted = 0;

        if self.free_head == NIL {
            let time = self.marks[self.links[sentinel].prev].time;
            loop {
                let tail = self.links[sentinel].prev;
                if tail == sentinel || self.marks[tail].time != time {
                    break;
                }
                self.free(MarkId(tail))?;
                evicted += 1;
            }
            log::debug!("Mark pool full, evicted {} marks from time {}", evicted, time);
        }

        let index = self.free_head;
        self.free_head = self.links[index].next;

        self.marks[index] = MarkPoly::default();

        let old_head = self.links[sentinel].next;
        self.links[index] = Link {
            prev: sentinel,
            next: old_head,
        };
        self.links[old_head].prev = index;
        self.links[sentinel].next = index;

        Ok(Allocation {
            id: MarkId(index),
            evicted,
        })
    }

    /// Return an active mark to the free list
    ///
    /// Freeing a mark that is not active means the pool is corrupt or the
    /// caller holds a stale id; the pool is left untouched.
    pub fn free(&mut self, id: MarkId) -> Result<(), MarkError> {
        let index = id.0;
        if !self.is_active(id) {
            log::error!("free_mark: mark {} is not active", index);
            return Err(MarkError::NotActive { index });
        }

        let Link { prev, next } = self.links[index];
        self.links[prev].next = next;
        self.links[next].prev = prev;

        self.links[index] = Link {
            prev: NIL,
            next: self.free_head,
        };
        self.free_head = index;
        Ok(())
    }

    /// Whether `id` is currently on the active list
    pub fn is_active(&self, id: MarkId) -> bool {
        id.0 < self.capacity() && {
            let link = self.links[id.0];
            link.prev != NIL && link.next != NIL
        }
    }

    /// Mark record for `id`
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this pool.
    pub fn get(&self, id: MarkId) -> &MarkPoly {
        &self.marks[id.0]
    }

    /// Mutable mark record for `id`
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this pool.
    pub fn get_mut(&mut self, id: MarkId) -> &mut MarkPoly {
        &mut self.marks[id.0]
    }

    fn link_to_id(&self, index: usize) -> Option<MarkId> {
        (index != self.sentinel() && index != NIL).then_some(MarkId(index))
    }

    /// Newest active mark
    pub fn head(&self) -> Option<MarkId> {
        self.link_to_id(self.links[self.sentinel()].next)
    }

    /// Oldest active mark
    pub fn tail(&self) -> Option<MarkId> {
        self.link_to_id(self.links[self.sentinel()].prev)
    }

    /// The next older active mark after `id`
    pub fn next_of(&self, id: MarkId) -> Option<MarkId> {
        if !self.is_active(id) {
            return None;
        }
        self.link_to_id(self.links[id.0].next)
    }

    /// Walk the active list from newest to oldest
    pub fn iter_active(&self) -> ActiveMarks<'_> {
        ActiveMarks {
            pool: self,
            cursor: self.head(),
        }
    }

    /// Number of active marks, counted by walking the list
    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    /// Number of free slots, counted by walking the list
    pub fn free_count(&self) -> usize {
        let mut count = 0;
        let mut cursor = self.free_head;
        while cursor != NIL {
            count += 1;
            cursor = self.links[cursor].next;
        }
        count
    }
}

/// Iterator over active marks, newest first
pub struct ActiveMarks<'a> {
    pool: &'a MarkPool,
    cursor: Option<MarkId>,
}

impl<'a> Iterator for ActiveMarks<'a> {
    type Item = (MarkId, &'a MarkPoly);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        self.cursor = self.pool.next_of(id);
        Some((id, self.pool.get(id)))
    }
}
