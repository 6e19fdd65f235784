use rand::Rng;

/// A generic trait for replacement policies. Each cache set owns one, which is used to
/// parameterise the set and the controller.
///
/// Ways are filled in order and never invalidated, so the policy only ever has to choose a victim
/// from a full set.
pub trait ReplacementPolicy {
    /// Creates the policy state for a single set
    fn new(associativity: usize) -> Self
    where
        Self: Sized;

    /// Updates the policy when a valid way is read
    ///
    /// Not applicable for some policies, a default which does nothing is provided
    fn update_on_hit(&mut self, _way: usize) {}

    /// Updates the policy when an empty way is filled for the first time
    fn update_on_fill(&mut self, way: usize);

    /// Used by the set to get the way to evict when it's full.
    ///
    /// Implementations should assume that when this method returns, the way has been replaced by
    /// the newly requested block
    ///
    /// # Arguments
    ///
    /// * `rng`: The simulation's pseudorandom source, only consumed by the random policy
    ///
    /// returns: usize
    fn get_victim<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize;
}

const NIL: usize = usize::MAX;

/// A doubly linked list of way indices, stored as index-addressed arrays
///
/// Holds each way at most once. Appending, promoting a way to the back and taking the front are
/// all constant time, which keeps eviction independent of the associativity.
#[derive(Debug, Clone)]
pub struct OrderList {
    prev: Vec<usize>,
    next: Vec<usize>,
    linked: Vec<bool>,
    head: usize,
    tail: usize,
    len: usize,
}

impl OrderList {
    pub fn new(capacity: usize) -> Self {
        Self {
            prev: vec![NIL; capacity],
            next: vec![NIL; capacity],
            linked: vec![false; capacity],
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, way: usize) -> bool {
        self.linked[way]
    }

    /// The way at the front, the next one to be evicted
    pub fn front(&self) -> Option<usize> {
        (self.head != NIL).then_some(self.head)
    }

    /// Appends a way which isn't in the list yet
    pub fn push_back(&mut self, way: usize) {
        debug_assert!(!self.linked[way], "way {way} is already tracked");
        self.prev[way] = self.tail;
        self.next[way] = NIL;
        if self.tail == NIL {
            self.head = way;
        } else {
            self.next[self.tail] = way;
        }
        self.tail = way;
        self.linked[way] = true;
        self.len += 1;
    }

    /// Moves a tracked way to the back. Untracked ways are ignored
    pub fn move_to_back(&mut self, way: usize) {
        if self.linked[way] && self.tail != way {
            self.unlink(way);
            self.push_back(way);
        }
    }

    /// Moves the front way to the back and returns it
    ///
    /// # Panics
    ///
    /// If the list is empty. Sets only ask for a victim once every way is valid, and therefore
    /// tracked.
    pub fn rotate(&mut self) -> usize {
        let way = self.head;
        self.move_to_back(way);
        way
    }

    /// Iterates from the front (next victim) to the back
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let mut current = self.head;
        std::iter::from_fn(move || {
            if current == NIL {
                return None;
            }
            let way = current;
            current = self.next[way];
            Some(way)
        })
    }

    fn unlink(&mut self, way: usize) {
        let (prev, next) = (self.prev[way], self.next[way]);
        if prev == NIL {
            self.head = next;
        } else {
            self.next[prev] = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.prev[next] = prev;
        }
        self.prev[way] = NIL;
        self.next[way] = NIL;
        self.linked[way] = false;
        self.len -= 1;
    }
}

/// Random replacement. Any way of a full set is equally likely to be evicted
///
/// Keeps no ordering, the choice comes entirely from the pseudorandom source passed in by the
/// controller, so a seeded source gives a reproducible run
#[derive(Debug, Clone)]
pub struct Random {
    ways: usize,
}

impl ReplacementPolicy for Random {
    fn new(associativity: usize) -> Self {
        Self { ways: associativity }
    }

    fn update_on_fill(&mut self, _way: usize) {}

    fn get_victim<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        rng.gen_range(0..self.ways)
    }
}

/// First in, first out replacement
///
/// Ways are queued in the order they were filled, hits never reorder the queue
#[derive(Debug, Clone)]
pub struct Fifo {
    order: OrderList,
}

impl Fifo {
    pub fn order(&self) -> &OrderList {
        &self.order
    }
}

impl ReplacementPolicy for Fifo {
    fn new(associativity: usize) -> Self {
        Self {
            order: OrderList::new(associativity),
        }
    }

    fn update_on_fill(&mut self, way: usize) {
        self.order.push_back(way);
    }

    fn get_victim<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> usize {
        // The reused way holds the newest block, so it rejoins at the back
        self.order.rotate()
    }
}

/// Least Recently Used replacement policy
///
/// The front of the list is the least recently used way, every hit and every fill moves a way to
/// the back
#[derive(Debug, Clone)]
pub struct LeastRecentlyUsed {
    order: OrderList,
}

impl LeastRecentlyUsed {
    pub fn order(&self) -> &OrderList {
        &self.order
    }
}

impl ReplacementPolicy for LeastRecentlyUsed {
    fn new(associativity: usize) -> Self {
        Self {
            order: OrderList::new(associativity),
        }
    }

    fn update_on_hit(&mut self, way: usize) {
        self.order.move_to_back(way);
    }

    fn update_on_fill(&mut self, way: usize) {
        self.order.push_back(way);
    }

    fn get_victim<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> usize {
        self.order.rotate()
    }
}
