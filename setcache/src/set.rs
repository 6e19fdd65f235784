use rand::Rng;
use crate::address::Address;
use crate::replacement_policies::ReplacementPolicy;

/// A single cache line. Starts invalid, becomes valid on its first fill and stays valid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Way {
    pub tag: Address,
    pub valid: bool,
}

/// What a set observed for one access, before any global classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Hit,
    /// An empty way was filled
    CompulsoryMiss { way: usize },
    /// The set was full, `evicted_tag` was replaced in `way`
    MissNeedsEviction { way: usize, evicted_tag: Address },
}

/// One set of a set-associative cache, parameterised by its replacement policy
#[derive(Debug, Clone)]
pub struct CacheSet<P: ReplacementPolicy> {
    ways: Vec<Way>,
    policy: P,
}

impl<P: ReplacementPolicy> CacheSet<P> {
    pub fn new(associativity: usize) -> Self {
        Self {
            ways: vec![Way::default(); associativity],
            policy: P::new(associativity),
        }
    }

    /// Looks up a tag, installing it on a miss
    ///
    /// Hits and fills update the replacement policy. When the set is full the policy picks the
    /// victim, drawing from `rng` if it needs randomness.
    ///
    /// # Arguments
    ///
    /// * `tag`: The tag of the requested block
    /// * `rng`: The simulation's pseudorandom source
    ///
    /// returns: Verdict
    pub fn access<R: Rng + ?Sized>(&mut self, tag: Address, rng: &mut R) -> Verdict {
        // Ways fill in order and are never invalidated, so no match can follow an empty way
        for (index, way) in self.ways.iter_mut().enumerate() {
            if !way.valid {
                way.tag = tag;
                way.valid = true;
                self.policy.update_on_fill(index);
                return Verdict::CompulsoryMiss { way: index };
            }
            if way.tag == tag {
                self.policy.update_on_hit(index);
                return Verdict::Hit;
            }
        }
        let victim = self.policy.get_victim(rng);
        let evicted_tag = std::mem::replace(&mut self.ways[victim].tag, tag);
        tracing::trace!(victim, evicted_tag, tag, "evicted block");
        Verdict::MissNeedsEviction {
            way: victim,
            evicted_tag,
        }
    }

    pub fn ways(&self) -> &[Way] {
        &self.ways
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn occupied(&self) -> usize {
        self.ways.iter().filter(|way| way.valid).count()
    }

    pub fn is_full(&self) -> bool {
        self.ways.last().map_or(true, |way| way.valid)
    }

    pub fn contains(&self, tag: Address) -> bool {
        self.ways.iter().any(|way| way.valid && way.tag == tag)
    }
}
