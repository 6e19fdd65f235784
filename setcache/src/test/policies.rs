//! Victim selection for each policy, driven through a single cache set

use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use crate::replacement_policies::{Fifo, LeastRecentlyUsed, OrderList, Random, ReplacementPolicy};
use crate::set::{CacheSet, Verdict};

const A: u32 = 0xa;
const B: u32 = 0xb;
const C: u32 = 0xc;
const D: u32 = 0xd;

fn run<P: ReplacementPolicy>(set: &mut CacheSet<P>, tags: &[u32]) -> Vec<Verdict> {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    tags.iter().map(|&tag| set.access(tag, &mut rng)).collect()
}

#[test]
fn order_list_tracks_each_way_once() {
    let mut order = OrderList::new(4);
    assert!(order.is_empty());
    assert_eq!(order.front(), None);
    for way in [2, 0, 3] {
        order.push_back(way);
    }
    assert_eq!(order.iter().collect::<Vec<_>>(), vec![2, 0, 3]);
    order.move_to_back(2);
    assert_eq!(order.iter().collect::<Vec<_>>(), vec![0, 3, 2]);
    // Already at the back, and an untracked way
    order.move_to_back(2);
    order.move_to_back(1);
    assert_eq!(order.iter().collect::<Vec<_>>(), vec![0, 3, 2]);
    assert!(!order.contains(1));
    assert_eq!(order.rotate(), 0);
    assert_eq!(order.iter().collect::<Vec<_>>(), vec![3, 2, 0]);
    assert_eq!(order.len(), 3);
    assert_eq!(order.front(), Some(3));
}

#[test]
fn order_list_single_way() {
    let mut order = OrderList::new(1);
    order.push_back(0);
    assert_eq!(order.rotate(), 0);
    assert_eq!(order.rotate(), 0);
    assert_eq!(order.iter().collect::<Vec<_>>(), vec![0]);
}

#[test]
fn lru_hit_promotes_over_older_ways() {
    let mut set = CacheSet::<LeastRecentlyUsed>::new(3);
    let verdicts = run(&mut set, &[A, B, C, A, D]);
    assert_eq!(verdicts[..3], [
        Verdict::CompulsoryMiss { way: 0 },
        Verdict::CompulsoryMiss { way: 1 },
        Verdict::CompulsoryMiss { way: 2 },
    ]);
    assert_eq!(verdicts[3], Verdict::Hit);
    assert_eq!(verdicts[4], Verdict::MissNeedsEviction { way: 1, evicted_tag: B });
    assert!(set.contains(A) && set.contains(C) && set.contains(D));
    assert!(!set.contains(B));
    // A was promoted by its hit, so C is now the least recently used
    assert_eq!(set.policy().order().iter().collect::<Vec<_>>(), vec![2, 0, 1]);
}

#[test]
fn fifo_ignores_hits() {
    let mut set = CacheSet::<Fifo>::new(3);
    let verdicts = run(&mut set, &[A, B, C, A, D]);
    assert_eq!(verdicts[3], Verdict::Hit);
    assert_eq!(verdicts[4], Verdict::MissNeedsEviction { way: 0, evicted_tag: A });
    assert!(!set.contains(A));
    assert_eq!(set.policy().order().iter().collect::<Vec<_>>(), vec![1, 2, 0]);
}

#[test]
fn fifo_cycles_through_ways() {
    let mut set = CacheSet::<Fifo>::new(2);
    let verdicts = run(&mut set, &[A, B, C, D, A]);
    let victims: Vec<usize> = verdicts
        .iter()
        .filter_map(|v| match v {
            Verdict::MissNeedsEviction { way, .. } => Some(*way),
            _ => None,
        })
        .collect();
    assert_eq!(victims, vec![0, 1, 0]);
}

#[test]
fn order_holds_exactly_the_valid_ways() {
    let mut set = CacheSet::<LeastRecentlyUsed>::new(4);
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    for tag in [1, 2, 1, 3] {
        let _ = set.access(tag, &mut rng);
        let mut tracked: Vec<usize> = set.policy().order().iter().collect();
        tracked.sort();
        let valid: Vec<usize> = (0..4).filter(|&w| set.ways()[w].valid).collect();
        assert_eq!(tracked, valid);
    }
    assert_eq!(set.occupied(), 3);
    assert!(!set.is_full());
}

#[test]
fn random_fills_empty_ways_first() {
    let mut set = CacheSet::<Random>::new(4);
    let verdicts = run(&mut set, &[A, B, C, D]);
    assert!(verdicts.iter().all(|v| matches!(v, Verdict::CompulsoryMiss { .. })));
    assert!(set.is_full());
}

#[test]
fn random_victims_stay_in_the_set() {
    for seed in 0..32 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut set = CacheSet::<Random>::new(4);
        for tag in 0..200u32 {
            match set.access(tag, &mut rng) {
                Verdict::MissNeedsEviction { way, evicted_tag } => {
                    assert!(way < 4);
                    assert!(!set.contains(evicted_tag));
                }
                Verdict::CompulsoryMiss { way } => assert_eq!(way as u32, tag),
                Verdict::Hit => panic!("tag {tag} was never requested before"),
            }
            assert!(set.contains(tag));
        }
    }
}

#[test]
fn random_uses_the_supplied_source() {
    // A source which only ever yields zero always picks the first way
    let mut rng = StepRng::new(0, 0);
    let mut set = CacheSet::<Random>::new(3);
    for tag in 0..3 {
        let _ = set.access(tag, &mut rng);
    }
    assert_eq!(set.access(7, &mut rng), Verdict::MissNeedsEviction { way: 0, evicted_tag: 0 });
    assert_eq!(set.access(8, &mut rng), Verdict::MissNeedsEviction { way: 0, evicted_tag: 7 });
}

#[test]
fn direct_mapped_set_always_replaces_its_only_way() {
    let mut set = CacheSet::<LeastRecentlyUsed>::new(1);
    let verdicts = run(&mut set, &[A, A, B]);
    assert_eq!(verdicts, vec![
        Verdict::CompulsoryMiss { way: 0 },
        Verdict::Hit,
        Verdict::MissNeedsEviction { way: 0, evicted_tag: A },
    ]);
}
