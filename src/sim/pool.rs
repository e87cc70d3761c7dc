//! Fixed-capacity entity pool
//!
//! Entities are allocated once and recycled forever. The pool keeps every
//! spawned entity in a contiguous prefix and every free one in the suffix:
//! - `spawn` takes the last slot and rotates it to the front
//! - `draw` moves retired entities to the back
//!
//! Because of this ordering a free slot is always found at the end and the
//! draw pass can stop at the first unspawned entry.

use std::collections::VecDeque;

/// An entity that can live in an `ObjectPool`
pub trait Poolable {
    /// Data needed to bring one entity to life
    type Spawn;

    fn is_spawned(&self) -> bool;

    /// Activate the entity with `data`. Must leave `is_spawned() == true`.
    fn spawn(&mut self, data: Self::Spawn);

    /// Restore default, inactive values. Must leave `is_spawned() == false`.
    fn reset(&mut self);
}

/// Counters for pool traffic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Spawn requests that activated an entity
    pub accepted: u64,
    /// Spawn requests dropped because no slot was free
    pub dropped: u64,
    /// Entities returned to the free partition
    pub retired: u64,
}

#[derive(Debug, Clone)]
pub struct ObjectPool<T> {
    items: VecDeque<T>,
    stats: PoolStats,
}

impl<T: Poolable> ObjectPool<T> {
    /// Build a pool of `capacity` entities created by `make`
    pub fn new(capacity: usize, mut make: impl FnMut() -> T) -> Self {
        let items = (0..capacity).map(|_| make()).collect();
        Self {
            items,
            stats: PoolStats::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Activate the free entity in the last slot and move it to the front.
    ///
    /// When the last slot is occupied the pool is full and the request is
    /// dropped without touching any entity. Returns whether it was accepted.
    pub fn spawn(&mut self, data: T::Spawn) -> bool {
        match self.items.back_mut() {
            Some(last) if !last.is_spawned() => {
                last.spawn(data);
                debug_assert!(last.is_spawned());
                if let Some(item) = self.items.pop_back() {
                    self.items.push_front(item);
                }
                self.stats.accepted += 1;
                true
            }
            _ => {
                self.stats.dropped += 1;
                log::debug!("Pool full ({} slots), spawn dropped", self.items.len());
                false
            }
        }
    }

    /// Step every spawned entity once.
    ///
    /// `step` returns true when the entity should retire; it is then reset
    /// and moved to the end of the pool.
    pub fn draw(&mut self, mut step: impl FnMut(&mut T) -> bool) {
        let mut i = 0;
        // Retiring shrinks the live prefix by one, so `live` bounds the loop
        let mut live = self.spawned_count();
        while i < live {
            let retire = step(&mut self.items[i]);
            if retire {
                if let Some(mut item) = self.items.remove(i) {
                    item.reset();
                    debug_assert!(!item.is_spawned());
                    self.items.push_back(item);
                }
                self.stats.retired += 1;
                live -= 1;
                // The next entity shifted into slot i
            } else {
                i += 1;
            }
        }
        debug_assert!(self.is_partitioned());
    }

    /// Number of spawned entities (length of the live prefix)
    pub fn spawned_count(&self) -> usize {
        self.items.iter().take_while(|e| e.is_spawned()).count()
    }

    pub fn is_full(&self) -> bool {
        self.items.back().is_none_or(|e| e.is_spawned())
    }

    pub fn iter_spawned(&self) -> impl Iterator<Item = &T> {
        self.items.iter().take_while(|e| e.is_spawned())
    }

    pub fn iter_spawned_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut().take_while(|e| e.is_spawned())
    }

    /// All entities in pool order, spawned or not
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// True when no free entity precedes a spawned one
    pub fn is_partitioned(&self) -> bool {
        let live = self.spawned_count();
        self.items.iter().skip(live).all(|e| !e.is_spawned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Entity that retires after `ttl` steps
    #[derive(Debug, Clone, Default, PartialEq)]
    struct Token {
        id: u32,
        spawned: bool,
        ttl: u32,
        steps: u32,
    }

    impl Poolable for Token {
        type Spawn = u32;

        fn is_spawned(&self) -> bool {
            self.spawned
        }

        fn spawn(&mut self, ttl: u32) {
            self.spawned = true;
            self.ttl = ttl;
            self.steps = 0;
        }

        fn reset(&mut self) {
            self.spawned = false;
            self.ttl = 0;
            self.steps = 0;
        }
    }

    fn token_pool(capacity: usize) -> ObjectPool<Token> {
        let mut next = 0;
        ObjectPool::new(capacity, || {
            next += 1;
            Token {
                id: next,
                ..Default::default()
            }
        })
    }

    fn step(token: &mut Token) -> bool {
        token.steps += 1;
        token.steps >= token.ttl
    }

    #[test]
    fn test_spawn_rotates_last_slot_to_front() {
        let mut pool = token_pool(3);
        let ids: Vec<u32> = pool.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        assert!(pool.spawn(5));
        let ids: Vec<u32> = pool.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(pool.spawned_count(), 1);
        assert!(pool.is_partitioned());
    }

    #[test]
    fn test_full_pool_drops_spawn_unchanged() {
        let mut pool = token_pool(2);
        assert!(pool.spawn(10));
        assert!(pool.spawn(20));
        assert!(pool.is_full());

        let before: Vec<Token> = pool.iter().cloned().collect();
        assert!(!pool.spawn(99));
        let after: Vec<Token> = pool.iter().cloned().collect();
        assert_eq!(before, after);
        assert_eq!(pool.stats().dropped, 1);
        assert_eq!(pool.stats().accepted, 2);
    }

    #[test]
    fn test_zero_capacity_pool_drops_everything() {
        let mut pool = token_pool(0);
        assert!(pool.is_full());
        assert!(!pool.spawn(1));
        pool.draw(step);
        assert_eq!(pool.spawned_count(), 0);
    }

    #[test]
    fn test_draw_retires_to_back() {
        let mut pool = token_pool(4);
        pool.spawn(1); // retires on the first step
        pool.spawn(3);
        pool.spawn(1);
        assert_eq!(pool.spawned_count(), 3);

        pool.draw(step);
        assert_eq!(pool.spawned_count(), 1);
        assert_eq!(pool.stats().retired, 2);
        assert!(pool.is_partitioned());
        let survivor = pool.iter_spawned().next().unwrap();
        assert_eq!(survivor.ttl, 3);
    }

    #[test]
    fn test_draw_steps_each_live_entity_once() {
        let mut pool = token_pool(4);
        for _ in 0..4 {
            pool.spawn(1);
        }
        let mut calls = 0;
        pool.draw(|t| {
            calls += 1;
            step(t)
        });
        // Every entity retired and each was visited exactly once
        assert_eq!(calls, 4);
        assert_eq!(pool.spawned_count(), 0);
    }

    #[test]
    fn test_draw_stops_at_first_unspawned() {
        let mut pool = token_pool(5);
        pool.spawn(10);
        pool.spawn(10);
        let mut calls = 0;
        pool.draw(|_| {
            calls += 1;
            false
        });
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_retired_slot_is_reused() {
        let mut pool = token_pool(1);
        assert!(pool.spawn(1));
        assert!(!pool.spawn(1));
        pool.draw(step);
        assert!(pool.spawn(1));
        assert_eq!(pool.stats().accepted, 2);
    }

    proptest! {
        #[test]
        fn prop_spawned_entries_stay_contiguous(
            capacity in 0usize..10,
            ops in prop::collection::vec((any::<bool>(), 1u32..5), 0..200),
        ) {
            let mut pool = token_pool(capacity);
            for (is_spawn, ttl) in ops {
                if is_spawn {
                    let was_full = pool.is_full();
                    let before: Vec<Token> = pool.iter().cloned().collect();
                    let accepted = pool.spawn(ttl);
                    prop_assert_eq!(accepted, !was_full);
                    if !accepted {
                        let after: Vec<Token> = pool.iter().cloned().collect();
                        prop_assert_eq!(before, after);
                    }
                } else {
                    pool.draw(step);
                }
                prop_assert!(pool.is_partitioned());
                prop_assert!(pool.spawned_count() <= capacity);
            }
        }
    }
}
