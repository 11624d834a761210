//! Fixed-capacity arena with generation-checked handles

/// Handle to a live slot
///
/// Stale handles (the slot was freed, possibly reused) are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Handle {
    index: u8,
    generation: u16,
}

impl Handle {
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

struct Slot<T> {
    generation: u16,
    value: Option<T>,
}

/// Arena of `N` slots; allocation takes the lowest free slot
pub struct EntityPool<T, const N: usize> {
    slots: [Slot<T>; N],
}

impl<T, const N: usize> Default for EntityPool<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> EntityPool<T, N> {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| Slot {
                generation: 0,
                value: None,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.value.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|s| s.value.is_some())
    }

    /// Place a value in the lowest free slot; `None` when full
    pub fn alloc(&mut self, value: T) -> Option<Handle> {
        let (index, slot) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, s)| s.value.is_none())?;
        slot.value = Some(value);
        Some(Handle {
            index: index as u8,
            generation: slot.generation,
        })
    }

    /// Release a slot and return its value
    pub fn free(&mut self, handle: Handle) -> Option<T> {
        let slot = self.slots.get_mut(handle.index())?;
        if slot.generation != handle.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        Some(value)
    }

    /// Live values with their handles, in slot order
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.value.as_ref().map(|v| {
                (
                    Handle {
                        index: i as u8,
                        generation: s.generation,
                    },
                    v,
                )
            })
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(i, s)| {
            let generation = s.generation;
            s.value.as_mut().map(|v| {
                (
                    Handle {
                        index: i as u8,
                        generation,
                    },
                    v,
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_until_full() {
        let mut pool: EntityPool<u32, 3> = EntityPool::new();
        assert!(pool.alloc(1).is_some());
        assert!(pool.alloc(2).is_some());
        assert!(pool.alloc(3).is_some());
        assert!(pool.is_full());
        assert_eq!(pool.alloc(4), None);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_freed_slot_reused_next() {
        let mut pool: EntityPool<u32, 4> = EntityPool::new();
        let a = pool.alloc(10).unwrap();
        let b = pool.alloc(20).unwrap();
        let _c = pool.alloc(30).unwrap();

        assert_eq!(pool.free(b), Some(20));
        let d = pool.alloc(40).unwrap();
        assert_eq!(d.index(), b.index());

        // Old handle to the reused slot is stale
        assert_eq!(pool.free(b), None);
        let live: [(usize, u32); 3] = [(0, 10), (1, 40), (2, 30)];
        assert!(pool.iter().map(|(h, v)| (h.index(), *v)).eq(live));
        assert_eq!(pool.free(a), Some(10));
    }

    #[test]
    fn test_double_free_rejected() {
        let mut pool: EntityPool<u32, 2> = EntityPool::new();
        let a = pool.alloc(1).unwrap();
        assert_eq!(pool.free(a), Some(1));
        assert_eq!(pool.free(a), None);
    }

    mod props {
        use super::super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Action {
            Alloc,
            Free(usize),
        }

        fn action() -> impl Strategy<Value = Action> {
            prop_oneof![Just(Action::Alloc), (0usize..8).prop_map(Action::Free)]
        }

        proptest! {
            #[test]
            fn slots_hold_at_most_one_live_value(
                actions in proptest::collection::vec(action(), 0..200),
            ) {
                let mut pool: EntityPool<usize, 8> = EntityPool::new();
                let mut live: [Option<Handle>; 8] = [None; 8];
                let mut counter = 0usize;

                for act in actions {
                    match act {
                        Action::Alloc => {
                            let lowest_free = live.iter().position(|h| h.is_none());
                            match pool.alloc(counter) {
                                Some(h) => {
                                    // Lowest free slot, which must have been free
                                    prop_assert_eq!(Some(h.index()), lowest_free);
                                    live[h.index()] = Some(h);
                                }
                                None => prop_assert!(lowest_free.is_none()),
                            }
                            counter += 1;
                        }
                        Action::Free(i) => {
                            if let Some(h) = live[i].take() {
                                prop_assert!(pool.free(h).is_some());
                            }
                        }
                    }

                    let expected = live.iter().filter(|h| h.is_some()).count();
                    prop_assert_eq!(pool.len(), expected);
                    prop_assert_eq!(pool.iter().count(), expected);
                }
            }
        }
    }
}
