use std::collections::HashMap;
use std::fmt;

use super::Navigator;

/// Generation-checked reference to a navigator slot.
///
/// A handle never keeps its navigator alive. Once the navigator is released
/// the slot's generation moves on and every old handle goes stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavigatorHandle {
    index: usize,
    generation: u32,
}

impl fmt::Display for NavigatorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nav#{}.{}", self.index, self.generation)
    }
}

enum SlotState {
    Vacant,
    Live(Box<dyn Navigator>),
    /// Taken out for the duration of a call into the navigator.
    CheckedOut,
}

struct Slot {
    generation: u32,
    state: SlotState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutError {
    Stale,
    Busy,
}

/// Owns every registered navigator and indexes them by id.
#[derive(Default)]
pub struct NavigatorArena {
    slots: Vec<Slot>,
    free: Vec<usize>,
    by_id: HashMap<String, NavigatorHandle>,
    next_generated: u64,
    live: usize,
}

impl fmt::Debug for NavigatorArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigatorArena")
            .field("live", &self.live)
            .field("ids", &self.by_id.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl NavigatorArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh default id for a navigator that was not named explicitly.
    pub fn next_id(&mut self) -> String {
        self.next_generated += 1;
        format!("navigator-{}", self.next_generated)
    }

    /// Take ownership of `navigator`. Its id now resolves to the new handle,
    /// replacing any earlier navigator registered under the same id.
    pub fn insert(&mut self, navigator: Box<dyn Navigator>) -> NavigatorHandle {
        let id = navigator.id().to_string();
        let handle = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.state = SlotState::Live(navigator);
                NavigatorHandle {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    state: SlotState::Live(navigator),
                });
                NavigatorHandle {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        };
        self.live += 1;
        self.by_id.insert(id, handle);
        handle
    }

    fn slot(&self, handle: NavigatorHandle) -> Option<&Slot> {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation)
    }

    fn slot_mut(&mut self, handle: NavigatorHandle) -> Option<&mut Slot> {
        self.slots
            .get_mut(handle.index)
            .filter(|slot| slot.generation == handle.generation)
    }

    /// Weak lookup by id. `None` once the navigator is gone.
    pub fn lookup(&self, id: &str) -> Option<NavigatorHandle> {
        self.by_id
            .get(id)
            .copied()
            .filter(|handle| self.is_live(*handle))
    }

    pub fn is_live(&self, handle: NavigatorHandle) -> bool {
        self.slot(handle)
            .is_some_and(|slot| !matches!(slot.state, SlotState::Vacant))
    }

    pub fn is_checked_out(&self, handle: NavigatorHandle) -> bool {
        self.slot(handle)
            .is_some_and(|slot| matches!(slot.state, SlotState::CheckedOut))
    }

    pub fn get(&self, handle: NavigatorHandle) -> Option<&dyn Navigator> {
        match &self.slot(handle)?.state {
            SlotState::Live(navigator) => Some(navigator.as_ref()),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, handle: NavigatorHandle) -> Option<&mut (dyn Navigator + 'static)> {
        match &mut self.slot_mut(handle)?.state {
            SlotState::Live(navigator) => Some(navigator.as_mut()),
            _ => None,
        }
    }

    pub fn checkout(
        &mut self,
        handle: NavigatorHandle,
    ) -> Result<Box<dyn Navigator>, CheckoutError> {
        let slot = self.slot_mut(handle).ok_or(CheckoutError::Stale)?;
        match std::mem::replace(&mut slot.state, SlotState::CheckedOut) {
            SlotState::Live(navigator) => Ok(navigator),
            SlotState::CheckedOut => Err(CheckoutError::Busy),
            SlotState::Vacant => {
                slot.state = SlotState::Vacant;
                Err(CheckoutError::Stale)
            }
        }
    }

    /// Put a checked-out navigator back. If its slot was released in the
    /// meantime the navigator is handed back so the caller can dispose of it.
    pub fn restore(
        &mut self,
        handle: NavigatorHandle,
        navigator: Box<dyn Navigator>,
    ) -> Option<Box<dyn Navigator>> {
        match self.slot_mut(handle) {
            Some(slot) if matches!(slot.state, SlotState::CheckedOut) => {
                slot.state = SlotState::Live(navigator);
                None
            }
            _ => Some(navigator),
        }
    }

    /// Free the slot and invalidate every handle to it.
    ///
    /// Returns the navigator if it was resident. A checked-out navigator is
    /// orphaned instead and comes back from [`restore`](Self::restore).
    pub fn release(&mut self, handle: NavigatorHandle) -> Option<Box<dyn Navigator>> {
        let slot = self.slot_mut(handle)?;
        let previous = std::mem::replace(&mut slot.state, SlotState::Vacant);
        if matches!(previous, SlotState::Vacant) {
            return None;
        }
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.live -= 1;
        self.by_id.retain(|_, entry| *entry != handle);

        match previous {
            SlotState::Live(navigator) => Some(navigator),
            _ => None,
        }
    }

    /// Re-key `handle` under `id`. The old id stops resolving.
    pub fn rename(&mut self, handle: NavigatorHandle, id: &str) -> bool {
        if !self.is_live(handle) {
            return false;
        }
        self.by_id.retain(|_, entry| *entry != handle);
        self.by_id.insert(id.to_string(), handle);
        true
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.by_id.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::{NavigatorCore, SwapNavigator};
    use crate::test_support::Harness;

    fn swap(h: &mut Harness, id: &str) -> Box<dyn Navigator> {
        let mut navigator = SwapNavigator::new(&mut h.cx, "Landing");
        navigator.set_id(id);
        Box::new(navigator)
    }

    #[test]
    fn lookup_goes_stale_after_release() {
        let mut h = Harness::new();
        let mut arena = NavigatorArena::new();
        let handle = arena.insert(swap(&mut h, "Auth"));

        assert_eq!(arena.lookup("Auth"), Some(handle));
        assert!(arena.release(handle).is_some());
        assert_eq!(arena.lookup("Auth"), None);
        assert!(arena.get(handle).is_none());
        assert!(arena.release(handle).is_none());
    }

    #[test]
    fn reused_slot_does_not_revive_old_handle() {
        let mut h = Harness::new();
        let mut arena = NavigatorArena::new();
        let first = arena.insert(swap(&mut h, "A"));
        arena.release(first);
        let second = arena.insert(swap(&mut h, "B"));

        assert_ne!(first, second);
        assert!(!arena.is_live(first));
        assert_eq!(arena.get(second).map(|nav| nav.id()), Some("B"));
    }

    #[test]
    fn checked_out_navigator_reports_busy() {
        let mut h = Harness::new();
        let mut arena = NavigatorArena::new();
        let handle = arena.insert(swap(&mut h, "Root"));

        let navigator = arena.checkout(handle).ok().unwrap();
        assert_eq!(arena.checkout(handle).err(), Some(CheckoutError::Busy));
        assert_eq!(arena.lookup("Root"), Some(handle));
        assert!(arena.restore(handle, navigator).is_none());
        assert!(arena.get(handle).is_some());
    }

    #[test]
    fn release_while_checked_out_orphans_navigator() {
        let mut h = Harness::new();
        let mut arena = NavigatorArena::new();
        let handle = arena.insert(swap(&mut h, "Root"));

        let navigator = arena.checkout(handle).ok().unwrap();
        assert!(arena.release(handle).is_none());
        assert!(arena.restore(handle, navigator).is_some());
        assert!(arena.is_empty());
    }

    #[test]
    fn rename_rekeys_entry() {
        let mut h = Harness::new();
        let mut arena = NavigatorArena::new();
        let handle = arena.insert(swap(&mut h, "old"));
        assert!(arena.rename(handle, "new"));
        assert_eq!(arena.lookup("old"), None);
        assert_eq!(arena.lookup("new"), Some(handle));
    }

    #[test]
    fn generated_ids_are_unique() {
        let mut arena = NavigatorArena::new();
        let a = NavigatorCore::with_id(arena.next_id());
        let b = NavigatorCore::with_id(arena.next_id());
        assert_ne!(a.id(), b.id());
    }
}
