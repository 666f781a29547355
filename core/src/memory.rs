//! Transient Arena

use bumpalo::Bump;
use std::alloc::Layout;
use std::cell::{Cell, RefCell};
use std::mem::needs_drop;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;
use thiserror::Error;

/// Errors raised by the transient arena.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    /// Budget would be exceeded by the allocation.
    #[error("arena exhausted: requested {requested} bytes with a budget of {budget} bytes")]
    Exhausted { requested: usize, budget: usize },
}

/// A deferred destructor for a value constructed in the arena.
struct DropEntry {
    ptr: NonNull<u8>,
    drop_fn: unsafe fn(NonNull<u8>),
}

/// Drops a `T` in place.
unsafe fn drop_in_place<T>(ptr: NonNull<u8>) {
    std::ptr::drop_in_place(ptr.cast::<T>().as_ptr());
}

/// Fixed-budget bump allocator for per-bounce scratch objects.
///
/// All storage is reserved up front. Allocations never grow the arena; an
/// allocation that does not fit fails with `ArenaError::Exhausted`.
/// Everything handed out is invalidated by `clear()`, which the borrow checker
/// enforces by requiring `&mut self`.
pub struct TransientArena {
    /// Underlying bump allocator.
    bump: Bump,

    /// Requested budget in bytes.
    budget: usize,

    /// Bytes requested since the last `clear()`.
    used: Cell<usize>,

    /// Destructors registered by `construct()`, in registration order.
    drops: RefCell<Vec<DropEntry>>,
}

// Values handed out are bound to `&self` and the arena is never shared
// across threads; moving the whole arena to another thread is fine as long as
// everything constructed in it is `Send`.
unsafe impl Send for TransientArena {}

impl TransientArena {
    /// Default budget in bytes.
    pub const DEFAULT_BUDGET: usize = 16384;

    /// Returns a new `TransientArena` with storage for `budget` bytes.
    ///
    /// * `budget` - Capacity in bytes; fixed for the lifetime of the arena.
    pub fn new(budget: usize) -> Self {
        let bump = Bump::with_capacity(budget);
        bump.set_allocation_limit(Some(bump.allocated_bytes()));
        debug!(
            "Transient arena created with {} bytes ({} reserved)",
            budget,
            bump.allocated_bytes()
        );
        Self {
            bump,
            budget,
            used: Cell::new(0),
            drops: RefCell::new(Vec::new()),
        }
    }

    /// Returns the budget in bytes.
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Returns the number of bytes handed out since the last `clear()`,
    /// excluding alignment padding.
    pub fn used(&self) -> usize {
        self.used.get()
    }

    /// Returns the number of destructors pending until the next `clear()`.
    pub fn pending_drops(&self) -> usize {
        self.drops.borrow().len()
    }

    /// Allocate raw bytes.
    ///
    /// * `layout` - Size and alignment of the allocation.
    pub fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, ArenaError> {
        self.check(layout.size())?;
        let p = self
            .bump
            .try_alloc_layout(layout)
            .map_err(|_| self.exhausted(layout.size()))?;
        self.record(layout.size());
        Ok(p)
    }

    /// Allocate a plain value that has no destructor.
    ///
    /// * `value` - The value to move into the arena.
    pub fn alloc<T: Copy>(&self, value: T) -> Result<&mut T, ArenaError> {
        self.check(std::mem::size_of::<T>())?;
        let v = self
            .bump
            .try_alloc(value)
            .map_err(|_| self.exhausted(std::mem::size_of::<T>()))?;
        self.record(std::mem::size_of::<T>());
        Ok(v)
    }

    /// Allocate a value and register its destructor to run on `clear()`.
    ///
    /// * `value` - The value to move into the arena.
    pub fn construct<T: Send + 'static>(&self, value: T) -> Result<&mut T, ArenaError> {
        self.check(std::mem::size_of::<T>())?;
        let v = self
            .bump
            .try_alloc(value)
            .map_err(|_| self.exhausted(std::mem::size_of::<T>()))?;
        self.record(std::mem::size_of::<T>());
        if needs_drop::<T>() {
            self.drops.borrow_mut().push(DropEntry {
                ptr: NonNull::from(&mut *v).cast::<u8>(),
                drop_fn: drop_in_place::<T>,
            });
        }
        Ok(v)
    }

    /// Run all pending destructors in registration order and reset the
    /// allocator to empty. Storage is retained.
    pub fn clear(&mut self) {
        self.run_drops();
        self.bump.reset();
        self.used.set(0);
    }

    /// Returns a guard that clears the arena when dropped.
    pub fn scope(&mut self) -> ArenaScope<'_> {
        ArenaScope { arena: self }
    }

    fn run_drops(&mut self) {
        for entry in self.drops.get_mut().drain(..) {
            // SAFETY: each entry was registered for a live `T` in this arena
            // and is drained exactly once before the memory is reset.
            unsafe { (entry.drop_fn)(entry.ptr) };
        }
    }

    fn check(&self, bytes: usize) -> Result<(), ArenaError> {
        if self.used.get() + bytes > self.budget {
            Err(self.exhausted(bytes))
        } else {
            Ok(())
        }
    }

    fn record(&self, bytes: usize) {
        self.used.set(self.used.get() + bytes);
    }

    fn exhausted(&self, requested: usize) -> ArenaError {
        ArenaError::Exhausted {
            requested,
            budget: self.budget,
        }
    }
}

impl Default for TransientArena {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BUDGET)
    }
}

impl Drop for TransientArena {
    fn drop(&mut self) {
        self.run_drops();
    }
}

/// Clears its arena when dropped. One scope covers one path bounce.
pub struct ArenaScope<'a> {
    arena: &'a mut TransientArena,
}

impl<'a> Deref for ArenaScope<'a> {
    type Target = TransientArena;

    fn deref(&self) -> &Self::Target {
        self.arena
    }
}

impl<'a> DerefMut for ArenaScope<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.arena
    }
}

impl<'a> Drop for ArenaScope<'a> {
    fn drop(&mut self) {
        self.arena.clear();
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct Tracked {
        id: usize,
        log: Arc<Mutex<Vec<usize>>>,
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.log.lock().unwrap().push(self.id);
        }
    }

    struct Counted(Arc<AtomicUsize>);

    impl Drop for Counted {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn fill(arena: &TransientArena) -> usize {
        let mut n = 0;
        while arena.alloc([0u64; 4]).is_ok() {
            n += 1;
        }
        n
    }

    #[test]
    fn alloc_returns_value() {
        let arena = TransientArena::new(1024);
        let v = arena.alloc(42_u32).unwrap();
        assert_eq!(*v, 42);
        *v = 7;
        assert_eq!(*v, 7);
        assert!(arena.used() >= 4);
    }

    #[test]
    fn oversized_allocation_fails() {
        let arena = TransientArena::new(64);
        let r = arena.alloc([0u8; 4096]);
        assert!(matches!(r, Err(ArenaError::Exhausted { requested: 4096, .. })));
    }

    #[test]
    fn raw_allocation_respects_alignment() {
        let arena = TransientArena::new(256);
        let _ = arena.alloc(1_u8).unwrap();
        let p = arena.allocate(Layout::from_size_align(16, 16).unwrap()).unwrap();
        assert_eq!(p.as_ptr() as usize % 16, 0);
    }

    #[test]
    fn destructors_run_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut arena = TransientArena::new(1024);
        for id in 0..3 {
            arena
                .construct(Tracked {
                    id,
                    log: Arc::clone(&log),
                })
                .unwrap();
        }
        assert_eq!(arena.pending_drops(), 3);
        assert!(log.lock().unwrap().is_empty());

        arena.clear();
        assert_eq!(*log.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(arena.pending_drops(), 0);
    }

    #[test]
    fn trivially_destructible_values_not_registered() {
        let arena = TransientArena::new(1024);
        arena.construct(5_u64).unwrap();
        assert_eq!(arena.pending_drops(), 0);
    }

    #[test]
    fn dropping_arena_runs_pending_destructors() {
        let count = Arc::new(AtomicUsize::new(0));
        {
            let arena = TransientArena::new(1024);
            arena.construct(Counted(Arc::clone(&count))).unwrap();
            arena.construct(Counted(Arc::clone(&count))).unwrap();
        }
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn scope_clears_on_exit() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut arena = TransientArena::new(1024);
        {
            let scope = arena.scope();
            scope.construct(Counted(Arc::clone(&count))).unwrap();
            assert!(scope.used() > 0);
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn capacity_is_restored_by_clear() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut arena = TransientArena::new(2048);

        let first = fill(&arena);
        assert!(first > 0);
        arena.construct(Counted(Arc::clone(&count))).ok();
        arena.clear();

        let second = fill(&arena);
        assert_eq!(first, second);
        arena.clear();

        let third = fill(&arena);
        assert_eq!(first, third);
    }

    #[test]
    fn clear_on_empty_arena_is_harmless() {
        let mut arena = TransientArena::new(128);
        arena.clear();
        arena.clear();
        assert_eq!(arena.used(), 0);
        assert!(arena.alloc(1_u32).is_ok());
    }
}
