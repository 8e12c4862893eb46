//! Lazy identifier allocation.
//!
//! Anonymous node patterns only receive a generated name when something
//! references them: a property access, a projection, or an explicit
//! [`NodePattern::identifier`](crate::ast::NodePattern::identifier) call.
//! Names come from an [`IdentifierAllocator`], which maps a monotonically
//! increasing counter through the configured name pool.
//!
//! Each node owns a [`LazyIdentifier`] slot shared by all of its clones and
//! copy-on-write derivatives. The slot is written at most once, so the first
//! reference wins and every later reference observes the same name.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, OnceLock};

use smol_str::SmolStr;
use tracing::trace;

use crate::ast::label::Labels;
use crate::ast::pattern::NodePattern;
use crate::config::NamingConfig;

static SHARED: LazyLock<IdentifierAllocator> = LazyLock::new(IdentifierAllocator::new);

#[derive(Debug)]
struct AllocatorState {
    next: AtomicUsize,
    config: NamingConfig,
}

/// Thread-safe generator of fresh node identifiers.
///
/// Cloning the allocator yields another handle onto the same counter.
#[derive(Debug, Clone)]
pub struct IdentifierAllocator {
    state: Arc<AllocatorState>,
}

impl Default for IdentifierAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierAllocator {
    /// Creates an allocator with the default name pool.
    pub fn new() -> Self {
        Self::with_config(NamingConfig::default())
    }

    /// Creates an allocator with a custom naming configuration.
    pub fn with_config(config: NamingConfig) -> Self {
        Self {
            state: Arc::new(AllocatorState {
                next: AtomicUsize::new(0),
                config,
            }),
        }
    }

    /// Process-wide allocator used by [`node`](crate::node).
    pub fn shared() -> IdentifierAllocator {
        SHARED.clone()
    }

    /// Moves the counter to `index`.
    pub fn starting_at(self, index: usize) -> Self {
        self.state.next.store(index, Ordering::SeqCst);
        self
    }

    /// Returns the next name and advances the counter.
    pub fn allocate(&self) -> SmolStr {
        let index = self.state.next.fetch_add(1, Ordering::SeqCst);
        let name = self.state.config.name_at(index);
        trace!(index, name = %name, "allocated lazy identifier");
        name
    }

    /// Number of names handed out since creation or the last reset.
    pub fn allocated(&self) -> usize {
        self.state.next.load(Ordering::SeqCst)
    }

    /// Rewinds the counter to zero.
    pub fn reset(&self) {
        self.state.next.store(0, Ordering::SeqCst);
    }

    /// Naming configuration in use.
    pub fn config(&self) -> &NamingConfig {
        &self.state.config
    }

    /// Returns true if both handles share one counter.
    pub fn ptr_eq(&self, other: &IdentifierAllocator) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Anonymous node with `labels`, named from this allocator.
    pub fn node(&self, labels: impl Into<Labels>) -> NodePattern {
        NodePattern::with_allocator(self).with_labels(labels)
    }
}

/// Write-once identity slot of a node pattern.
#[derive(Debug)]
pub struct LazyIdentifier {
    name: OnceLock<SmolStr>,
    allocator: IdentifierAllocator,
}

impl LazyIdentifier {
    /// Creates an empty slot drawing from `allocator`.
    pub fn new(allocator: IdentifierAllocator) -> Arc<Self> {
        Arc::new(Self {
            name: OnceLock::new(),
            allocator,
        })
    }

    /// Returns the assigned name without allocating.
    pub fn peek(&self) -> Option<&SmolStr> {
        self.name.get()
    }

    /// Returns the assigned name, allocating one on first use.
    pub fn get_or_assign(&self) -> &SmolStr {
        self.name.get_or_init(|| self.allocator.allocate())
    }

    /// Allocator backing this slot.
    pub fn allocator(&self) -> &IdentifierAllocator {
        &self.allocator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_in_pool_order() {
        let alloc = IdentifierAllocator::new();
        assert_eq!(alloc.allocate(), "_node_bolden");
        assert_eq!(alloc.allocate(), "_node_morton");
        assert_eq!(alloc.allocated(), 2);

        alloc.reset();
        assert_eq!(alloc.allocate(), "_node_bolden");
    }

    #[test]
    fn starting_at_skips_ahead() {
        let alloc = IdentifierAllocator::new().starting_at(3);
        assert_eq!(alloc.allocate(), "_node_armstrong");
    }

    #[test]
    fn clones_share_the_counter() {
        let a = IdentifierAllocator::new();
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        a.allocate();
        assert_eq!(b.allocate(), "_node_morton");
        assert!(!a.ptr_eq(&IdentifierAllocator::new()));
    }

    #[test]
    fn slot_assigns_once() {
        let alloc = IdentifierAllocator::new();
        let slot = LazyIdentifier::new(alloc.clone());
        assert!(slot.peek().is_none());
        assert_eq!(slot.get_or_assign(), "_node_bolden");
        assert_eq!(slot.get_or_assign(), "_node_bolden");
        assert_eq!(slot.peek().map(SmolStr::as_str), Some("_node_bolden"));
        assert_eq!(alloc.allocated(), 1);
    }

    #[test]
    fn concurrent_first_reference_allocates_once() {
        let alloc = IdentifierAllocator::new();
        let slot = LazyIdentifier::new(alloc.clone());
        let names: Vec<SmolStr> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| slot.get_or_assign().clone()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(names.iter().all(|n| n == "_node_bolden"));
        assert_eq!(alloc.allocated(), 1);
    }

    #[test]
    fn allocator_builds_anonymous_nodes() {
        let alloc = IdentifierAllocator::new();
        let person = alloc.node("Person");
        assert_eq!(person.to_string(), "(:Person)");
        assert_eq!(person.identifier(), "_node_bolden");
        assert_eq!(person.to_string(), "(_node_bolden:Person)");
    }

    #[test]
    fn custom_config() {
        let alloc =
            IdentifierAllocator::with_config(NamingConfig::new().with_pool(["x"]).with_prefix("v_"));
        assert_eq!(alloc.allocate(), "v_x");
        assert_eq!(alloc.allocate(), "v_jazzcat1");
        assert_eq!(alloc.config().prefix, "v_");
    }
}
