//! # Change Notification
//!
//! Observers registered on a [`Menu`] hear about every successful toggle.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Observer Lifecycle                                   │
//! │                                                                         │
//! │  menu.subscribe(callback) ──► Subscription (handle)                     │
//! │                                                                         │
//! │  menu.toggle_tax(id)                                                    │
//! │     │ flag flipped                                                      │
//! │     ▼                                                                   │
//! │  callback(&MenuEvent, &Menu)   ◄── synchronous, before toggle returns   │
//! │                                                                         │
//! │  drop(subscription) or subscription.cancel()                            │
//! │     └──► callback removed; later toggles skip it                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callbacks get `&Menu`, never `&mut Menu`, so a callback cannot toggle the
//! menu that is notifying it.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tally_core::{DiscountId, ItemId, MenuId, TaxId};

use crate::menu::Menu;

/// Callback invoked after a menu change.
pub type Listener = Arc<dyn Fn(&MenuEvent, &Menu) + Send + Sync>;

/// What flipped. Collaborators only need to know that *something* did and
/// recompute; the detail is for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChange {
    TaxToggled(TaxId),
    DiscountToggled(DiscountId),
    ItemExemptionToggled(ItemId),
}

/// Notification delivered to observers: "menu `menu_id` changed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEvent {
    pub menu_id: MenuId,
    pub change: MenuChange,
}

// =============================================================================
// Registry
// =============================================================================

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    // The registry is a plain list; a panic mid-callback cannot leave it torn.
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The observer list owned by a menu.
#[derive(Default)]
pub(crate) struct Observers {
    registry: Arc<Mutex<Registry>>,
}

impl Observers {
    pub(crate) fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&MenuEvent, &Menu) + Send + Sync + 'static,
    {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(callback)));

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Calls every current listener in subscription order.
    ///
    /// The list is copied out first, so a callback may subscribe or drop a
    /// subscription without deadlocking.
    pub(crate) fn notify(&self, event: &MenuEvent, menu: &Menu) {
        let listeners: Vec<Listener> = lock(&self.registry)
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(event, menu);
        }
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.registry).listeners.len()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers").field("count", &self.len()).finish()
    }
}

// =============================================================================
// Subscription
// =============================================================================

/// Cancellation handle for a menu observer.
///
/// The observer stays registered for as long as this handle lives.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Unsubscribes now. Same as dropping the handle.
    pub fn cancel(self) {}

    /// False once the menu itself has been dropped.
    pub fn is_active(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let active = lock(&registry)
            .listeners
            .iter()
            .any(|(id, _)| *id == self.id);
        active
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
