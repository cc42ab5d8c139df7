//! # Register
//!
//! The order being rung up at one register.
//!
//! Order lines are copies of menu items taken when they are rung up, so
//! flipping an order line's exemption leaves the menu alone. Taxes and
//! discounts are read live from the shared menu each time totals are asked
//! for.
//!
//! ## Refresh Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Register ⇄ Menu                                      │
//! │                                                                         │
//! │  rule picker ──► SharedMenu::toggle_tax ──► observer ──► refresh = true │
//! │                                                                         │
//! │  display loop ──► register.take_refresh() ──► register.totals()        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tally_core::{discount, AppliedDiscount, Item, ItemId, Totals};
use tracing::debug;

use crate::observer::Subscription;
use crate::shared::SharedMenu;

/// Order-taking collaborator bound to one shared menu.
#[derive(Debug)]
pub struct Register {
    menu: SharedMenu,
    order: Vec<Item>,
    opened_at: DateTime<Utc>,
    refresh: Arc<AtomicBool>,
    _subscription: Subscription,
}

impl Register {
    /// Opens an empty order and starts listening for menu changes.
    pub fn new(menu: SharedMenu) -> Self {
        let refresh = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&refresh);
        let subscription = menu.subscribe(move |event, _| {
            debug!(change = ?event.change, "Menu changed, totals need refresh");
            flag.store(true, Ordering::SeqCst);
        });

        Register {
            menu,
            order: Vec::new(),
            opened_at: Utc::now(),
            refresh,
            _subscription: subscription,
        }
    }

    pub fn menu(&self) -> &SharedMenu {
        &self.menu
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn order(&self) -> &[Item] {
        &self.order
    }

    /// Rings up the menu item `id`. Returns its position on the order.
    pub fn add_item(&mut self, id: ItemId) -> Option<usize> {
        let item = self.menu.item(id)?;
        Some(self.push(item))
    }

    /// Rings up the first menu item called `name`.
    pub fn add_item_named(&mut self, name: &str) -> Option<usize> {
        let item = self.menu.find_item(name)?;
        Some(self.push(item))
    }

    fn push(&mut self, item: Item) -> usize {
        debug!(item = %item.name, price = %item.price, "Item rung up");
        self.order.push(item);
        self.order.len() - 1
    }

    /// Removes the order line at `index`.
    pub fn remove_item(&mut self, index: usize) -> Option<Item> {
        if index >= self.order.len() {
            return None;
        }
        Some(self.order.remove(index))
    }

    /// Flips the exemption on one order line and returns the new value.
    pub fn toggle_item_exemption(&mut self, index: usize) -> Option<bool> {
        self.order.get_mut(index).map(Item::toggle_tax_exempt)
    }

    /// Display label for an order line, marking exempt lines.
    pub fn line_label(&self, index: usize) -> Option<String> {
        self.order.get(index).map(|item| {
            if item.is_tax_exempt {
                format!("{} (No Tax)", item.name)
            } else {
                item.name.clone()
            }
        })
    }

    /// Totals for the open order under the menu's current rules.
    pub fn totals(&self) -> Totals {
        self.menu.totals_for(&self.order)
    }

    /// How much each discount took off the post-tax amount, in order.
    pub fn discount_breakdown(&self) -> Vec<AppliedDiscount> {
        self.menu.with_menu(|menu| {
            let totals = menu.totals_for(&self.order);
            discount::apply_sequentially(menu.discounts(), totals.subtotal + totals.tax)
        })
    }

    /// True once since the last call if the menu changed in between.
    pub fn take_refresh(&self) -> bool {
        self.refresh.swap(false, Ordering::SeqCst)
    }

    /// Empties the order and restarts its clock.
    pub fn clear(&mut self) {
        self.order.clear();
        self.opened_at = Utc::now();
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
