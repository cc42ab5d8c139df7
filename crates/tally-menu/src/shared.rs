//! # Shared Menu
//!
//! A cloneable, thread-safe handle to one [`Menu`].
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    SharedMenu Access                                    │
//! │                                                                         │
//! │  Register ─────┐                                                        │
//! │                ├──► Arc<Mutex<Menu>> ──► with_menu / with_menu_mut      │
//! │  Rule picker ──┘                                                        │
//! │                                                                         │
//! │  Toggles run observers while the lock is held. An observer gets the    │
//! │  menu by reference and must not lock the same SharedMenu again.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use tally_core::{Bill, CoreResult, DiscountId, Item, ItemId, TaxId, Totals};

use crate::menu::Menu;
use crate::observer::{MenuEvent, Subscription};

/// Handle to a menu shared by several collaborators.
#[derive(Debug, Clone, Default)]
pub struct SharedMenu {
    menu: Arc<Mutex<Menu>>,
}

impl SharedMenu {
    pub fn new(menu: Menu) -> Self {
        SharedMenu {
            menu: Arc::new(Mutex::new(menu)),
        }
    }

    /// Executes a function with read access to the menu.
    pub fn with_menu<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Menu) -> R,
    {
        let menu = self.menu.lock().unwrap_or_else(PoisonError::into_inner);
        f(&menu)
    }

    /// Executes a function with write access to the menu.
    ///
    /// ## Usage
    /// ```rust
    /// use tally_core::{Rate, Tax};
    /// use tally_menu::{Menu, SharedMenu};
    ///
    /// let shared = SharedMenu::new(Menu::new());
    /// let tax = shared.with_menu_mut(|menu| menu.add_tax(Tax::new("GST", Rate::from_bps(500))));
    /// assert!(shared.toggle_tax(tax));
    /// ```
    pub fn with_menu_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Menu) -> R,
    {
        let mut menu = self.menu.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut menu)
    }

    pub fn toggle_tax(&self, id: TaxId) -> bool {
        self.with_menu_mut(|menu| menu.toggle_tax(id))
    }

    pub fn toggle_discount(&self, id: DiscountId) -> bool {
        self.with_menu_mut(|menu| menu.toggle_discount(id))
    }

    pub fn toggle_item_exemption(&self, id: ItemId) -> bool {
        self.with_menu_mut(|menu| menu.toggle_item_exemption(id))
    }

    pub fn try_toggle_tax(&self, id: TaxId) -> CoreResult<bool> {
        self.with_menu_mut(|menu| menu.try_toggle_tax(id))
    }

    pub fn try_toggle_discount(&self, id: DiscountId) -> CoreResult<bool> {
        self.with_menu_mut(|menu| menu.try_toggle_discount(id))
    }

    pub fn try_toggle_item_exemption(&self, id: ItemId) -> CoreResult<bool> {
        self.with_menu_mut(|menu| menu.try_toggle_item_exemption(id))
    }

    /// Registers an observer on the underlying menu.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&MenuEvent, &Menu) + Send + Sync + 'static,
    {
        self.with_menu(|menu| menu.subscribe(callback))
    }

    pub fn totals_for(&self, items: &[Item]) -> Totals {
        self.with_menu(|menu| menu.totals_for(items))
    }

    /// Snapshot bill: later toggles on the menu do not reach it.
    pub fn bill_for(&self, items: Vec<Item>) -> Bill {
        self.with_menu(|menu| menu.bill_for(items))
    }

    /// Owned copy of the current rules, as an empty bill.
    pub fn snapshot(&self) -> Bill {
        self.bill_for(Vec::new())
    }

    /// Copy of the menu item with this id.
    pub fn item(&self, id: ItemId) -> Option<Item> {
        self.with_menu(|menu| menu.item(id).cloned())
    }

    /// Copy of the first menu item named `name`.
    pub fn find_item(&self, name: &str) -> Option<Item> {
        self.with_menu(|menu| menu.find_item(name).cloned())
    }
}

impl From<Menu> for SharedMenu {
    fn from(menu: Menu) -> Self {
        SharedMenu::new(menu)
    }
}
