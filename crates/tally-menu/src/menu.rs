//! # Menu
//!
//! The configuration object: categories of items, tax rules, discount rules,
//! and the observers that hear about toggles.
//!
//! ## Storage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Menu Arenas                                    │
//! │                                                                         │
//! │  taxes:      Vec<Tax>        tax_index:      TaxId      → usize         │
//! │  discounts:  Vec<Discount>   discount_index: DiscountId → usize         │
//! │  categories: Vec<Category>   item_index:     ItemId → (cat, item)       │
//! │                                                                         │
//! │  Append-only: nothing is ever removed, so stored indices stay valid.   │
//! │  Vec order is display order AND discount application order.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Toggles
//! `toggle_*` returns whether anything changed; an unknown id is a silent
//! no-op and fires no event. `try_toggle_*` reports the miss as a
//! [`CoreError`] instead.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tally_core::{
    compute_totals, Bill, Category, CoreError, CoreResult, Discount, DiscountId, Item, ItemId,
    MenuId, Money, Tax, TaxId, Totals, ValidationError,
};
use tracing::debug;

use crate::observer::{MenuChange, MenuEvent, Observers, Subscription};

// =============================================================================
// Category
// =============================================================================

/// A labelled group of items, shown as one section of the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub label: Category,
    pub items: Vec<Item>,
}

impl MenuCategory {
    pub fn new(label: impl Into<Category>) -> Self {
        MenuCategory {
            label: label.into(),
            items: Vec::new(),
        }
    }
}

// =============================================================================
// Menu
// =============================================================================

/// Menu configuration shared by the register and the rule pickers.
#[derive(Debug)]
pub struct Menu {
    id: MenuId,
    categories: Vec<MenuCategory>,
    taxes: Vec<Tax>,
    discounts: Vec<Discount>,
    category_index: HashMap<Category, usize>,
    item_index: HashMap<ItemId, (usize, usize)>,
    tax_index: HashMap<TaxId, usize>,
    discount_index: HashMap<DiscountId, usize>,
    observers: Observers,
}

impl Menu {
    /// Creates an empty menu with a fresh identity.
    pub fn new() -> Self {
        Menu {
            id: MenuId::new(),
            categories: Vec::new(),
            taxes: Vec::new(),
            discounts: Vec::new(),
            category_index: HashMap::new(),
            item_index: HashMap::new(),
            tax_index: HashMap::new(),
            discount_index: HashMap::new(),
            observers: Observers::default(),
        }
    }

    // =========================================================================
    // Building
    // =========================================================================

    /// Returns the index of the category labelled `label`, creating it at the
    /// end if needed.
    pub fn add_category(&mut self, label: impl Into<Category>) -> usize {
        let label = label.into();
        if let Some(&index) = self.category_index.get(&label) {
            return index;
        }
        let index = self.categories.len();
        self.category_index.insert(label.clone(), index);
        self.categories.push(MenuCategory::new(label));
        index
    }

    /// Creates an item in `category` (creating the category if needed).
    pub fn add_item(
        &mut self,
        category: impl Into<Category>,
        name: impl Into<String>,
        price: Money,
    ) -> ItemId {
        self.file_item(Item::new(name, category, price))
    }

    /// Files an existing item under its own `category` label.
    ///
    /// An item whose id is already on the menu replaces the stored copy, but
    /// only within the same category; moving it is a
    /// [`ValidationError::CategoryMismatch`].
    pub fn insert_item(&mut self, item: Item) -> CoreResult<ItemId> {
        let id = item.id;
        let Some(&(cat, pos)) = self.item_index.get(&id) else {
            return Ok(self.file_item(item));
        };

        let expected = &self.categories[cat].label;
        if *expected != item.category {
            return Err(ValidationError::CategoryMismatch {
                item: item.name,
                expected: expected.clone(),
                found: item.category,
            }
            .into());
        }
        self.categories[cat].items[pos] = item;
        Ok(id)
    }

    /// Appends an item whose id is not on the menu yet.
    fn file_item(&mut self, item: Item) -> ItemId {
        let id = item.id;
        let cat = self.add_category(item.category.clone());
        let pos = self.categories[cat].items.len();
        self.categories[cat].items.push(item);
        self.item_index.insert(id, (cat, pos));
        id
    }

    /// Appends a tax rule, or replaces the rule with the same id in place.
    pub fn add_tax(&mut self, tax: Tax) -> TaxId {
        let id = tax.id;
        match self.tax_index.get(&id) {
            Some(&index) => self.taxes[index] = tax,
            None => {
                self.tax_index.insert(id, self.taxes.len());
                self.taxes.push(tax);
            }
        }
        id
    }

    /// Appends a discount rule, or replaces the rule with the same id in place.
    ///
    /// Position in the list is the order discounts are applied in.
    pub fn add_discount(&mut self, discount: Discount) -> DiscountId {
        let id = discount.id;
        match self.discount_index.get(&id) {
            Some(&index) => self.discounts[index] = discount,
            None => {
                self.discount_index.insert(id, self.discounts.len());
                self.discounts.push(discount);
            }
        }
        id
    }

    // =========================================================================
    // Reading
    // =========================================================================

    pub fn id(&self) -> MenuId {
        self.id
    }

    pub fn categories(&self) -> &[MenuCategory] {
        &self.categories
    }

    pub fn taxes(&self) -> &[Tax] {
        &self.taxes
    }

    pub fn discounts(&self) -> &[Discount] {
        &self.discounts
    }

    pub fn category(&self, label: &str) -> Option<&MenuCategory> {
        self.category_index
            .get(label)
            .map(|&index| &self.categories[index])
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.item_index
            .get(&id)
            .map(|&(cat, pos)| &self.categories[cat].items[pos])
    }

    /// First item named `name`, searching categories in order.
    pub fn find_item(&self, name: &str) -> Option<&Item> {
        self.items().find(|item| item.name == name)
    }

    pub fn tax(&self, id: TaxId) -> Option<&Tax> {
        self.tax_index.get(&id).map(|&index| &self.taxes[index])
    }

    pub fn discount(&self, id: DiscountId) -> Option<&Discount> {
        self.discount_index
            .get(&id)
            .map(|&index| &self.discounts[index])
    }

    /// Every item on the menu, category by category.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.categories.iter().flat_map(|category| category.items.iter())
    }

    /// Totals for `items` under this menu's current rules.
    pub fn totals_for(&self, items: &[Item]) -> Totals {
        compute_totals(items, &self.taxes, &self.discounts)
    }

    /// An owned bill for `items`, copying the current rules.
    pub fn bill_for(&self, items: Vec<Item>) -> Bill {
        Bill::new(items, self.taxes.clone(), self.discounts.clone())
    }

    // =========================================================================
    // Toggles
    // =========================================================================

    /// Flips a tax's enabled flag. Returns false if no such tax exists.
    pub fn toggle_tax(&mut self, id: TaxId) -> bool {
        self.try_toggle_tax(id).is_ok()
    }

    /// Flips a discount's enabled flag. Returns false if no such discount exists.
    pub fn toggle_discount(&mut self, id: DiscountId) -> bool {
        self.try_toggle_discount(id).is_ok()
    }

    /// Flips a menu item's tax-exempt flag. Returns false if no such item exists.
    pub fn toggle_item_exemption(&mut self, id: ItemId) -> bool {
        self.try_toggle_item_exemption(id).is_ok()
    }

    /// Flips a tax's enabled flag and returns the new value.
    pub fn try_toggle_tax(&mut self, id: TaxId) -> CoreResult<bool> {
        let index = *self.tax_index.get(&id).ok_or(CoreError::TaxNotFound(id))?;
        let enabled = self.taxes[index].toggle();
        debug!(tax = %self.taxes[index].label, enabled, "Tax toggled");
        self.changed(MenuChange::TaxToggled(id));
        Ok(enabled)
    }

    /// Flips a discount's enabled flag and returns the new value.
    pub fn try_toggle_discount(&mut self, id: DiscountId) -> CoreResult<bool> {
        let index = *self
            .discount_index
            .get(&id)
            .ok_or(CoreError::DiscountNotFound(id))?;
        let enabled = self.discounts[index].toggle();
        debug!(discount = %self.discounts[index].label, enabled, "Discount toggled");
        self.changed(MenuChange::DiscountToggled(id));
        Ok(enabled)
    }

    /// Flips a menu item's tax-exempt flag and returns the new value.
    pub fn try_toggle_item_exemption(&mut self, id: ItemId) -> CoreResult<bool> {
        let (cat, pos) = *self.item_index.get(&id).ok_or(CoreError::ItemNotFound(id))?;
        let item = &mut self.categories[cat].items[pos];
        let exempt = item.toggle_tax_exempt();
        debug!(item = %item.name, exempt, "Item tax exemption toggled");
        self.changed(MenuChange::ItemExemptionToggled(id));
        Ok(exempt)
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Registers `callback` to run after every successful toggle.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::atomic::{AtomicBool, Ordering};
    /// use std::sync::Arc;
    /// use tally_core::{Rate, Tax};
    /// use tally_menu::Menu;
    ///
    /// let mut menu = Menu::new();
    /// let tax = menu.add_tax(Tax::new("Tax 1 (5%)", Rate::from_bps(500)));
    ///
    /// let heard = Arc::new(AtomicBool::new(false));
    /// let flag = Arc::clone(&heard);
    /// let _subscription = menu.subscribe(move |_event, menu| {
    ///     flag.store(!menu.taxes()[0].is_enabled, Ordering::SeqCst);
    /// });
    ///
    /// menu.toggle_tax(tax);
    /// assert!(heard.load(Ordering::SeqCst));
    /// ```
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&MenuEvent, &Menu) + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn changed(&self, change: MenuChange) {
        let event = MenuEvent {
            menu_id: self.id,
            change,
        };
        self.observers.notify(&event, self);
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
