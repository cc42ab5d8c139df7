//! # Menu Configuration
//!
//! Describes a menu as data and turns it into a live [`Menu`].
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TALLY_DISABLE_TAXES=1                                              │
//! │     TALLY_ENABLE_DISCOUNTS=1                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     explicit path, else $TALLY_MENU_CONFIG, else                       │
//! │     ~/.config/tally-pos/menu.toml (Linux)                              │
//! │     ~/Library/Application Support/com.tally.pos/menu.toml (macOS)      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     The house menu: four categories, three taxes, three discounts      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # menu.toml
//! [[categories]]
//! label = "Alcohol"
//! items = [{ name = "Beer", price = "5.00" }, { name = "Wine", price = "7.00" }]
//!
//! [[taxes]]
//! label = "Alcohol Tax (10%)"
//! rate = "0.10"
//! category = "Alcohol"   # omit for a universal tax
//!
//! [[discounts]]
//! label = "10%"
//! kind = "percentage"    # percentage | absolute
//! amount = "0.10"
//! enabled = false
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tally_core::validation::{validate_category, validate_discount, validate_item, validate_tax};
use tally_core::{Discount, Item, Money, Rate, Tax, ValidationError};
use tracing::{debug, info, warn};

use crate::error::{MenuError, MenuResult};
use crate::menu::Menu;

/// Env var naming the menu file when no explicit path is given.
pub const MENU_CONFIG_ENV: &str = "TALLY_MENU_CONFIG";

// =============================================================================
// Entries
// =============================================================================

/// One priced item inside a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemConfig {
    pub name: String,

    /// Written as a string in TOML so no float ever touches a price.
    pub price: Decimal,

    #[serde(default)]
    pub tax_exempt: bool,
}

impl ItemConfig {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        ItemConfig {
            name: name.into(),
            price,
            tax_exempt: false,
        }
    }
}

/// A menu section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub label: String,

    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

/// A tax rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxConfig {
    pub label: String,

    /// Fraction, `"0.05"` for 5%.
    pub rate: Decimal,

    /// Restricts the tax to one category. Universal when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// How a discount's `amount` is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// `amount` is a fraction of the running total.
    Percentage,
    /// `amount` is a flat sum.
    Absolute,
}

/// A discount rule. Listed order is application order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountConfig {
    pub label: String,

    pub kind: DiscountKind,

    /// Fraction for a percentage, a sum for an absolute discount.
    pub amount: Decimal,

    #[serde(default)]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Menu Config
// =============================================================================

/// Complete menu definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuConfig {
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,

    #[serde(default)]
    pub taxes: Vec<TaxConfig>,

    #[serde(default)]
    pub discounts: Vec<DiscountConfig>,
}

impl Default for MenuConfig {
    /// The house menu.
    fn default() -> Self {
        fn category(label: &str, items: &[(&str, Decimal)]) -> CategoryConfig {
            CategoryConfig {
                label: label.to_string(),
                items: items
                    .iter()
                    .map(|&(name, price)| ItemConfig::new(name, price))
                    .collect(),
            }
        }

        fn tax(label: &str, rate: Decimal, category: Option<&str>) -> TaxConfig {
            TaxConfig {
                label: label.to_string(),
                rate,
                category: category.map(str::to_string),
                enabled: true,
            }
        }

        fn discount(label: &str, kind: DiscountKind, amount: Decimal) -> DiscountConfig {
            DiscountConfig {
                label: label.to_string(),
                kind,
                amount,
                enabled: false,
            }
        }

        MenuConfig {
            categories: vec![
                category(
                    "Appetizers",
                    &[
                        ("Nachos", dec!(13.99)),
                        ("Calamari", dec!(11.99)),
                        ("Caesar Salad", dec!(10.99)),
                    ],
                ),
                category(
                    "Mains",
                    &[
                        ("Burger", dec!(9.99)),
                        ("Hotdog", dec!(3.99)),
                        ("Pizza", dec!(12.99)),
                    ],
                ),
                category(
                    "Drinks",
                    &[
                        ("Water", dec!(0)),
                        ("Pop", dec!(2.00)),
                        ("Orange Juice", dec!(3.00)),
                    ],
                ),
                category(
                    "Alcohol",
                    &[
                        ("Beer", dec!(5.00)),
                        ("Cider", dec!(6.00)),
                        ("Wine", dec!(7.00)),
                    ],
                ),
            ],
            taxes: vec![
                tax("Tax 1 (5%)", dec!(0.05), None),
                tax("Tax 2 (8%)", dec!(0.08), None),
                tax("Alcohol Tax (10%)", dec!(0.10), Some("Alcohol")),
            ],
            discounts: vec![
                discount("$5.00", DiscountKind::Absolute, dec!(5.00)),
                discount("10%", DiscountKind::Percentage, dec!(0.10)),
                discount("20%", DiscountKind::Percentage, dec!(0.20)),
            ],
        }
    }
}

impl MenuConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values (the house menu)
    /// 2. Config file, which replaces the whole menu when present
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> MenuResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading menu config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Menu config file not found, using house menu");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns the house menu if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load menu config: {}. Using house menu.", e);
            Self::default()
        })
    }

    /// Saves configuration to file as pretty TOML.
    pub fn save(&self, config_path: Option<PathBuf>) -> MenuResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(MenuError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Menu config saved");
        Ok(())
    }

    /// Validates every entry, then the menu as a whole.
    pub fn validate(&self) -> MenuResult<()> {
        let mut labels = HashSet::new();
        for category in &self.categories {
            validate_category(&category.label)?;
            if !labels.insert(category.label.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "category".to_string(),
                    value: category.label.clone(),
                }
                .into());
            }
            for item in &category.items {
                validate_item(&item.to_item(&category.label))?;
            }
        }

        for tax in &self.taxes {
            validate_tax(&tax.to_tax())?;
            if let Some(category) = &tax.category {
                if !labels.contains(category.as_str()) {
                    return Err(MenuError::InvalidConfig(format!(
                        "tax '{}' targets unknown category '{}'",
                        tax.label, category
                    )));
                }
            }
        }

        for discount in &self.discounts {
            validate_discount(&discount.to_discount())?;
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let is_set = |key: &str| lookup(key).is_some_and(|value| is_truthy(&value));

        if is_set("TALLY_DISABLE_TAXES") {
            debug!("Disabling all taxes from environment");
            for tax in &mut self.taxes {
                tax.enabled = false;
            }
        }

        if is_set("TALLY_ENABLE_DISCOUNTS") {
            debug!("Enabling all discounts from environment");
            for discount in &mut self.discounts {
                discount.enabled = true;
            }
        }
    }

    /// Returns the default config file path.
    ///
    /// `TALLY_MENU_CONFIG` wins over the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(MENU_CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        directories::ProjectDirs::from("com", "tally", "pos")
            .map(|dirs| dirs.config_dir().join("menu.toml"))
    }

    // =========================================================================
    // Building
    // =========================================================================

    /// Builds a live menu: categories and items in file order, then taxes,
    /// then discounts in application order.
    pub fn build_menu(&self) -> MenuResult<Menu> {
        let mut menu = Menu::new();
        for category in &self.categories {
            menu.add_category(category.label.clone());
            for item in &category.items {
                menu.insert_item(item.to_item(&category.label))?;
            }
        }
        for tax in &self.taxes {
            menu.add_tax(tax.to_tax());
        }
        for discount in &self.discounts {
            menu.add_discount(discount.to_discount());
        }

        debug!(
            categories = menu.categories().len(),
            taxes = menu.taxes().len(),
            discounts = menu.discounts().len(),
            "Menu built"
        );
        Ok(menu)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// =============================================================================
// Conversions
// =============================================================================

impl ItemConfig {
    fn to_item(&self, category: &str) -> Item {
        Item::new(self.name.clone(), category, Money::new(self.price)).tax_exempt(self.tax_exempt)
    }
}

impl TaxConfig {
    fn to_tax(&self) -> Tax {
        let tax =
            Tax::new(self.label.clone(), Rate::from_fraction(self.rate)).enabled(self.enabled);
        match &self.category {
            Some(category) => tax.targeted(category.clone()),
            None => tax,
        }
    }
}

impl DiscountConfig {
    fn to_discount(&self) -> Discount {
        let discount = match self.kind {
            DiscountKind::Percentage => {
                Discount::percentage(self.label.clone(), Rate::from_fraction(self.amount))
            }
            DiscountKind::Absolute => {
                Discount::absolute(self.label.clone(), Money::new(self.amount))
            }
        };
        discount.enabled(self.enabled)
    }
}
