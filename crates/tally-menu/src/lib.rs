//! # tally-menu: Menu Configuration for Tally POS
//!
//! Owns the menu a register rings up from: categories of items, the tax and
//! discount rules, the toggles a manager flips, and the observers that hear
//! about those flips. Bill math is delegated to `tally-core`.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Menu Data Flow                                       │
//! │                                                                         │
//! │  menu.toml ──► MenuConfig::load ──► build_menu() ──► Menu               │
//! │                                                        │                │
//! │                                           SharedMenu::new(menu)         │
//! │                                          ┌─────────────┴──────────┐     │
//! │                                          ▼                        ▼     │
//! │                                     Register                Rule picker │
//! │                                 (order + totals)         (toggle_tax…)  │
//! │                                          ▲                        │     │
//! │                                          └──── MenuEvent ◄────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`menu`] - The menu arenas and toggles
//! - [`observer`] - Change notification and `Subscription`
//! - [`shared`] - `Arc<Mutex<Menu>>` handle
//! - [`register`] - The open order
//! - [`config`] - `menu.toml` loading
//! - [`error`] - `MenuError`
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_menu::{MenuConfig, Register, SharedMenu};
//!
//! let menu = SharedMenu::new(MenuConfig::default().build_menu().unwrap());
//! let mut register = Register::new(menu.clone());
//! register.add_item_named("Burger");
//!
//! let before = register.totals();
//! let tax = menu.with_menu(|menu| menu.taxes()[0].id);
//! menu.toggle_tax(tax);
//!
//! assert!(register.take_refresh());
//! assert!(register.totals().tax < before.tax);
//! ```

pub mod config;
pub mod error;
pub mod menu;
pub mod observer;
pub mod register;
pub mod shared;

pub use config::{CategoryConfig, DiscountConfig, DiscountKind, ItemConfig, MenuConfig, TaxConfig};
pub use error::{MenuError, MenuResult};
pub use menu::{Menu, MenuCategory};
pub use observer::{Listener, MenuChange, MenuEvent, Subscription};
pub use register::Register;
pub use shared::SharedMenu;
