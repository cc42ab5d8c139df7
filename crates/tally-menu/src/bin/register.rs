//! # Register Demo
//!
//! Rings up an order against the configured menu and shows totals before
//! and after flipping a rule.
//!
//! ## Usage
//! ```bash
//! # House menu, a burger and a beer, then toggle the first discount
//! cargo run -p tally-menu --bin register -- Burger Beer
//!
//! # Custom menu, toggle a tax by label instead
//! cargo run -p tally-menu --bin register -- --config ./menu.toml --tax "Tax 2 (8%)" Pizza Wine
//! ```
//!
//! Set `RUST_LOG=tally=trace` to see every tax charge.

use std::env;
use std::path::PathBuf;

use tally_core::{AppliedDiscount, Totals};
use tally_menu::{MenuConfig, Register, SharedMenu};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut tax_label: Option<String> = None;
    let mut discount_label: Option<String> = None;
    let mut names: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--tax" | "-t" => {
                if i + 1 < args.len() {
                    tax_label = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--discount" | "-d" => {
                if i + 1 < args.len() {
                    discount_label = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Tally POS Register");
                println!();
                println!("Usage: register [OPTIONS] [ITEM]...");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>     Menu file");
                println!("                          (default: $TALLY_MENU_CONFIG or platform dir)");
                println!("  -t, --tax <LABEL>       Tax to toggle after the first totals");
                println!("  -d, --discount <LABEL>  Discount to toggle (default: the first one)");
                println!("  -h, --help              Show this help message");
                return Ok(());
            }
            name => names.push(name.to_string()),
        }
        i += 1;
    }

    let config = MenuConfig::load(config_path)?;
    let menu = SharedMenu::new(config.build_menu()?);
    info!(
        categories = config.categories.len(),
        taxes = config.taxes.len(),
        discounts = config.discounts.len(),
        "Menu loaded"
    );

    let mut register = Register::new(menu.clone());
    if names.is_empty() {
        names = vec!["Burger".to_string(), "Beer".to_string()];
    }
    for name in &names {
        if register.add_item_named(name).is_none() {
            warn!(item = %name, "Not on the menu, skipped");
        }
    }

    println!("Order opened {}", register.opened_at().format("%Y-%m-%d %H:%M:%S UTC"));
    for index in 0..register.order().len() {
        let line = (register.line_label(index), register.order().get(index));
        if let (Some(label), Some(item)) = line {
            println!("  {:<24} {:>8}", label, item.price.rounded(2));
        }
    }
    println!();
    print_totals(&register.totals(), &register.discount_breakdown());

    let toggled = match tax_label {
        Some(label) => {
            let id = menu.with_menu(|menu| {
                menu.taxes().iter().find(|tax| tax.label == label).map(|tax| tax.id)
            });
            match id {
                Some(id) => menu.try_toggle_tax(id).map(|enabled| (label, enabled))?,
                None => return Err(format!("No tax labelled '{}'", label).into()),
            }
        }
        None => {
            let rule = menu.with_menu(|menu| {
                menu.discounts()
                    .iter()
                    .find(|discount| discount_label.as_ref().map_or(true, |l| &discount.label == l))
                    .map(|discount| (discount.id, discount.label.clone()))
            });
            match rule {
                Some((id, label)) => menu.try_toggle_discount(id).map(|enabled| (label, enabled))?,
                None => return Err("No discount to toggle".into()),
            }
        }
    };

    println!();
    println!(
        "Toggled '{}' {}",
        toggled.0,
        if toggled.1 { "on" } else { "off" }
    );
    if register.take_refresh() {
        print_totals(&register.totals(), &register.discount_breakdown());
    }

    Ok(())
}

fn print_totals(totals: &Totals, breakdown: &[AppliedDiscount]) {
    println!("  {:<24} {:>8}", "Subtotal", totals.subtotal.rounded(2));
    println!("  {:<24} {:>8}", "Tax", totals.tax.rounded(2));
    for applied in breakdown.iter().filter(|applied| !applied.saved.is_zero()) {
        println!("    {:<22} {:>8}", applied.label, (-applied.saved).rounded(2));
    }
    println!("  {:<24} {:>8}", "Discounts", totals.discounts.rounded(2));
    println!("  {:<24} {:>8}", "Total", totals.total.rounded(2));
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - ERROR: Something failed
/// - WARN: Unknown items, config fallbacks
/// - INFO: Config loaded and saved
/// - DEBUG: Toggles, totals, register changes
/// - TRACE: Every individual tax charge
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tally=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
