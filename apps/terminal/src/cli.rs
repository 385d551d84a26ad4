//! Command line and shell command definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use tillpoint_core::validation::parse_expiry_date;
use tillpoint_core::{Money, PaymentMethod};

// =============================================================================
// Process Arguments
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "tillpoint", about = "Inventory and point-of-sale terminal", long_about = None)]
pub struct Cli {
    /// Path to a tillpoint.toml configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides the configuration file and environment
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive session (default)
    Shell,

    /// Print the product list once and exit
    Products {
        /// Only list products matching this term
        #[arg(long)]
        search: Option<String>,
    },

    /// Print the effective configuration
    Config,
}

// =============================================================================
// Shell Commands
// =============================================================================

/// One line typed into the interactive shell.
#[derive(Debug, Parser)]
#[command(
    name = "",
    no_binary_name = true,
    disable_version_flag = true,
    help_template = "{subcommands}"
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ShellCommand {
    /// Switch to the inventory view and reload products
    Inventory,

    /// Switch to the point-of-sale view
    Pos,

    /// List products, optionally filtered by a search term
    List {
        /// Search term
        term: Vec<String>,
    },

    /// Reload the full product list
    Refresh,

    /// Add a product without an expiry date
    AddStandard {
        name: String,
        #[arg(value_parser = parse_money)]
        price: Money,
        #[arg(allow_negative_numbers = true)]
        quantity: Option<i64>,
    },

    /// Add a product with an expiry date
    AddPerishable {
        name: String,
        #[arg(value_parser = parse_money)]
        price: Money,
        /// YYYY-MM-DD
        #[arg(value_parser = parse_date)]
        expiry: NaiveDate,
        #[arg(allow_negative_numbers = true)]
        quantity: Option<i64>,
    },

    /// Open the edit form for a listed product
    Edit {
        /// Full or shortened product id
        id: String,
    },

    /// Submit the edit form; omitted fields keep their pre-filled values
    Update {
        name: String,
        #[arg(value_parser = parse_money)]
        price: Money,
        #[arg(allow_negative_numbers = true)]
        quantity: Option<i64>,
        /// YYYY-MM-DD, perishable products only
        #[arg(value_parser = parse_date)]
        expiry: Option<NaiveDate>,
    },

    /// Close the edit form without saving
    Cancel,

    /// Delete a product after confirmation
    Delete {
        /// Full or shortened product id
        id: String,
    },

    /// Add a product to the cart by id or name
    Cart {
        key: String,
        /// Defaults to the quantity input (1)
        #[arg(allow_negative_numbers = true)]
        quantity: Option<i64>,
    },

    /// Set the quantity input used by `cart` when no quantity is given
    Qty {
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Show the cart
    Show,

    /// Pay for the cart: cash, card or mobile
    Checkout {
        #[arg(value_parser = parse_method)]
        method: PaymentMethod,
        /// Amount tendered, defaults to the cart total
        #[arg(value_parser = parse_money)]
        amount: Option<Money>,
    },

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

fn parse_money(s: &str) -> Result<Money, String> {
    s.parse::<Money>().map_err(|e| e.to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    parse_expiry_date(s).map_err(|e| e.to_string())
}

fn parse_method(s: &str) -> Result<PaymentMethod, String> {
    s.parse::<PaymentMethod>().map_err(|e| e.to_string())
}

/// Splits a shell line into words. Single or double quotes group words,
/// so `add-standard "Oat Milk" 2.49` has three.
pub fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("unterminated {} quote", q));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<ShellCommand, clap::Error> {
        ShellLine::try_parse_from(tokenize(line).unwrap()).map(|l| l.command)
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize(r#"add-standard "Oat Milk" 2.49"#).unwrap(),
            vec!["add-standard", "Oat Milk", "2.49"]
        );
        assert_eq!(tokenize("  cart  p1 ").unwrap(), vec!["cart", "p1"]);
        assert_eq!(tokenize("list ''").unwrap(), vec!["list", ""]);
        assert!(tokenize("edit 'abc").is_err());
        assert!(tokenize("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_product_commands() {
        assert_eq!(
            parse("add-standard Widget 9.99 3").unwrap(),
            ShellCommand::AddStandard {
                name: "Widget".to_string(),
                price: Money::from_cents(999),
                quantity: Some(3),
            }
        );
        assert_eq!(
            parse("add-perishable Yogurt $2.25 2025-01-31").unwrap(),
            ShellCommand::AddPerishable {
                name: "Yogurt".to_string(),
                price: Money::from_cents(225),
                expiry: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
                quantity: None,
            }
        );
        assert!(parse("add-perishable Yogurt 2.25 31/01/2025").is_err());
        assert!(parse("add-standard Widget cheap").is_err());
    }

    #[test]
    fn test_parse_pos_commands() {
        assert_eq!(
            parse("cart p1 -2").unwrap(),
            ShellCommand::Cart {
                key: "p1".to_string(),
                quantity: Some(-2),
            }
        );
        assert_eq!(
            parse("checkout CARD 50").unwrap(),
            ShellCommand::Checkout {
                method: PaymentMethod::Card,
                amount: Some(Money::from_cents(5000)),
            }
        );
        assert!(parse("checkout barter").is_err());
        assert_eq!(parse("qty 4").unwrap(), ShellCommand::Qty { quantity: 4 });
        assert!(parse("qty many").is_err());
        assert_eq!(parse("exit").unwrap(), ShellCommand::Quit);
    }

    #[test]
    fn test_list_joins_search_words() {
        assert_eq!(
            parse("list oat milk").unwrap(),
            ShellCommand::List {
                term: vec!["oat".to_string(), "milk".to_string()],
            }
        );
    }

    #[test]
    fn test_cli_defaults_to_shell() {
        let cli = Cli::try_parse_from(["tillpoint"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["tillpoint", "products", "--search", "milk"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Products { search: Some(ref s) }) if s == "milk"));
    }
}
