//! # Shell
//!
//! Line-oriented front end over a [`Session`]. Each line is one command;
//! after it runs, the affected part of the screen and the notice are
//! printed again.
//!
//! ```text
//! Inventory> add-perishable "Greek Yogurt" 2.25 2025-01-31 12
//! OK: Product added successfully!
//! ╭─────────────┬──────────────┬───────┬─────┬────────────┬─────────────────────╮
//! │     ID      │     Name     │ Price │ Qty │    Type    │       Details       │
//! ├─────────────┼──────────────┼───────┼─────┼────────────┼─────────────────────┤
//! │ 5d1b7c2e... │ Greek Yogurt │ $2.25 │  12 │ Perishable │ Expires: 2025-01-31 │
//! ╰─────────────┴──────────────┴───────┴─────┴────────────┴─────────────────────╯
//! ```

use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use tracing::debug;

use tillpoint_client::inventory::add_form_title;
use tillpoint_client::{EditForm, PosBackend, Session};
use tillpoint_core::{Money, ProductDraft, ProductKind, View};

use crate::cli::{tokenize, ShellCommand, ShellLine};
use crate::render;

pub const NO_EDIT_FORM: &str = "No product is being edited. Use `edit <id>` first.";

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Shell<B: PosBackend, R, W> {
    session: Session<B>,
    input: R,
    out: W,
}

impl<B, R, W> Shell<B, R, W>
where
    B: PosBackend,
    R: BufRead,
    W: Write,
{
    pub fn new(session: Session<B>, input: R, out: W) -> Self {
        Shell {
            session,
            input,
            out,
        }
    }

    /// Reads and runs commands until `quit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        writeln!(self.out, "{}", render::nav(self.session.view_state()))?;
        self.print_listing()?;
        self.print_notice()?;

        loop {
            write!(self.out, "{}> ", self.session.active_view().title())?;
            self.out.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.out)?;
                break;
            }

            let words = match tokenize(&line) {
                Ok(words) if words.is_empty() => continue,
                Ok(words) => words,
                Err(e) => {
                    writeln!(self.out, "{}", e)?;
                    continue;
                }
            };

            let command = match ShellLine::try_parse_from(words) {
                Ok(parsed) => parsed.command,
                Err(e) => {
                    write!(self.out, "{}", e.render())?;
                    continue;
                }
            };

            if self.execute(command).await? == Flow::Quit {
                break;
            }
            self.print_notice()?;
        }
        Ok(())
    }

    async fn execute(&mut self, command: ShellCommand) -> Result<Flow> {
        debug!(?command, "shell command");

        match command {
            ShellCommand::Inventory => {
                self.session.switch_view(View::Inventory).await;
                writeln!(self.out, "{}", render::nav(self.session.view_state()))?;
                self.print_listing()?;
            }
            ShellCommand::Pos => {
                self.session.switch_view(View::Pos).await;
                writeln!(self.out, "{}", render::nav(self.session.view_state()))?;
                self.print_cart()?;
            }
            ShellCommand::List { term } => {
                let term = term.join(" ");
                let search = Some(term.as_str()).filter(|t| !t.trim().is_empty());
                self.session.list_products(search).await;
                self.print_listing()?;
            }
            ShellCommand::Refresh => {
                self.session.list_products(None).await;
                self.print_listing()?;
            }
            ShellCommand::AddStandard {
                name,
                price,
                quantity,
            } => {
                debug!(form = add_form_title(ProductKind::Standard), "submitting add form");
                let draft = new_draft(name, price, quantity, None);
                if self
                    .session
                    .create_product(ProductKind::Standard, &draft)
                    .await
                {
                    self.print_listing()?;
                }
            }
            ShellCommand::AddPerishable {
                name,
                price,
                expiry,
                quantity,
            } => {
                debug!(form = add_form_title(ProductKind::Perishable), "submitting add form");
                let draft = new_draft(name, price, quantity, Some(expiry));
                if self
                    .session
                    .create_product(ProductKind::Perishable, &draft)
                    .await
                {
                    self.print_listing()?;
                }
            }
            ShellCommand::Edit { id } => {
                if let Some(form) = self.session.open_edit(&id) {
                    let text = render::edit_form(form);
                    writeln!(self.out, "{}", text)?;
                }
            }
            ShellCommand::Update {
                name,
                price,
                quantity,
                expiry,
            } => {
                let Some(form) = self.session.edit_form().cloned() else {
                    writeln!(self.out, "{}", NO_EDIT_FORM)?;
                    return Ok(Flow::Continue);
                };
                let draft = update_draft(&form, name, price, quantity, expiry);
                if self.session.update_product(&form.product_id, &draft).await {
                    self.print_notice()?;
                    self.print_listing()?;
                    self.out.flush()?;
                    self.session.dismiss_edit_after_delay(&form.product_id).await;
                }
            }
            ShellCommand::Cancel => self.session.close_edit(),
            ShellCommand::Delete { id } => {
                let id = self
                    .session
                    .inventory()
                    .find_listed(&id)
                    .map(|p| p.id.clone())
                    .unwrap_or(id);

                let input = &mut self.input;
                let out = &mut self.out;
                let deleted = self
                    .session
                    .delete_product(&id, |prompt| confirm(input, out, prompt))
                    .await;
                if deleted {
                    self.print_listing()?;
                }
            }
            ShellCommand::Cart { key, quantity } => {
                let quantity = quantity.unwrap_or_else(|| self.session.register().quantity_input());
                self.session.add_to_cart(&key, quantity).await;
                self.print_cart()?;
            }
            ShellCommand::Qty { quantity } => {
                self.session.set_quantity_input(quantity);
                writeln!(self.out, "Quantity: {}", quantity)?;
            }
            ShellCommand::Show => self.print_cart()?,
            ShellCommand::Checkout { method, amount } => {
                self.session.checkout(method, amount).await;
                self.print_cart()?;
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn print_listing(&mut self) -> Result<()> {
        writeln!(self.out, "{}", render::product_table(self.session.listing()))?;
        Ok(())
    }

    fn print_cart(&mut self) -> Result<()> {
        writeln!(self.out, "{}", render::cart(&self.session.render_cart()))?;
        Ok(())
    }

    fn print_notice(&mut self) -> Result<()> {
        if let Some(notice) = self.session.take_notice() {
            writeln!(self.out, "{}", render::notice(&notice))?;
        }
        Ok(())
    }
}

/// Asks a yes/no question. Anything but `y` or `yes` declines.
fn confirm(input: &mut impl BufRead, out: &mut impl Write, prompt: &str) -> bool {
    if write!(out, "{} [y/N] ", prompt).and_then(|_| out.flush()).is_err() {
        return false;
    }
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn new_draft(
    name: String,
    price: Money,
    quantity: Option<i64>,
    expiry: Option<NaiveDate>,
) -> ProductDraft {
    ProductDraft {
        name,
        price,
        quantity,
        expiry_date: expiry,
    }
}

/// Draft for an update. Omitted quantity and expiry keep the values the
/// form was pre-filled with.
fn update_draft(
    form: &EditForm,
    name: String,
    price: Money,
    quantity: Option<i64>,
    expiry: Option<NaiveDate>,
) -> ProductDraft {
    ProductDraft {
        name,
        price,
        quantity: quantity.or(form.draft.quantity),
        expiry_date: expiry.or(form.draft.expiry_date),
    }
}
