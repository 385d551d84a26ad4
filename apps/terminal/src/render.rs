//! Text rendering of session state: navigation, product table, cart,
//! edit form and notices.

use std::fmt::Write;

use tabled::{
    builder::Builder,
    settings::{
        object::{Columns, Rows},
        Alignment, Style,
    },
};

use tillpoint_client::{EditForm, Notice, NoticeLevel};
use tillpoint_core::{CartView, ProductListing, View, ViewState, EMPTY_CART_MESSAGE};

/// Navigation bar. The active view is bracketed.
pub fn nav(state: &ViewState) -> String {
    [View::Inventory, View::Pos]
        .into_iter()
        .map(|view| {
            if state.is_highlighted(view) {
                format!("[{}]", view.title())
            } else {
                format!(" {} ", view.title())
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Product table, or the listing's placeholder line.
pub fn product_table(listing: &ProductListing) -> String {
    if let Some(placeholder) = listing.placeholder() {
        return placeholder.to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Price", "Qty", "Type", "Details"]);
    for row in listing.rows() {
        builder.push_record([
            row.short_id.clone(),
            row.name.clone(),
            row.price.clone(),
            row.quantity.to_string(),
            row.kind.to_string(),
            row.details.clone(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..4), Alignment::right());
    table.modify(Rows::first(), Alignment::center());
    table.to_string()
}

/// Cart lines followed by the total and the pre-filled payment amount.
pub fn cart(view: &CartView) -> String {
    let mut out = String::new();
    if view.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_CART_MESSAGE);
    } else {
        let width = view
            .entries
            .iter()
            .map(|e| e.label().chars().count())
            .max()
            .unwrap_or(0);
        for entry in &view.entries {
            let _ = writeln!(out, "  {:<width$}  {}", entry.label(), entry.amount, width = width);
        }
    }
    let _ = writeln!(out, "Total: {}", view.total);
    let _ = write!(out, "Amount paid: {}", view.payment_prefill.amount_string());
    out
}

pub fn edit_form(form: &EditForm) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", form.title());
    let _ = writeln!(out, "  Name:     {}", form.draft.name);
    let _ = writeln!(out, "  Price:    {}", form.draft.price.amount_string());
    let _ = write!(
        out,
        "  Quantity: {}",
        form.draft.quantity.unwrap_or_default()
    );
    if let Some(expiry) = form.draft.expiry_date {
        let _ = write!(out, "\n  Expiry:   {}", expiry.format("%Y-%m-%d"));
    }
    out
}

pub fn notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Success => format!("OK: {}", notice),
        NoticeLevel::Error => format!("Error: {}", notice),
    }
}
