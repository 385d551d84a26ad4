//! Inventory / POS view toggle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two top-level screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Inventory,
    Pos,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Inventory => "Inventory",
            View::Pos => "Point of Sale",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Which view is active. Exactly one is, and the nav highlight follows it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    active: View,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> View {
        self.active
    }

    /// Activates `target`.
    ///
    /// Returns `true` when the product list must be reloaded, which is
    /// every switch into [`View::Inventory`], re-selection included.
    pub fn switch(&mut self, target: View) -> bool {
        self.active = target;
        target == View::Inventory
    }

    pub fn is_active(&self, view: View) -> bool {
        self.active == view
    }

    /// Nav buttons are highlighted for the active view only.
    pub fn is_highlighted(&self, view: View) -> bool {
        self.is_active(view)
    }
}
