//! Ingredient categories.
//!
//! The declaration order is the canonical ordering used when the inventory
//! is sorted by category. It is deliberately not alphabetical: spirits lead,
//! modifiers follow, and consumables like ice come last.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Spirit,
    Liqueur,
    Vermouth,
    Bitters,
    Syrup,
    Juice,
    Mixer,
    Wine,
    Beer,
    Dry,
    Ice,
}

impl Category {
    /// All categories in canonical order.
    pub const ALL: [Category; 11] = [
        Category::Spirit,
        Category::Liqueur,
        Category::Vermouth,
        Category::Bitters,
        Category::Syrup,
        Category::Juice,
        Category::Mixer,
        Category::Wine,
        Category::Beer,
        Category::Dry,
        Category::Ice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Spirit => "Spirit",
            Category::Liqueur => "Liqueur",
            Category::Vermouth => "Vermouth",
            Category::Bitters => "Bitters",
            Category::Syrup => "Syrup",
            Category::Juice => "Juice",
            Category::Mixer => "Mixer",
            Category::Wine => "Wine",
            Category::Beer => "Beer",
            Category::Dry => "Dry",
            Category::Ice => "Ice",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
