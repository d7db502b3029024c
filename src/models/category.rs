/// Preset spending categories offered by the entry form. Free-form names
/// are equally valid; these are just the ones worth cycling through.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Bills & Subscriptions",
    "Clothing",
    "Coffee Shops",
    "Dining Out",
    "Education",
    "Entertainment",
    "Gas & Fuel",
    "Gifts & Donations",
    "Groceries",
    "Health & Fitness",
    "Home & Garden",
    "Housing",
    "Income",
    "Insurance",
    "Personal Care",
    "Public Transit",
    "Rent/Mortgage",
    "Shopping",
    "Travel",
    "Uncategorized",
    "Utilities",
];

/// Find a preset by name, case-insensitively.
pub fn find_category(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    DEFAULT_CATEGORIES
        .iter()
        .find(|c| c.to_lowercase() == lower)
        .copied()
}
