pub mod catalog;

/// Named strategies offered by the service, grouped the way the strategy
/// picker shows them. Every name has a builder in `catalog`.
pub const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "basic",
        &["Covered Call", "Covered Put", "Protective Put", "Protective Call"],
    ),
    (
        "spreads",
        &[
            "Bull Call Spread",
            "Bear Put Spread",
            "Bull Put Spread",
            "Bear Call Spread",
            "Call Calendar Spread",
            "Put Calendar Spread",
            "Diagonal Call Spread",
            "Diagonal Put Spread",
        ],
    ),
    (
        "volatility",
        &[
            "Long Straddle",
            "Short Straddle",
            "Long Strangle",
            "Short Strangle",
            "Long Strip",
            "Short Strip",
            "Long Strap",
            "Short Strap",
        ],
    ),
    (
        "butterflies",
        &[
            "Long Call Butterfly",
            "Long Put Butterfly",
            "Short Call Butterfly",
            "Iron Butterfly",
        ],
    ),
    ("condors", &["Iron Condor", "Long Call Condor", "Long Put Condor"]),
    (
        "advanced",
        &[
            "Jade Lizard",
            "Seagull",
            "Box Spread",
            "Conversion",
            "Reversal",
            "Poor Man's Covered Call",
            "Wheel Strategy (Put)",
            "Wheel Strategy (Call)",
            "ZEBRA Spread",
            "Call Ladder",
            "Put Ladder",
            "Call Ratio Spread",
            "Put Ratio Spread",
            "Call Ratio Backspread",
            "Collar",
            "Reverse Collar",
            "Synthetic Long Stock",
            "Synthetic Short Stock",
        ],
    ),
];

/// Total number of named strategies across all categories.
pub fn strategy_count() -> usize {
    CATEGORIES.iter().map(|(_, names)| names.len()).sum()
}

/// Category of a strategy name, if it is in the catalog.
pub fn category_of(name: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|(_, names)| names.contains(&name))
        .map(|(category, _)| *category)
}

/// Category -> names, for the list endpoint.
pub fn catalog_json() -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = CATEGORIES
        .iter()
        .map(|(category, names)| (category.to_string(), serde_json::json!(names)))
        .collect();
    serde_json::Value::Object(map)
}
