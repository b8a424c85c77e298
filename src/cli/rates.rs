use super::ui;
use crate::core::rates::{BASE_CURRENCY, RateSnapshot};
use crate::service::Conversion;
use comfy_table::Cell;

/// Renders the cached snapshot as a table of base-relative quotes.
pub fn display_snapshot(snapshot: &RateSnapshot) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Pair"),
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Rate (per 1 {BASE_CURRENCY})")),
    ]);

    for (pair, rate) in snapshot {
        let currency = pair.strip_prefix(BASE_CURRENCY).unwrap_or(pair);
        table.add_row(vec![
            Cell::new(pair),
            Cell::new(currency),
            ui::number_cell(rate.to_string()),
        ]);
    }

    let mut output = format!(
        "Cached rates: {}\n\n",
        ui::style_text(&format!("{} quotes", snapshot.len()), ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    output
}

pub fn display_rate(from: &str, to: &str, rate: f64) -> String {
    format!(
        "1 {from} = {} {to}",
        ui::style_text(&rate.to_string(), ui::StyleType::TotalValue)
    )
}

pub fn display_conversion(amount: f64, from: &str, to: &str, conversion: Conversion) -> String {
    match conversion {
        Conversion::Amount(value) => format!(
            "{amount} {from} = {} {}",
            ui::style_text(&value.to_string(), ui::StyleType::TotalValue),
            ui::style_text(to, ui::StyleType::TotalLabel)
        ),
        Conversion::NoRate => format!(
            "{amount} {from} -> {to}: {}",
            ui::style_text("no rate available", ui::StyleType::Error)
        ),
    }
}

pub fn display_refresh(snapshot: &RateSnapshot, path: &std::path::Path) -> String {
    format!(
        "Fetched {} quotes {}",
        snapshot.len(),
        ui::style_text(&format!("(cached in {})", path.display()), ui::StyleType::Subtle)
    )
}
