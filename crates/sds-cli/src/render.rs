//! Register rendering for the terminal.

use chrono::NaiveDate;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use sds_core::{CurrencyStatus, currency_status};
use sds_model::{Substance, glyph_for};

/// Currency labels shown to the user, as the tool has always shown them.
const LABEL_CURRENT: &str = "TAK";
const LABEL_EXPIRED: &str = "NIE";
const LABEL_MISSING: &str = "BRAK";

/// Placeholder for an empty link or date cell.
const LABEL_NONE: &str = "Brak";

/// Build the register table, one row per record in register order.
pub fn register_table(records: &[Substance], today: NaiveDate) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("name"),
        header_cell("producer"),
        header_cell("sdsDate"),
        header_cell("current"),
        header_cell("link"),
        header_cell("pictograms"),
        header_cell("notes"),
    ]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
    for record in records {
        let status = currency_status(record.sds_date.as_deref(), today);
        table.add_row(vec![
            Cell::new(&record.name),
            Cell::new(&record.producer),
            date_cell(record.sds_date.as_deref()),
            currency_cell(status),
            link_cell(&record.link),
            Cell::new(pictogram_text(&record.ghs)),
            Cell::new(&record.notes),
        ]);
    }
    table
}

/// Glyphs for the record's pictogram codes, unknown codes shown literally.
pub fn pictogram_text(codes: &[String]) -> String {
    codes
        .iter()
        .map(|code| glyph_for(code))
        .collect::<Vec<_>>()
        .join(" ")
}

fn currency_cell(status: CurrencyStatus) -> Cell {
    match status {
        CurrencyStatus::Current => Cell::new(LABEL_CURRENT)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        CurrencyStatus::Expired => Cell::new(LABEL_EXPIRED)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        CurrencyStatus::Missing => Cell::new(LABEL_MISSING)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
    }
}

fn date_cell(date: Option<&str>) -> Cell {
    match date {
        Some(text) => Cell::new(text),
        None => dim_cell(LABEL_NONE),
    }
}

fn link_cell(link: &str) -> Cell {
    if link.is_empty() {
        dim_cell(LABEL_NONE)
    } else {
        Cell::new(link)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(value: &str) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
