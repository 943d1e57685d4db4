use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::{forecast::ForecastSlot, window::SelectedWindow};

#[must_use]
pub fn build_forecast_table(slots: &[ForecastSlot], window: Option<&SelectedWindow>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Start", "End", "Price"]);
    for slot in slots {
        let is_selected = window.is_some_and(|window| window.start == slot.start);
        table.add_row(vec![
            Cell::new(slot.start.format("%H:%M")),
            Cell::new(slot.end.format("%H:%M")).add_attribute(Attribute::Dim),
            Cell::new(slot.price).set_alignment(CellAlignment::Right).fg(if is_selected {
                Color::Green
            } else {
                Color::Reset
            }),
        ]);
    }
    table
}
