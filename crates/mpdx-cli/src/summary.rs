use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use indexmap::IndexMap;

use mpdx_model::{ConstantId, CsvImport, FieldId, HeaderTarget, ImportConfig, ImportStep};

pub fn print_supported_headers(config: &ImportConfig) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Required"),
        header_cell("Constants"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for (field, label) in &config.supported_headers {
        let required = config.required_headers.contains(field);
        let constants = config
            .constants_for(field)
            .map(|descriptors| {
                descriptors
                    .iter()
                    .map(|descriptor| descriptor.value.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(field).fg(Color::Cyan),
            Cell::new(label),
            flag_cell(required),
            if constants.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(constants)
            },
        ]);
    }
    println!("{table}");
}

pub fn print_import(import: &CsvImport, config: &ImportConfig) {
    println!("Import: {}", import.id);
    if let Some(file_name) = &import.file_name {
        println!("File: {file_name}");
    }
    if !import.tag_list.is_empty() {
        println!("Tags: {}", import.tag_list.join(", "));
    }
    print_headers(import, config);
    for (field, values) in &import.value_mappings {
        println!();
        println!("{} values:", config.label(field).unwrap_or(field.as_str()));
        print_values(field, values, config);
    }
}

pub fn print_next_step(step: Option<ImportStep>) {
    match step {
        Some(step) => println!("Saved. Next step: {step}"),
        None => println!("Import confirmed. Contacts are being imported."),
    }
}

fn print_headers(import: &CsvImport, config: &ImportConfig) {
    let first_row = import.sample.first();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Header"),
        header_cell("Display"),
        header_cell("Field"),
        header_cell("Sample"),
    ]);
    apply_table_style(&mut table);
    for (header, display) in &import.file_headers {
        let field = import
            .header_mapping
            .get(header)
            .and_then(HeaderTarget::field);
        let sample = first_row
            .and_then(|row| row.get(header))
            .and_then(Option::as_deref);
        table.add_row(vec![
            Cell::new(header),
            Cell::new(display),
            field_cell(field, config),
            sample.map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!("{table}");
}

fn print_values(field: &FieldId, values: &IndexMap<String, ConstantId>, config: &ImportConfig) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Raw value"), header_cell("Constant")]);
    apply_table_style(&mut table);
    for (raw, constant) in values {
        let label = config.constants_for(field).and_then(|descriptors| {
            descriptors
                .iter()
                .find(|descriptor| descriptor.id == *constant)
                .map(|descriptor| descriptor.value.clone())
        });
        let constant_cell = match (constant, label) {
            (ConstantId::Unassigned, _) => Cell::new("unassigned").fg(Color::Yellow),
            (_, Some(label)) => Cell::new(label).fg(Color::Green),
            (other, None) => Cell::new(other.display_value()),
        };
        table.add_row(vec![Cell::new(raw), constant_cell]);
    }
    println!("{table}");
}

fn field_cell(field: Option<&FieldId>, config: &ImportConfig) -> Cell {
    match field {
        Some(field) => Cell::new(config.label(field).unwrap_or(field.as_str()))
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        None => dim_cell("not imported"),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn flag_cell(value: bool) -> Cell {
    if value {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
