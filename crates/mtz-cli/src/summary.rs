//! Table rendering of a decoded header.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mtz_header::{Header, HeaderRecord};

/// Optional sections printed after the summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sections {
    pub history: bool,
    pub batches: bool,
    pub records: bool,
}

/// Print every requested table to stdout.
pub fn print_header(header: &Header, sections: Sections) {
    println!("{}", summary_table(header));
    if !header.datasets.is_empty() {
        println!();
        println!("Datasets:");
        println!("{}", dataset_table(header));
    }
    if !header.columns.is_empty() {
        println!();
        println!("Columns:");
        println!("{}", column_table(header));
    }
    if sections.history {
        println!();
        println!("History:");
        println!("{}", history_table(header));
    }
    if sections.batches {
        println!();
        println!("Batches:");
        println!("{}", batch_table(header));
    }
    if sections.records {
        println!();
        println!("Records:");
        println!("{}", record_table(header));
    }
}

/// Key/value overview of the file.
pub fn summary_table(header: &Header) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    let mut row = |label: &str, value: Cell| {
        table.add_row(vec![header_cell(label), value]);
    };

    row("Version", text_cell(&header.version));
    row("Title", text_cell(&header.title));
    row(
        "Cell",
        header
            .cell()
            .map_or_else(|| dim_cell("-"), |cell| Cell::new(format_cell(&cell))),
    );
    row(
        "Space group",
        header.symmetry().map_or_else(
            || dim_cell("-"),
            |info| {
                Cell::new(format!(
                    "{} (No. {}, {})",
                    info.space_group_name, info.space_group_number, info.point_group
                ))
            },
        ),
    );
    row(
        "Symmetry operators",
        Cell::new(header.symmetry_operators().len()),
    );
    row(
        "Resolution",
        header.resolution().map_or_else(
            || dim_cell("-"),
            |reso| {
                Cell::new(format!(
                    "{:.2} - {:.2} Å",
                    reso.low_limit(),
                    reso.high_limit()
                ))
            },
        ),
    );
    row(
        "Reflections",
        header
            .reflection_count()
            .map_or_else(|| dim_cell("-"), Cell::new),
    );
    row("Datasets", Cell::new(header.datasets.len()));
    row("Columns", Cell::new(header.columns.len()));
    row("Batches", Cell::new(header.batches.len()));
    row("History lines", Cell::new(header.history.len()));
    table
}

pub fn dataset_table(header: &Header) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Project"),
        header_cell("Crystal"),
        header_cell("Dataset"),
        header_cell("Wavelength"),
        header_cell("Cell"),
        header_cell("Columns"),
    ]);
    apply_wide_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);
    for dataset in &header.datasets {
        table.add_row(vec![
            Cell::new(dataset.id),
            optional_cell(dataset.project.as_deref()),
            optional_cell(dataset.crystal.as_deref()),
            optional_cell(dataset.name.as_deref()),
            dataset
                .wavelength
                .map_or_else(|| dim_cell("-"), |w| Cell::new(format!("{w:.5}"))),
            dataset
                .cell
                .map_or_else(|| dim_cell("-"), |cell| Cell::new(format_cell(&cell))),
            Cell::new(header.columns_in_dataset(dataset.id).count()),
        ]);
    }
    table
}

pub fn column_table(header: &Header) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Label"),
        header_cell("Type"),
        header_cell("Description"),
        header_cell("Min"),
        header_cell("Max"),
        header_cell("Dataset"),
        header_cell("Source"),
    ]);
    apply_wide_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);
    for (index, column) in header.columns.iter().enumerate() {
        let (min, max) = column.range;
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(&column.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(column.column_type),
            Cell::new(column.column_type.description()),
            Cell::new(format!("{min:.3}")),
            Cell::new(format!("{max:.3}")),
            Cell::new(column.dataset_id),
            optional_cell(column.source.as_deref()),
        ]);
    }
    table
}

pub fn history_table(header: &Header) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Line")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, line) in header.history.iter().enumerate() {
        table.add_row(vec![dim_cell(index + 1), Cell::new(line)]);
    }
    table
}

pub fn batch_table(header: &Header) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Serial"),
        header_cell("Title"),
        header_cell("Integers"),
        header_cell("Reals"),
        header_cell("Axes"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for batch in &header.batches {
        table.add_row(vec![
            Cell::new(batch.serial),
            text_cell(&batch.title),
            Cell::new(batch.integers.len()),
            Cell::new(batch.reals.len()),
            if batch.bhch.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(batch.bhch.join(", "))
            },
        ]);
    }
    table
}

/// Remaining header records as written in the file.
pub fn record_table(header: &Header) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Keyword"), header_cell("Value")]);
    apply_table_style(&mut table);
    for record in &header.records {
        let keyword = record.keyword();
        table.add_row(vec![
            Cell::new(keyword).fg(Color::Blue),
            record_value_cell(record),
        ]);
    }
    table
}

fn record_value_cell(record: &HeaderRecord) -> Cell {
    match record.to_line() {
        Ok(line) => {
            let value = line
                .strip_prefix(record.keyword().as_str())
                .unwrap_or(&line)
                .trim();
            text_cell(value)
        }
        Err(error) => Cell::new(error).fg(Color::Red),
    }
}

fn format_cell(cell: &[f32; 6]) -> String {
    cell.iter()
        .map(|value| format!("{value:.2}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_wide_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
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

fn text_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    value.map_or_else(|| dim_cell("-"), text_cell)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
