use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use placematch_cli::workflow::{ApplyOutcome, MatchOutcome};
use placematch_engine::MatchOutput;
use placematch_model::{MatchOrigin, MatchRow, RankedCandidate};

pub fn print_match_summary(outcome: &MatchOutcome) {
    if let Some(path) = &outcome.mapping_path {
        println!("Mapping table: {}", path.display());
    }
    if let Some(path) = &outcome.report_path {
        println!("Match report: {}", path.display());
    }

    let counts = outcome.mapping.count_by_origin();
    let count = |origin: MatchOrigin| counts.get(&origin).copied().unwrap_or(0);

    let mut table = Table::new();
    table.set_header(vec![header_cell("Names"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Source names"), Cell::new(outcome.source_names)]);
    table.add_row(vec![Cell::new("Reference names"), Cell::new(outcome.target_names)]);
    table.add_row(vec![
        Cell::new("Exact matches"),
        count_cell(count(MatchOrigin::Exact), Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Automatic matches"),
        count_cell(count(MatchOrigin::Auto), Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Manual overrides"),
        count_cell(count(MatchOrigin::Manual), Color::Blue),
    ]);
    table.add_row(vec![
        Cell::new("Unresolved")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(count(MatchOrigin::Unresolved), Color::Red).add_attribute(Attribute::Bold),
    ]);
    if !outcome.report.collisions.is_empty() {
        table.add_row(vec![
            Cell::new("Normalization collisions"),
            count_cell(outcome.report.collisions.len(), Color::Yellow),
        ]);
    }
    println!("{table}");

    print_residual_table(outcome);
    print_collision_table(outcome);
}

/// Unresolved names with their closest candidates, for manual review.
fn print_residual_table(outcome: &MatchOutcome) {
    let unresolved = outcome.unresolved();
    if unresolved.is_empty() {
        return;
    }
    let rows: Vec<&MatchRow> = match &outcome.report.output {
        MatchOutput::Table(rows) => rows.iter().collect(),
        MatchOutput::Detail(_) => Vec::new(),
    };

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Unresolved"),
        header_cell("By distance"),
        header_cell("By ratio"),
        header_cell("Distance"),
        header_cell("Ratio"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for name in unresolved {
        match rows.iter().find(|row| row.source_name == name) {
            Some(row) => {
                let by_ratio = if row.metrics_agree {
                    Cell::new(&row.name_by_ratio)
                } else {
                    Cell::new(&row.name_by_ratio).fg(Color::Yellow)
                };
                table.add_row(vec![
                    Cell::new(name).add_attribute(Attribute::Bold),
                    Cell::new(&row.name_by_distance),
                    by_ratio,
                    Cell::new(row.distance),
                    Cell::new(format!("{:.3}", row.ratio)),
                ]);
            }
            None => {
                table.add_row(vec![
                    Cell::new(name).add_attribute(Attribute::Bold),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                ]);
            }
        }
    }
    println!("{table}");
}

fn print_collision_table(outcome: &MatchOutcome) {
    if outcome.report.collisions.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Normalized"), header_cell("Raw forms")]);
    apply_table_style(&mut table);
    for collision in &outcome.report.collisions {
        table.add_row(vec![
            Cell::new(&collision.normalized).fg(Color::Yellow),
            Cell::new(collision.raw_forms.join(" | ")),
        ]);
    }
    eprintln!("Names that collapse after normalization (last form wins):");
    eprintln!("{table}");
}

pub fn print_apply_summary(outcome: &ApplyOutcome) {
    println!("Output: {}", outcome.output.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Rows"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Total"), Cell::new(outcome.rows)]);
    table.add_row(vec![
        Cell::new("Relabeled"),
        count_cell(outcome.stats.relabeled, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Unchanged"),
        count_cell(outcome.stats.unchanged, Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("Empty"), dim_cell(outcome.stats.missing)]);
    println!("{table}");
}

pub fn print_ranked(name: &str, ranked: &[RankedCandidate]) {
    println!("Candidates for: {name}");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Reference name"),
        header_cell("Distance"),
        header_cell("Ratio"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (idx, candidate) in ranked.iter().enumerate() {
        table.add_row(vec![
            dim_cell(idx + 1),
            Cell::new(&candidate.target_name),
            Cell::new(candidate.distance),
            Cell::new(format!("{:.3}", candidate.ratio)),
        ]);
    }
    println!("{table}");
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
