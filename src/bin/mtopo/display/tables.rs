use std::io::{self, Write};

use mtase_topology::{BondType, Motif, Session, TopologyResult};

use crate::util::text::{pack, truncate};

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

struct Column {
    header: &'static str,
    width: usize,
    align: Align,
}

const fn left(header: &'static str, width: usize) -> Column {
    Column {
        header,
        width,
        align: Align::Left,
    }
}

const fn right(header: &'static str, width: usize) -> Column {
    Column {
        header,
        width,
        align: Align::Right,
    }
}

pub fn print_structure_info(session: &Session<'_>) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let structure = session.structure();
    let segmentation = session.segmentation();
    let chains: String = structure.chains().iter().collect();

    let rows = vec![
        ("Residues", format!("{}", structure.len())),
        ("Chains", format!("{} ({})", structure.chains().len(), chains)),
        ("Strands", format!("{}", segmentation.strands.len())),
        ("Helices", format!("{}", segmentation.helices.len())),
        ("Strand Contacts", format!("{}", session.graph().edge_count())),
    ];

    print_kv_table(&mut out, "Structure Summary", &rows);
}

pub fn print_motifs(motifs: &[Motif]) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let columns = [
        left("Motif", 8),
        right("Anchor", 8),
        left("S4", 11),
        left("Pattern", 16),
    ];
    let rows: Vec<Vec<String>> = motifs
        .iter()
        .map(|m| {
            vec![
                m.text.clone(),
                m.anchor.to_string(),
                m.strand_range.to_string(),
                m.pattern.clone(),
            ]
        })
        .collect();

    print_grid(&mut out, "Catalytic Motifs", &columns, &rows);
}

pub fn print_topology(result: &TopologyResult) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let _ = writeln!(out);
    print_kv_table(
        &mut out,
        &format!("Chain {} · {} at {}", result.chain, result.motif.text, result.motif.anchor),
        &[
            ("S4", result.s4_range().to_string()),
            ("Path Strands", format!("{}", result.full_path.len())),
            ("Named Strands", format!("{}", result.name_map.len())),
            ("Helices", format!("{}", result.helices.len())),
        ],
    );

    print_strands(&mut out, result);
    if !result.helices.is_empty() {
        print_helices(&mut out, result);
    }
    print_linear_topology(&mut out, result);
}

fn print_strands(out: &mut impl Write, result: &TopologyResult) {
    let helix_names = |starts: &[i32]| -> String {
        let names: Vec<&str> = starts
            .iter()
            .filter_map(|&s| result.helix(s).map(|h| h.display_name.as_str()))
            .collect();
        if names.is_empty() {
            "-".to_string()
        } else {
            names.join(",")
        }
    };

    let columns = [
        left("Strand", 6),
        left("Residues", 9),
        left("Dir", 3),
        left("Bond", 5),
        left("Above", 7),
        left("Below", 7),
    ];
    let rows: Vec<Vec<String>> = result
        .strands
        .iter()
        .map(|r| {
            vec![
                r.name.to_string(),
                r.range.to_string(),
                r.direction.arrow().to_string(),
                bond_label(r.bond).to_string(),
                helix_names(&r.helices_above),
                helix_names(&r.helices_below),
            ]
        })
        .collect();

    print_grid(out, "Strands", &columns, &rows);
}

fn print_helices(out: &mut impl Write, result: &TopologyResult) {
    let columns = [
        left("Helix", 7),
        left("Residues", 9),
        left("Side", 4),
        right("Height", 6),
        right("Dist", 6),
        left("Near", 4),
    ];
    let rows: Vec<Vec<String>> = result
        .helices
        .iter()
        .map(|h| {
            vec![
                h.display_name.clone(),
                h.range.to_string(),
                h.side.to_string(),
                format!("{:.1}", h.height()),
                format!("{:.1}", h.distance),
                h.nearest_strand.to_string(),
            ]
        })
        .collect();

    print_grid(out, "Helices (Å)", &columns, &rows);
}

fn print_linear_topology(out: &mut impl Write, result: &TopologyResult) {
    let width = SAFE_TABLE_WIDTH - 4;
    let elements = result.linear_topology();
    let lines = pack(elements.iter().map(|e| e.label.as_str()), " — ", width);

    let _ = writeln!(out, "{}┌─ Linear Topology (N→C) ─┐", INDENT);
    let _ = writeln!(out, "{}┌{}┐", INDENT, "─".repeat(width + 2));
    for line in lines {
        let _ = writeln!(out, "{}│ {:<width$} │", INDENT, truncate(&line, width), width = width);
    }
    let _ = writeln!(out, "{}└{}┘", INDENT, "─".repeat(width + 2));
}

fn bond_label(bond: BondType) -> &'static str {
    match bond {
        BondType::Edge => "Edge",
        BondType::Parallel => "Para",
        BondType::Antiparallel => "Anti",
    }
}

fn print_grid(out: &mut impl Write, title: &str, columns: &[Column], rows: &[Vec<String>]) {
    let headers: Vec<&str> = columns.iter().map(|c| c.header).collect();

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(out, "{}", grid_rule(columns, "┌", "┬", "┐"));
    let _ = writeln!(out, "{}", grid_line(columns, &headers));
    let _ = writeln!(out, "{}", grid_rule(columns, "├", "┼", "┤"));
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        let _ = writeln!(out, "{}", grid_line(columns, &cells));
    }
    let _ = writeln!(out, "{}", grid_rule(columns, "└", "┴", "┘"));
}

fn grid_rule(columns: &[Column], left: &str, mid: &str, right: &str) -> String {
    let segments: Vec<String> = columns.iter().map(|c| "─".repeat(c.width + 2)).collect();
    format!("{}{}{}{}", INDENT, left, segments.join(mid), right)
}

fn grid_line(columns: &[Column], cells: &[&str]) -> String {
    let mut line = format!("{}│", INDENT);
    for (column, cell) in columns.iter().zip(cells) {
        let cell = truncate(cell, column.width);
        let w = column.width;
        match column.align {
            Align::Left => line.push_str(&format!(" {:<w$} │", cell)),
            Align::Right => line.push_str(&format!(" {:>w$} │", cell)),
        }
    }
    line
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 7;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    print_grid(
        out,
        title,
        &[left("Metric", key_w), right("Value", val_w)],
        &rows
            .iter()
            .map(|(k, v)| vec![k.to_string(), v.clone()])
            .collect::<Vec<_>>(),
    );
}
