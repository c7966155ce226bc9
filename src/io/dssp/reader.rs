use crate::io::error::Error;
use crate::model::residue::{Residue, ResidueId, StructureCode};
use crate::model::structure::Structure;
use std::io::BufRead;
use std::ops::Range;

/// Text that marks the column header line of the residue table.
pub const HEADER_MARKER: &str = "  #  RESIDUE";

const NUMBER: Range<usize> = 5..10;
const CHAIN: usize = 11;
const AMINO_ACID: usize = 13;
const STRUCTURE: usize = 16;
const X: Range<usize> = 115..122;
const Y: Range<usize> = 123..130;
const Z: Range<usize> = 131..138;

/// Reads the residue table of a DSSP file.
///
/// Chain-break records (`!`) and records without a residue number are
/// skipped. A blank chain column means chain `A`.
pub fn read<R: BufRead>(reader: R) -> Result<Structure, Error> {
    let lines = collect_lines(reader)?;

    let header = lines
        .iter()
        .position(|(_, line)| line.contains(HEADER_MARKER))
        .ok_or(Error::MissingHeader)?;

    let mut residues = Vec::new();
    let mut breaks = 0usize;
    for (ln, raw) in &lines[header + 1..] {
        match parse_record(*ln, raw)? {
            Some(residue) => residues.push(residue),
            None => breaks += 1,
        }
    }

    tracing::debug!(
        records = residues.len(),
        skipped = breaks,
        "DSSP residue table read"
    );

    Ok(Structure::new(residues))
}

fn collect_lines<R: BufRead>(reader: R) -> Result<Vec<(usize, String)>, Error> {
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|v| (i + 1, v)).map_err(|e| Error::Io { source: e }))
        .collect()
}

fn column(raw: &str, at: usize) -> Option<char> {
    raw.as_bytes().get(at).map(|&b| b as char)
}

fn field(raw: &str, range: Range<usize>) -> Option<&str> {
    raw.get(range).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_record(ln: usize, raw: &str) -> Result<Option<Residue>, Error> {
    let Some(number) = field(raw, NUMBER) else {
        return Ok(None);
    };
    let amino_acid = column(raw, AMINO_ACID).unwrap_or('X');
    if amino_acid == '!' {
        return Ok(None);
    }

    let number = number
        .parse::<i32>()
        .map_err(|_| Error::parse(ln, format!("invalid residue number '{number}'")))?;

    let chain = column(raw, CHAIN)
        .filter(|c| !c.is_whitespace())
        .unwrap_or('A');
    let code = StructureCode::from_dssp(column(raw, STRUCTURE).unwrap_or(' '));

    let coordinate = |range: Range<usize>, axis: &str| -> Result<f64, Error> {
        field(raw, range)
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| Error::parse(ln, format!("invalid Cα {axis} coordinate")))
    };
    let position = [coordinate(X, "x")?, coordinate(Y, "y")?, coordinate(Z, "z")?];

    Ok(Some(Residue::new(
        ResidueId::new(chain, number),
        code,
        amino_acid,
        position,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const PREAMBLE: &str = "\
==== Secondary Structure Definition by the program DSSP, CMBI version 2.1.0 ==== DATE=2024-01-01
REFERENCE W. KABSCH AND C.SANDER, BIOPOLYMERS 22 (1983) 2577-2637
    3  1  0  0  0 TOTAL NUMBER OF RESIDUES, NUMBER OF CHAINS, NUMBER OF SS-BRIDGES(TOTAL,INTRACHAIN,INTERCHAIN)
  #  RESIDUE AA STRUCTURE BP1 BP2  ACC     N-H-->O    O-->H-N    N-H-->O    O-->H-N    TCO  KAPPA ALPHA  PHI   PSI    X-CA   Y-CA   Z-CA
";

    fn record(seq: usize, number: i32, chain: char, aa: char, ss: char, xyz: [f64; 3]) -> String {
        let mut line = format!("{seq:>5}{number:>5} {chain} {aa}  {ss}");
        line.push_str(&" ".repeat(115 - line.len()));
        line.push_str(&format!("{:>7.1} {:>7.1} {:>7.1}", xyz[0], xyz[1], xyz[2]));
        line
    }

    fn dssp(records: &[String]) -> String {
        let mut text = PREAMBLE.to_string();
        for r in records {
            text.push_str(r);
            text.push('\n');
        }
        text
    }

    #[test]
    fn reads_fixed_columns() {
        let text = dssp(&[
            record(1, 10, 'A', 'M', 'E', [1.5, -2.0, 30.2]),
            record(2, 11, 'A', 'K', 'H', [3.0, 4.0, 5.0]),
            record(3, 12, 'B', 'D', ' ', [6.0, 7.0, 8.0]),
        ]);
        let s = read(Cursor::new(text)).unwrap();

        assert_eq!(s.len(), 3);
        assert_eq!(s.sequence(), "MKD");
        assert_eq!(s.chains(), &['A', 'B']);

        let first = s.residue(&ResidueId::new('A', 10)).unwrap();
        assert_eq!(first.code, StructureCode::Strand);
        assert_eq!(first.position, [1.5, -2.0, 30.2]);
        assert_eq!(s.residue_at(1).unwrap().code, StructureCode::Helix);
        assert_eq!(s.residue_at(2).unwrap().code, StructureCode::Coil);
    }

    #[test]
    fn blank_chain_defaults_to_a() {
        let text = dssp(&[record(1, 7, ' ', 'G', 'E', [0.0, 0.0, 0.0])]);
        let s = read(Cursor::new(text)).unwrap();
        assert!(s.residue(&ResidueId::new('A', 7)).is_some());
    }

    #[test]
    fn chain_breaks_and_blank_lines_are_skipped() {
        let brk = format!("{:>5}{:>5} {} {}", 2, "", ' ', '!');
        let text = dssp(&[
            record(1, 1, 'A', 'M', 'E', [0.0, 0.0, 0.0]),
            brk,
            String::new(),
            record(3, 5, 'A', 'K', 'E', [1.0, 0.0, 0.0]),
        ]);
        let s = read(Cursor::new(text)).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.sequence(), "MK");
    }

    #[test]
    fn malformed_coordinates_report_the_line() {
        let mut bad = record(1, 1, 'A', 'M', 'E', [0.0, 0.0, 0.0]);
        bad.replace_range(115..122, "  abc  ");
        let err = read(Cursor::new(dssp(&[bad]))).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 5, .. }), "{err}");
    }

    #[test]
    fn truncated_record_is_a_parse_error() {
        let text = format!("{PREAMBLE}{:>5}{:>5} A M  E\n", 1, 1);
        assert!(matches!(
            read(Cursor::new(text)),
            Err(Error::Parse { line: 5, .. })
        ));
    }

    #[test]
    fn missing_header_is_reported() {
        let err = read(Cursor::new("HEADER only\n")).unwrap_err();
        assert!(matches!(err, Error::MissingHeader));
    }

    #[test]
    fn duplicate_records_keep_the_first() {
        let text = dssp(&[
            record(1, 4, 'A', 'M', 'E', [0.0, 0.0, 0.0]),
            record(2, 4, 'A', 'K', 'H', [9.0, 9.0, 9.0]),
        ]);
        let s = read(Cursor::new(text)).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.residue_at(0).unwrap().amino_acid, 'M');
    }
}
