//! Helix side classification relative to the sheet, helix numbering, and
//! per-strand helix contacts.

use std::collections::BTreeMap;

use super::geometry::{distance, dot, sub};
use super::view::ChainView;
use super::walker::SheetTopology;
use crate::model::segment::{Helix, ResidueRange};
use crate::model::topology::{CoordinateFrame, HelixAssignment, Side, StrandName, StrandRecord};

/// Classifies every chain helix of at least `min_length` residues whose
/// centroid lies within `radius` of a path strand centroid.
///
/// The nearest path strand is the first strict minimum in `full_path` order.
/// The helix is `Up` when (helix centroid − nearest strand centroid) projects
/// positively onto the frame's `up` axis.
pub fn classify(
    view: &ChainView<'_>,
    topology: &SheetTopology,
    frame: &CoordinateFrame,
    min_length: usize,
    radius: f64,
) -> Vec<HelixAssignment> {
    let structure = view.structure;
    let strand_centroids: Vec<(usize, [f64; 3])> = topology
        .full_path
        .iter()
        .map(|&idx| (idx, view.strands[idx].centroid(structure)))
        .collect();

    let mut assignments = Vec::new();
    for helix in view.helices.iter().filter(|h| h.len() >= min_length) {
        let center = helix.centroid(structure);

        let mut nearest: Option<(usize, [f64; 3], f64)> = None;
        for &(idx, c) in &strand_centroids {
            let d = distance(center, c);
            if nearest.is_none_or(|(_, _, best)| d < best) {
                nearest = Some((idx, c, d));
            }
        }

        let Some((nearest_index, strand_center, d)) = nearest else {
            continue;
        };
        if d >= radius {
            tracing::debug!(
                helix = %helix.range(),
                distance = d,
                radius,
                "helix too far from the sheet; not classified"
            );
            continue;
        }

        let projection = dot(sub(center, strand_center), frame.up);
        let side = if projection > 0.0 { Side::Up } else { Side::Down };
        let nearest_strand = topology
            .names
            .get(&nearest_index)
            .copied()
            .unwrap_or(StrandName::CATALYTIC);
        let sub_index = helix_number(helix.start, helix.end, &topology.name_map);
        let display_name = display_name(side, sub_index, helix.start);

        tracing::debug!(
            helix = %helix.range(),
            %display_name,
            projection,
            nearest = %nearest_strand,
            distance = d,
            "helix classified"
        );

        assignments.push(HelixAssignment {
            range: helix.range(),
            side,
            projection,
            distance: d,
            nearest_strand,
            nearest_index,
            sub_index,
            display_name,
        });
    }

    assignments
}

/// Positional helix number from where the helix start falls between named
/// strands. The first matching rule wins; `None` when no rule applies.
pub fn helix_number(start: i32, end: i32, names: &BTreeMap<StrandName, ResidueRange>) -> Option<u8> {
    let get = |n: i32| names.get(&StrandName(n));
    let between = |a: i32, b: i32| match (get(a), get(b)) {
        (Some(ra), Some(rb)) => ra.end < start && start < rb.start,
        _ => false,
    };

    if between(7, 4) {
        return Some(3);
    }
    if let Some(s4) = get(4) {
        if start > s4.end && get(3).is_none_or(|s3| end < s3.start) {
            return Some(2);
        }
    }
    if between(3, 1) || between(4, 5) {
        return Some(1);
    }
    if between(5, 6) {
        return Some(2);
    }
    if between(6, 7) {
        return Some(3);
    }
    None
}

/// `Hu2`-style name, or `Hu_<start>` when the helix has no number.
pub fn display_name(side: Side, number: Option<u8>, start: i32) -> String {
    match number {
        Some(n) => format!("{}{}", side.label(), n),
        None => format!("{}_{}", side.label(), start),
    }
}

/// Fills `helices_above` / `helices_below` of every strand record with the
/// classified helices that have any Cα within `radius` of any strand Cα.
pub fn attach_contacts(
    view: &ChainView<'_>,
    records: &mut [StrandRecord],
    assignments: &[HelixAssignment],
    radius: f64,
) {
    let structure = view.structure;
    let classified: Vec<(&Helix, &HelixAssignment)> = assignments
        .iter()
        .filter_map(|a| {
            view.helices
                .iter()
                .find(|h| h.range() == a.range)
                .map(|&h| (h, a))
        })
        .collect();

    for record in records.iter_mut() {
        let strand = view.strands[record.local_index];
        for &(helix, assignment) in &classified {
            let touches = strand
                .positions(structure)
                .any(|p| helix.positions(structure).any(|q| distance(p, q) < radius));
            if !touches {
                continue;
            }
            let list = match assignment.side {
                Side::Up => &mut record.helices_above,
                Side::Down => &mut record.helices_below,
            };
            if !list.contains(&assignment.start()) {
                list.push(assignment.start());
            }
        }
    }
}
