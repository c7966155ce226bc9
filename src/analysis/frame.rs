//! Per-chain coordinate frame anchored at the catalytic strand.

use super::error::Error;
use super::geometry::{Vec3, cross, distance, normalize, scale, sub};
use super::view::ChainView;
use crate::model::topology::{CoordinateFrame, StrandPairing};

/// Cα pairs between S4 and S3 must be strictly closer than this to orient
/// `east` (Å).
pub const PAIRING_CUTOFF: f64 = 7.0;

/// Builds the orthonormal frame for S4 at local index `s4` with S3 at `s3`.
///
/// * `origin` – centroid of S4.
/// * `north` – S4 first-to-last Cα direction.
/// * `east` – from the S4 residue to the S3 residue of the closest pair under
///   [`PAIRING_CUTOFF`]; S4→S3 centroid direction when no pair qualifies.
/// * `up` – `−(north × east)`, normalized.
///
/// # Errors
///
/// * [`Error::OutOfRangeIndex`] if either index is not a strand of the view.
/// * [`Error::DegenerateFrame`] if an axis has zero length.
pub fn build_frame(view: &ChainView<'_>, s4: usize, s3: usize) -> Result<CoordinateFrame, Error> {
    let available = view.strands.len();
    for index in [s4, s3] {
        if index >= available {
            return Err(Error::out_of_range(view.chain, index, available));
        }
    }

    let structure = view.structure;
    let strand4 = view.strands[s4];
    let strand3 = view.strands[s3];

    let origin = strand4.centroid(structure);
    let north = normalize(strand4.direction(structure))
        .ok_or_else(|| Error::degenerate_frame(view.chain, "S4 has no length along its axis"))?;

    let pairing = closest_pair(view, s4, s3);
    let raw_east: Vec3 = match &pairing {
        Some((p4, p3, _)) => sub(*p3, *p4),
        None => {
            tracing::debug!(
                chain = %view.chain,
                cutoff = PAIRING_CUTOFF,
                "no S4/S3 residue pair under cutoff; orienting east by centroids"
            );
            sub(strand3.centroid(structure), origin)
        }
    };
    let east = normalize(raw_east)
        .ok_or_else(|| Error::degenerate_frame(view.chain, "S3 coincides with S4"))?;

    let up = normalize(cross(north, east))
        .map(|v| scale(v, -1.0))
        .ok_or_else(|| Error::degenerate_frame(view.chain, "east is parallel to north"))?;

    let pairing = pairing.map(|(_, _, pair)| pair);

    Ok(CoordinateFrame {
        chain: view.chain,
        origin,
        north,
        east,
        up,
        s4,
        s3,
        pairing,
    })
}

/// First strict minimum over S4 × S3 Cα pairs below [`PAIRING_CUTOFF`].
fn closest_pair(view: &ChainView<'_>, s4: usize, s3: usize) -> Option<(Vec3, Vec3, StrandPairing)> {
    let structure = view.structure;
    let mut best: Option<(Vec3, Vec3, StrandPairing)> = None;

    for &i in &view.strands[s4].residues {
        for &j in &view.strands[s3].residues {
            let (p4, p3) = (structure.position(i), structure.position(j));
            let d = distance(p4, p3);
            let bound = best.as_ref().map_or(PAIRING_CUTOFF, |(_, _, pair)| pair.distance);
            if d < bound {
                let pair = StrandPairing {
                    s4_residue: structure.number(i),
                    s3_residue: structure.number(j),
                    distance: d,
                };
                best = Some((p4, p3, pair));
            }
        }
    }

    best
}
