//! Sheet path expansion and canonical strand naming around the catalytic strand.
//!
//! Naming proceeds in four stages:
//!
//! 1. **Path expansion** – two greedy walks from S4 over the contact graph
//!    sharing one visited set; the second arm is reversed and prepended to
//!    the first to form `full_path`.
//! 2. **Neighbor partition** – S4's neighbors split into C-terminal ("right")
//!    and N-terminal ("left") strands by residue numbering.
//! 3. **Chained naming** – S3/S5 are picked from the partition and names are
//!    propagated outward (S2, S1, S0, … and S6, S7, …) along path members.
//! 4. **Positional fallback** – any path strand still unnamed is named by its
//!    offset from S4 along `full_path`.
//!
//! Every "pick a neighbor" step iterates neighbors in ascending strand index,
//! so results never depend on container ordering.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use super::adjacency::AdjacencyGraph;
use super::error::Error;
use super::geometry::{Vec3, dot};
use super::view::ChainView;
use crate::model::segment::ResidueRange;
use crate::model::topology::{BondType, Direction, StrandName, StrandRecord};

/// Named sheet produced by the walker, before frame construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTopology {
    pub full_path: Vec<usize>,
    pub s4: usize,
    pub s3: usize,
    pub s5: Option<usize>,
    pub names: BTreeMap<usize, StrandName>,
    pub name_map: BTreeMap<StrandName, ResidueRange>,
    /// Named strands sorted by descending canonical number.
    pub strands: Vec<StrandRecord>,
}

/// Result of the naming stages.
#[derive(Debug, Clone, PartialEq)]
pub struct Naming {
    pub names: BTreeMap<usize, StrandName>,
    pub name_map: BTreeMap<StrandName, ResidueRange>,
    pub s3: usize,
    pub s5: Option<usize>,
}

/// Runs every walker stage on a chain view with S4 at local index `s4`.
///
/// # Errors
///
/// Returns [`Error::NoCounterStrand`] when no S3 can be determined, or
/// [`Error::OutOfRangeIndex`] if `s4` is not a strand of the view.
pub fn walk(view: &ChainView<'_>, s4: usize) -> Result<SheetTopology, Error> {
    if s4 >= view.strands.len() {
        return Err(Error::out_of_range(view.chain, s4, view.strands.len()));
    }

    let spans: Vec<ResidueRange> = view.strands.iter().map(|s| s.range()).collect();
    let full_path = expand_path(&view.graph, &spans, s4);
    let naming = name_strands(&view.graph, &spans, s4, &full_path, view.chain)?;

    let vectors: Vec<Vec3> = view
        .strands
        .iter()
        .map(|s| s.direction(view.structure))
        .collect();
    let bonds = bond_types(&full_path, &vectors);

    let mut strands: Vec<StrandRecord> = naming
        .names
        .iter()
        .map(|(&idx, &name)| StrandRecord {
            local_index: idx,
            global_index: view.global[idx],
            name,
            range: spans[idx],
            direction: direction(vectors[idx], vectors[s4]),
            bond: bonds.get(&idx).copied().unwrap_or(BondType::Edge),
            in_path: full_path.contains(&idx),
            helices_above: Vec::new(),
            helices_below: Vec::new(),
        })
        .collect();
    strands.sort_by_key(|r| (Reverse(r.name), r.local_index));

    Ok(SheetTopology {
        full_path,
        s4,
        s3: naming.s3,
        s5: naming.s5,
        names: naming.names,
        name_map: naming.name_map,
        strands,
    })
}

/// Greedy walk from `start`: repeatedly step to the unvisited neighbor whose
/// start residue is closest to the current strand's start residue.
///
/// Ties go to the lowest strand index. Every visited node is added to
/// `visited`; `start` itself is expected to be in it already.
pub fn expand_arm(
    graph: &AdjacencyGraph,
    spans: &[ResidueRange],
    start: usize,
    visited: &mut BTreeSet<usize>,
) -> Vec<usize> {
    let mut arm = vec![start];
    loop {
        let current = arm[arm.len() - 1];
        let current_start = spans[current].start;
        let next = graph
            .neighbors(current)
            .filter(|n| !visited.contains(n))
            .min_by_key(|&n| ((spans[n].start - current_start).abs(), n));

        let Some(next) = next else {
            break;
        };
        arm.push(next);
        visited.insert(next);
    }
    arm
}

/// Builds `full_path` from two arms expanded out of `s4` with one shared
/// visited set seeded with `s4`.
///
/// The first arm usually consumes everything reachable, leaving the second
/// arm as just `[s4]`. The path is the reversed second arm (without its
/// trailing S4) followed by the first arm.
pub fn expand_path(graph: &AdjacencyGraph, spans: &[ResidueRange], s4: usize) -> Vec<usize> {
    let mut visited = BTreeSet::from([s4]);
    let forward = expand_arm(graph, spans, s4, &mut visited);
    let backward = expand_arm(graph, spans, s4, &mut visited);

    tracing::debug!(?forward, ?backward, "sheet path arms expanded");

    let mut path: Vec<usize> = backward.into_iter().skip(1).rev().collect();
    path.extend(forward);
    path
}

struct NameBook<'a> {
    spans: &'a [ResidueRange],
    names: BTreeMap<usize, StrandName>,
    name_map: BTreeMap<StrandName, ResidueRange>,
}

impl<'a> NameBook<'a> {
    fn new(spans: &'a [ResidueRange]) -> Self {
        Self {
            spans,
            names: BTreeMap::new(),
            name_map: BTreeMap::new(),
        }
    }

    fn assign(&mut self, idx: usize, name: StrandName) {
        tracing::debug!(strand = idx, %name, range = %self.spans[idx], "strand named");
        self.names.insert(idx, name);
        self.name_map.insert(name, self.spans[idx]);
    }

    fn is_named(&self, idx: usize) -> bool {
        self.names.contains_key(&idx)
    }

    /// From `from`, keep stepping to the lowest-index unnamed neighbor that
    /// lies on `path`, naming it `first`, `first + step`, …
    fn walk_outward(
        &mut self,
        graph: &AdjacencyGraph,
        path: &BTreeSet<usize>,
        from: usize,
        first: i32,
        step: i32,
    ) {
        let mut current = from;
        let mut number = first;
        while let Some(next) = graph
            .neighbors(current)
            .find(|&n| !self.is_named(n) && path.contains(&n))
        {
            self.assign(next, StrandName(number));
            current = next;
            number += step;
        }
    }
}

/// Assigns canonical names to the strands reachable along `full_path`.
///
/// # Errors
///
/// Returns [`Error::NoCounterStrand`] when neither side of S4 yields S3.
pub fn name_strands(
    graph: &AdjacencyGraph,
    spans: &[ResidueRange],
    s4: usize,
    full_path: &[usize],
    chain: char,
) -> Result<Naming, Error> {
    let path: BTreeSet<usize> = full_path.iter().copied().collect();
    let mut book = NameBook::new(spans);
    book.assign(s4, StrandName::CATALYTIC);

    let s4_span = spans[s4];
    let mut right: Vec<usize> = Vec::new();
    let mut left: Vec<usize> = Vec::new();
    for n in graph.neighbors(s4).filter(|&n| n != s4) {
        if spans[n].start > s4_span.end {
            right.push(n);
        } else if spans[n].end < s4_span.start {
            left.push(n);
        }
    }

    let mut s3 = None;
    let mut s5 = None;

    if !right.is_empty() {
        right.sort_by_key(|&n| (spans[n].start, n));
        tracing::debug!(?right, "naming from C-terminal neighbors of S4");

        s3 = Some(right[0]);
        book.assign(right[0], StrandName(3));

        if let Some(&second) = right.get(1) {
            s5 = Some(second);
            book.assign(second, StrandName(5));
            book.walk_outward(graph, &path, second, 6, 1);
        }

        book.walk_outward(graph, &path, right[0], 2, -1);
    } else if !left.is_empty() {
        left.sort_by_key(|&n| (Reverse(spans[n].start), n));
        tracing::debug!(?left, "naming from N-terminal neighbors of S4");

        s5 = Some(left[0]);
        book.assign(left[0], StrandName(5));
        book.walk_outward(graph, &path, left[0], 6, 1);

        if let Some(&second) = left.get(1) {
            s3 = Some(second);
            book.assign(second, StrandName(3));
            book.walk_outward(graph, &path, second, 2, -1);
        }
    }

    let s4_pos = full_path.iter().position(|&i| i == s4).unwrap_or(0) as i32;
    for (pos, &idx) in full_path.iter().enumerate() {
        if !book.is_named(idx) {
            book.assign(idx, StrandName(4 - (pos as i32 - s4_pos)));
        }
    }

    let s3 = s3.ok_or(Error::NoCounterStrand { chain, strand: s4 })?;

    Ok(Naming {
        names: book.names,
        name_map: book.name_map,
        s3,
        s5,
    })
}

/// `Up` when `v` points the same way as S4's direction vector.
pub fn direction(v: Vec3, v4: Vec3) -> Direction {
    if dot(v, v4) > 0.0 {
        Direction::Up
    } else {
        Direction::Down
    }
}

/// Pairing of two consecutive path strands from their direction vectors.
pub fn pairing(v: Vec3, previous: Vec3) -> BondType {
    if dot(v, previous) > 0.0 {
        BondType::Parallel
    } else {
        BondType::Antiparallel
    }
}

/// Bond type of every path member: the first element is the sheet edge,
/// each later element is compared with its predecessor along the path.
pub fn bond_types(full_path: &[usize], vectors: &[Vec3]) -> BTreeMap<usize, BondType> {
    let mut bonds = BTreeMap::new();
    for (pos, &idx) in full_path.iter().enumerate() {
        let bond = if pos == 0 {
            BondType::Edge
        } else {
            pairing(vectors[idx], vectors[full_path[pos - 1]])
        };
        bonds.insert(idx, bond);
    }
    bonds
}
