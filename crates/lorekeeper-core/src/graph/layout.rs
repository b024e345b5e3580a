//! Layered auto-layout for editor graphs.
//!
//! Nodes are assigned to columns by longest-path leveling from the seed nodes,
//! then each column is ordered by the mean height of its parents (a one-pass
//! barycentric heuristic) and spread out so siblings keep a minimum vertical
//! gap. Everything is snapped to the editor grid.
//!
//! The engine never fails: edges with unknown endpoints and self-loops are
//! dropped, non-finite coordinates become 0, and nodes unreachable from the
//! seeds are parked on trailing columns.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, VecDeque};

use lorekeeper_types::graph::{GraphEdge, GraphNode, LayoutConfig, Position};

// ---------------------------------------------------------------------------
// Grid snapping
// ---------------------------------------------------------------------------

/// Round half up, matching the editor's rounding on the wire.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Snap a coordinate to the nearest multiple of `grid_size`.
///
/// Non-finite values snap to 0. A grid size of 1 or less (or a non-finite
/// one) rounds to whole units.
pub fn snap(value: f64, grid_size: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    if !grid_size.is_finite() || grid_size <= 1.0 {
        return round_half_up(value);
    }
    round_half_up(value / grid_size) * grid_size
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Adjacency over de-duplicated node indices.
struct Adjacency {
    children: Vec<Vec<usize>>,
    parents: Vec<Vec<usize>>,
    dropped: usize,
}

fn build_adjacency(index: &HashMap<&str, usize>, node_count: usize, edges: &[GraphEdge]) -> Adjacency {
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut parents: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut dropped = 0;

    for edge in edges {
        let (Some(&source), Some(&target)) =
            (index.get(edge.source.as_str()), index.get(edge.target.as_str()))
        else {
            dropped += 1;
            continue;
        };
        if source == target {
            dropped += 1;
            continue;
        }
        if !children[source].contains(&target) {
            children[source].push(target);
        }
        if !parents[target].contains(&source) {
            parents[target].push(source);
        }
    }

    Adjacency {
        children,
        parents,
        dropped,
    }
}

/// Longest-path leveling from the seed nodes.
///
/// Returns each node's level and the order in which nodes were first given a
/// level; that order breaks ties inside a column.
fn assign_levels(
    nodes: &[GraphNode],
    index: &HashMap<&str, usize>,
    adjacency: &Adjacency,
) -> (Vec<usize>, Vec<usize>) {
    let node_count = adjacency.children.len();
    let mut remaining: Vec<i64> = adjacency.parents.iter().map(|p| p.len() as i64).collect();
    let mut levels: Vec<Option<usize>> = vec![None; node_count];
    let mut discovered: Vec<usize> = Vec::with_capacity(node_count);
    let mut processed = vec![false; node_count];
    let mut queue = VecDeque::new();

    let node_indices = || {
        nodes
            .iter()
            .filter_map(move |n| index.get(n.id.as_str()).map(|&i| (n, i)))
    };
    let starts: Vec<usize> = node_indices().filter(|(n, _)| n.is_start()).map(|(_, i)| i).collect();
    let seeds: Vec<usize> = if starts.is_empty() {
        node_indices()
            .filter(|&(_, i)| remaining[i] == 0)
            .map(|(_, i)| i)
            .collect()
    } else {
        starts
    };

    for seed in seeds {
        if levels[seed].is_none() {
            levels[seed] = Some(0);
            discovered.push(seed);
            queue.push_back(seed);
        }
    }
    // Every node sits on a cycle: start from the first one.
    if queue.is_empty() {
        levels[0] = Some(0);
        discovered.push(0);
        queue.push_back(0);
    }

    while let Some(current) = queue.pop_front() {
        processed[current] = true;
        let proposed = levels[current].unwrap_or(0) + 1;

        for &target in &adjacency.children[current] {
            match levels[target] {
                Some(existing) if existing >= proposed => {}
                Some(_) => levels[target] = Some(proposed),
                None => {
                    levels[target] = Some(proposed);
                    discovered.push(target);
                }
            }

            remaining[target] -= 1;
            if remaining[target] <= 0 && !processed[target] {
                queue.push_back(target);
            }
        }
    }

    let mut max_level = levels.iter().flatten().copied().max().unwrap_or(0);
    for (idx, level) in levels.iter_mut().enumerate() {
        if level.is_none() {
            max_level += 1;
            *level = Some(max_level);
            discovered.push(idx);
        }
    }

    let levels = levels.into_iter().map(|l| l.unwrap_or(0)).collect();
    (levels, discovered)
}

/// Mean current y of a node's parents, or its own y when it has none.
fn anchor_of(idx: usize, parents: &[Vec<usize>], positions: &[Position]) -> f64 {
    let parents = &parents[idx];
    if parents.is_empty() {
        return positions[idx].y;
    }
    let sum: f64 = parents.iter().map(|&p| positions[p].y).sum();
    sum / parents.len() as f64
}

/// Compute tidy positions for an editor graph.
///
/// Returns the input nodes in input order with only `position` replaced.
/// Nodes sharing an id share one position.
pub fn layout(nodes: &[GraphNode], edges: &[GraphEdge], config: &LayoutConfig) -> Vec<GraphNode> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let grid = config.grid_size;

    // Unique ids in first-appearance order; a repeated id takes the later position.
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut positions: Vec<Position> = Vec::with_capacity(nodes.len());
    for node in nodes {
        let snapped = Position::new(snap(node.position.x, grid), snap(node.position.y, grid));
        match index.get(node.id.as_str()) {
            Some(&idx) => positions[idx] = snapped,
            None => {
                index.insert(node.id.as_str(), positions.len());
                positions.push(snapped);
            }
        }
    }

    let adjacency = build_adjacency(&index, positions.len(), edges);
    let (levels, discovered) = assign_levels(nodes, &index, &adjacency);

    let mut columns: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for idx in discovered {
        columns.entry(levels[idx]).or_default().push(idx);
    }

    for (&level, column) in &columns {
        let mut anchored: Vec<(usize, f64)> = column
            .iter()
            .map(|&idx| (idx, anchor_of(idx, &adjacency.parents, &positions)))
            .collect();
        anchored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        let x = snap(
            config.horizontal_margin + level as f64 * config.horizontal_spacing,
            grid,
        );
        let mut previous = config.vertical_margin - config.vertical_spacing;

        for (rank, (idx, anchor)) in anchored.into_iter().enumerate() {
            let baseline = config.vertical_margin + rank as f64 * config.vertical_spacing;
            let proposed = if anchor.is_finite() { anchor } else { baseline };
            let y = baseline
                .max(previous + config.vertical_spacing)
                .max(proposed);
            positions[idx] = Position::new(x, snap(y, grid));
            previous = y;
        }
    }

    tracing::debug!(
        nodes = positions.len(),
        dropped_edges = adjacency.dropped,
        levels = columns.len(),
        "auto-layout complete"
    );

    nodes
        .iter()
        .map(|node| {
            let mut placed = node.clone();
            if let Some(&idx) = index.get(node.id.as_str()) {
                placed.position = positions[idx];
            }
            placed
        })
        .collect()
}
