//! Horizontal and depth placement, one generation row at a time
//!
//! Rows are placed top-down so every cluster can be centred under its parents,
//! which are always on an earlier row.

use crate::index::FamilyIndex;
use crate::LayoutConfig;
use kindred_domain::Position;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

/// Same-row units sharing a parent set, or parentless units tied by a sibling link
#[derive(Debug)]
struct Cluster {
    units: Vec<Vec<usize>>,
    parents: Vec<usize>,
    ideal_center: Option<f64>,
    connected: bool,
}

impl Cluster {
    fn width(&self, config: &LayoutConfig) -> f64 {
        let units: f64 = self.units.iter().map(|u| unit_width(u, config)).sum();
        let gaps = self.units.len().saturating_sub(1) as f64;
        units + gaps * config.horizontal_spacing
    }

    /// Placement priority: centred clusters by centre, then free-standing
    /// connected roots, then people with no relationships at all
    fn rank(&self) -> u8 {
        match (self.ideal_center, self.connected) {
            (Some(_), _) => 0,
            (None, true) => 1,
            (None, false) => 2,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
enum ClusterKey {
    Parents(Vec<usize>),
    Root(usize),
}

fn unit_width(unit: &[usize], config: &LayoutConfig) -> f64 {
    unit.len().saturating_sub(1) as f64 * config.couple_spacing
}

/// Depth layer sequence: 0, +1, -1, +2, -2, ...
fn depth_layer(k: usize) -> f64 {
    match k {
        0 => 0.0,
        k if k % 2 == 1 => k.div_ceil(2) as f64,
        k => -((k / 2) as f64),
    }
}

/// Position for every person, indexed like `index.ids`
pub(crate) fn place(index: &FamilyIndex, generation: &[u32], config: &LayoutConfig) -> Vec<Position> {
    let mut positions = vec![Position::zeros(); index.len()];
    let mut placed = vec![false; index.len()];

    let mut rows: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (v, &g) in generation.iter().enumerate() {
        rows.entry(g).or_default().push(v);
    }

    for (g, row) in rows {
        let y = 0.0 - f64::from(g) * config.vertical_spacing;
        let units = build_units(index, &row);
        let clusters = build_clusters(index, units, &positions, &placed);
        place_row(&clusters, y, config, &mut positions);
        for &v in &row {
            placed[v] = true;
        }
    }

    positions
}

/// Spouse-connected people on the row, each arranged left to right
fn build_units(index: &FamilyIndex, row: &[usize]) -> Vec<Vec<usize>> {
    let in_row: HashSet<usize> = row.iter().copied().collect();
    let mut assigned: HashSet<usize> = HashSet::new();
    let mut units = Vec::new();

    for &start in row {
        if !assigned.insert(start) {
            continue;
        }
        let mut component = vec![start];
        let mut next = 0;
        while next < component.len() {
            let v = component[next];
            next += 1;
            for &spouse in &index.spouses[v] {
                if in_row.contains(&spouse) && assigned.insert(spouse) {
                    component.push(spouse);
                }
            }
        }
        units.push(arrange_unit(index, component, &in_row));
    }

    units
}

/// Put the most-married member in the middle with partners alternating sides
fn arrange_unit(index: &FamilyIndex, component: Vec<usize>, in_row: &HashSet<usize>) -> Vec<usize> {
    if component.len() <= 2 {
        return component;
    }

    let degree = |v: usize| index.spouses[v].iter().filter(|s| in_row.contains(s)).count();
    let Some(hub) = component
        .iter()
        .copied()
        .max_by_key(|&v| (degree(v), Reverse(v)))
    else {
        return component;
    };

    let members: HashSet<usize> = component.iter().copied().collect();
    let mut visited = HashSet::from([hub]);
    let mut queue = VecDeque::from([hub]);
    let mut arranged = VecDeque::from([hub]);
    let mut count = 0usize;
    while let Some(v) = queue.pop_front() {
        for &spouse in &index.spouses[v] {
            if members.contains(&spouse) && visited.insert(spouse) {
                if count % 2 == 0 {
                    arranged.push_back(spouse);
                } else {
                    arranged.push_front(spouse);
                }
                count += 1;
                queue.push_back(spouse);
            }
        }
    }

    arranged.into_iter().collect()
}

fn find(roots: &mut [usize], mut x: usize) -> usize {
    while roots[x] != x {
        roots[x] = roots[roots[x]];
        x = roots[x];
    }
    x
}

fn build_clusters(
    index: &FamilyIndex,
    units: Vec<Vec<usize>>,
    positions: &[Position],
    placed: &[bool],
) -> Vec<Cluster> {
    // A unit belongs with the siblings of its first member that has parents
    let parent_sets: Vec<Vec<usize>> = units
        .iter()
        .map(|unit| {
            unit.iter()
                .find(|&&v| !index.parents[v].is_empty())
                .map(|&v| {
                    let mut parents = index.parents[v].clone();
                    parents.sort_unstable();
                    parents
                })
                .unwrap_or_default()
        })
        .collect();

    let unit_of: HashMap<usize, usize> = units
        .iter()
        .enumerate()
        .flat_map(|(u, unit)| unit.iter().map(move |&v| (v, u)))
        .collect();

    let mut roots: Vec<usize> = (0..units.len()).collect();
    for (u, unit) in units.iter().enumerate() {
        if !parent_sets[u].is_empty() {
            continue;
        }
        for &v in unit {
            for sibling in &index.siblings[v] {
                if let Some(&w) = unit_of.get(sibling) {
                    if parent_sets[w].is_empty() {
                        let (a, b) = (find(&mut roots, u), find(&mut roots, w));
                        roots[a.max(b)] = a.min(b);
                    }
                }
            }
        }
    }

    let mut clusters: Vec<Cluster> = Vec::new();
    let mut by_key: HashMap<ClusterKey, usize> = HashMap::new();
    for (u, unit) in units.into_iter().enumerate() {
        let parents = parent_sets[u].clone();
        let key = if parents.is_empty() {
            ClusterKey::Root(find(&mut roots, u))
        } else {
            ClusterKey::Parents(parents.clone())
        };

        let slot = *by_key.entry(key).or_insert_with(|| {
            clusters.push(Cluster {
                units: Vec::new(),
                parents,
                ideal_center: None,
                connected: false,
            });
            clusters.len() - 1
        });

        let cluster = &mut clusters[slot];
        cluster.connected |= unit.iter().any(|&v| index.connected[v]);
        cluster.units.push(unit);
    }

    for cluster in &mut clusters {
        let xs: Vec<f64> = cluster
            .parents
            .iter()
            .filter(|&&p| placed[p])
            .map(|&p| positions[p].x)
            .collect();
        if !xs.is_empty() {
            cluster.ideal_center = Some(xs.iter().sum::<f64>() / xs.len() as f64);
        }
    }

    clusters
}

/// Sweep clusters left to right, each as close to its ideal centre as the
/// previous cluster allows
fn place_row(clusters: &[Cluster], y: f64, config: &LayoutConfig, positions: &mut [Position]) {
    let mut order: Vec<usize> = (0..clusters.len()).collect();
    order.sort_by(|&a, &b| {
        let (ca, cb) = (&clusters[a], &clusters[b]);
        ca.rank().cmp(&cb.rank()).then_with(|| {
            ca.ideal_center
                .unwrap_or(0.0)
                .total_cmp(&cb.ideal_center.unwrap_or(0.0))
        })
    });

    let mut right_edge: Option<f64> = None;
    let mut earlier_parents: Vec<&[usize]> = Vec::new();
    let mut members: Vec<usize> = Vec::new();

    for &c in &order {
        let cluster = &clusters[c];
        let width = cluster.width(config);

        let mut left = match (cluster.ideal_center, right_edge) {
            (Some(center), _) => center - width / 2.0,
            (None, Some(edge)) => edge + config.horizontal_spacing,
            (None, None) => 0.0,
        };
        if let Some(edge) = right_edge {
            left = left.max(edge + config.horizontal_spacing);
        }

        // Half-sibling groups (a parent shared with an earlier cluster) step off
        // the row plane so their links do not run through each other
        let layer = if cluster.parents.is_empty() {
            0
        } else {
            earlier_parents
                .iter()
                .filter(|parents| parents.iter().any(|p| cluster.parents.contains(p)))
                .count()
        };
        let z = depth_layer(layer) * config.depth_spacing;

        let mut x = left;
        for unit in &cluster.units {
            for (j, &v) in unit.iter().enumerate() {
                positions[v] = Position::new(x + j as f64 * config.couple_spacing, y, z);
                members.push(v);
            }
            x += unit_width(unit, config) + config.horizontal_spacing;
        }

        right_edge = Some(left + width);
        earlier_parents.push(&cluster.parents);
    }

    // A row with nothing to hang under (the roots) is centred on x = 0
    if clusters.iter().all(|c| c.ideal_center.is_none()) && !members.is_empty() {
        let (min, max) = members.iter().fold((f64::MAX, f64::MIN), |(lo, hi), &v| {
            (lo.min(positions[v].x), hi.max(positions[v].x))
        });
        let shift = (min + max) / 2.0;
        for &v in &members {
            positions[v].x -= shift;
        }
    }
}
