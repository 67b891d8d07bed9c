//! Generation assignment
//!
//! Spouses are merged into groups that share a row, and groups are ranked by the
//! longest parent-child path from the roots. A group that cannot share a row without
//! putting a child level with or above a parent (someone married to their own
//! descendant, or two couples that are each other's parents-in-law) is split back into
//! its members, which are then ranked by parent links alone.

use crate::index::FamilyIndex;
use std::collections::VecDeque;

fn find(parent: &mut [usize], mut v: usize) -> usize {
    while parent[v] != v {
        parent[v] = parent[parent[v]];
        v = parent[v];
    }
    v
}

/// Representative of each person's spouse group (the lowest index in it)
fn spouse_groups(index: &FamilyIndex) -> Vec<usize> {
    let n = index.len();
    let mut parent: Vec<usize> = (0..n).collect();
    for v in 0..n {
        for &spouse in &index.spouses[v] {
            let (a, b) = (find(&mut parent, v), find(&mut parent, spouse));
            if a != b {
                parent[a.max(b)] = a.min(b);
            }
        }
    }
    (0..n).map(|v| find(&mut parent, v)).collect()
}

/// Parent-to-child edges between rows, keyed by representative, and whether a row
/// holds a parent-child link inside itself
fn row_edges(index: &FamilyIndex, row: &[usize]) -> (Vec<Vec<usize>>, Vec<bool>) {
    let n = index.len();
    let mut succ = vec![Vec::new(); n];
    let mut internal = vec![false; n];
    for child in 0..n {
        for &parent in &index.parents[child] {
            let (from, to) = (row[parent], row[child]);
            if from == to {
                internal[from] = true;
            } else {
                succ[from].push(to);
            }
        }
    }
    (succ, internal)
}

/// Whether each node sits on a cycle of `succ` (Kosaraju, iterative)
fn on_cycle(succ: &[Vec<usize>]) -> Vec<bool> {
    let n = succ.len();

    let mut visited = vec![false; n];
    let mut finished = Vec::with_capacity(n);
    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut stack = vec![(start, 0usize)];
        while let Some(top) = stack.last_mut() {
            let (v, i) = *top;
            if i < succ[v].len() {
                top.1 += 1;
                let w = succ[v][i];
                if !visited[w] {
                    visited[w] = true;
                    stack.push((w, 0));
                }
            } else {
                finished.push(v);
                stack.pop();
            }
        }
    }

    let mut pred = vec![Vec::new(); n];
    for (v, edges) in succ.iter().enumerate() {
        for &w in edges {
            pred[w].push(v);
        }
    }

    let mut component = vec![usize::MAX; n];
    let mut sizes = Vec::new();
    for &start in finished.iter().rev() {
        if component[start] != usize::MAX {
            continue;
        }
        let id = sizes.len();
        let mut size = 0usize;
        component[start] = id;
        let mut stack = vec![start];
        while let Some(v) = stack.pop() {
            size += 1;
            for &w in &pred[v] {
                if component[w] == usize::MAX {
                    component[w] = id;
                    stack.push(w);
                }
            }
        }
        sizes.push(size);
    }

    component.iter().map(|&c| sizes[c] > 1).collect()
}

/// Longest path from the roots over `succ`, for every representative in `rows`
fn longest_path(succ: &[Vec<usize>], rows: &[usize]) -> Vec<u32> {
    let n = succ.len();
    let mut active = vec![false; n];
    for &r in rows {
        active[r] = true;
    }

    let mut pending = vec![0usize; n];
    for edges in succ {
        for &w in edges {
            pending[w] += 1;
        }
    }

    let mut level = vec![0u32; n];
    let mut done = vec![false; n];
    let mut queue: VecDeque<usize> = (0..n).filter(|&v| active[v] && pending[v] == 0).collect();
    while let Some(v) = queue.pop_front() {
        done[v] = true;
        for &w in &succ[v] {
            level[w] = level[w].max(level[v] + 1);
            pending[w] -= 1;
            if pending[w] == 0 {
                queue.push_back(w);
            }
        }
    }

    let stuck = (0..n).filter(|&v| active[v] && !done[v]).count();
    if stuck > 0 {
        tracing::warn!(
            "Parent-child cycle among {} people; their generations are approximate",
            stuck
        );
        // One sweep in input order so the stuck part still leans downwards
        for v in 0..n {
            if active[v] && !done[v] {
                for &w in &succ[v] {
                    if !done[w] {
                        level[w] = level[w].max(level[v] + 1);
                    }
                }
            }
        }
    }

    level
}

/// Generation per person, indexed like `index.ids`
pub(crate) fn assign_generations(index: &FamilyIndex) -> Vec<u32> {
    let n = index.len();
    let groups = spouse_groups(index);
    let (succ, internal) = row_edges(index, &groups);
    let cyclic = on_cycle(&succ);

    let mut split = 0usize;
    let rows: Vec<usize> = (0..n)
        .map(|v| {
            let g = groups[v];
            if internal[g] || cyclic[g] {
                if !index.spouses[v].is_empty() {
                    split += 1;
                }
                v
            } else {
                g
            }
        })
        .collect();

    let succ = if split > 0 {
        tracing::warn!(
            "Spouse rows conflict with parent links for {} people; they are ranked by parents only",
            split
        );
        row_edges(index, &rows).0
    } else {
        succ
    };

    let level = longest_path(&succ, &rows);
    rows.iter().map(|&r| level[r]).collect()
}
