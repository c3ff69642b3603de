//! Strongly connected components.
//!
//! Routing runs on the largest strongly connected component only, so every
//! remaining node can reach every other.  Components are found with an
//! iterative Tarjan walk over the CSR arrays (no recursion, so large city
//! graphs cannot overflow the stack).

use ev_core::NodeId;

use crate::network::{RoadNetwork, RoadNetworkBuilder};

const UNVISITED: u32 = u32::MAX;

/// Component label of every node plus the size of each component.
///
/// Labels are assigned in the order components are completed.
pub fn strongly_connected_components(network: &RoadNetwork) -> (Vec<u32>, Vec<usize>) {
    let n = network.node_count();
    let mut index    = vec![UNVISITED; n];
    let mut low      = vec![0u32; n];
    let mut on_stack = vec![false; n];
    let mut label    = vec![UNVISITED; n];
    let mut sizes: Vec<usize> = Vec::new();

    let mut stack: Vec<usize> = Vec::new();
    // (node, next outgoing edge position) frames of the simulated recursion.
    let mut calls: Vec<(usize, usize)> = Vec::new();
    let mut next_index = 0u32;

    for root in 0..n {
        if index[root] != UNVISITED {
            continue;
        }
        index[root] = next_index;
        low[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;
        calls.push((root, network.node_out_start[root] as usize));

        while let Some(frame) = calls.last_mut() {
            let v = frame.0;
            let end = network.node_out_start[v + 1] as usize;

            if frame.1 < end {
                let w = network.edge_to[frame.1].index();
                frame.1 += 1;
                if index[w] == UNVISITED {
                    index[w] = next_index;
                    low[w] = next_index;
                    next_index += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    calls.push((w, network.node_out_start[w] as usize));
                } else if on_stack[w] {
                    low[v] = low[v].min(index[w]);
                }
                continue;
            }

            calls.pop();
            if let Some(&(parent, _)) = calls.last() {
                low[parent] = low[parent].min(low[v]);
            }
            if low[v] == index[v] {
                let c = sizes.len() as u32;
                let mut size = 0;
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    label[w] = c;
                    size += 1;
                    if w == v {
                        break;
                    }
                }
                sizes.push(size);
            }
        }
    }

    (label, sizes)
}

impl RoadNetwork {
    /// A new network holding only the largest strongly connected component,
    /// re-indexed densely.  Nodes keep their relative order and source ids;
    /// edges with either endpoint outside the component are dropped.
    ///
    /// When two components tie for largest, the one containing the
    /// lowest-numbered node wins.
    pub fn largest_strongly_connected(&self) -> RoadNetwork {
        if self.is_empty() {
            return RoadNetwork::empty();
        }

        let (label, sizes) = strongly_connected_components(self);
        let best_size = sizes.iter().copied().max().unwrap_or(0);
        // First node (in id order) whose component has the maximal size.
        let keep = label
            .iter()
            .copied()
            .find(|&c| sizes[c as usize] == best_size)
            .unwrap_or(0);

        let mut remap = vec![NodeId::INVALID; self.node_count()];
        let mut builder = RoadNetworkBuilder::with_capacity(best_size, self.edge_count());
        for (i, &c) in label.iter().enumerate() {
            if c == keep {
                remap[i] = builder.add_node(self.node_pos[i], self.node_source_id[i]);
            }
        }
        for e in 0..self.edge_count() {
            let from = remap[self.edge_from[e].index()];
            let to   = remap[self.edge_to[e].index()];
            if from != NodeId::INVALID && to != NodeId::INVALID {
                builder.add_directed_edge(from, to, self.edge_length_m[e]);
            }
        }

        let reduced = builder.build();
        log::info!(
            "Largest strongly connected component: {} of {} nodes, {} of {} edges ({} components)",
            reduced.node_count(),
            self.node_count(),
            reduced.edge_count(),
            self.edge_count(),
            sizes.len()
        );
        reduced
    }
}
