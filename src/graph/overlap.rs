use crate::activity::Activity;
use crate::slot::SLOTS_PER_DAY;
use petgraph::algo::kosaraju_scc;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;

/// Undirected graph with one node per activity and an edge between every
/// pair whose slots intersect on the 24-hour dial.
///
/// Overlaps are allowed in a schedule; this only reports them.
pub struct OverlapGraph {
    pub graph: UnGraph<i64, ()>,
    pub id_to_index: HashMap<i64, NodeIndex>,
}

impl OverlapGraph {
    pub fn build(activities: &[Activity]) -> Self {
        let mut graph: UnGraph<i64, ()> = UnGraph::new_undirected();
        let mut id_to_index = HashMap::with_capacity(activities.len());
        let mut masks = Vec::with_capacity(activities.len());

        for activity in activities {
            let node_ix = graph.add_node(activity.id);
            id_to_index.insert(activity.id, node_ix);
            masks.push((node_ix, slot_mask(activity)));
        }

        for (i, &(a, mask_a)) in masks.iter().enumerate() {
            for &(b, mask_b) in &masks[i + 1..] {
                if mask_a & mask_b != 0 {
                    graph.add_edge(a, b, ());
                }
            }
        }

        Self { graph, id_to_index }
    }

    pub fn overlaps(&self, a: i64, b: i64) -> bool {
        match (self.id_to_index.get(&a), self.id_to_index.get(&b)) {
            (Some(&u), Some(&v)) => self.graph.contains_edge(u, v),
            _ => false,
        }
    }

    /// Groups of two or more activities connected by overlaps. Ids within a
    /// group are sorted; groups are ordered by their smallest id.
    pub fn clusters(&self) -> Vec<Vec<i64>> {
        let mut clusters: Vec<Vec<i64>> = kosaraju_scc(&self.graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .map(|component| {
                let mut ids: Vec<i64> = component.into_iter().map(|ix| self.graph[ix]).collect();
                ids.sort_unstable();
                ids
            })
            .collect();
        clusters.sort_by_key(|ids| ids[0]);
        clusters
    }
}

/// Bit `n` set when the activity covers slot `n` of the day, wrapping past
/// midnight.
fn slot_mask(activity: &Activity) -> u64 {
    let covered = activity.duration.min(SLOTS_PER_DAY);
    (0..covered).fold(0u64, |mask, offset| {
        let slot = (activity.start_time as u64 + offset as u64) % SLOTS_PER_DAY as u64;
        mask | (1u64 << slot)
    })
}
