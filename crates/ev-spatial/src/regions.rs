//! Region-to-network mapping.
//!
//! Every road node is tagged with its nearest catalog area; every edge is
//! tagged with whichever endpoint's area carries the higher flood risk.  The
//! map is built once after the graph is loaded and is read-only afterwards.
//!
//! Node assignment is one R-tree nearest-neighbour query per node, so the
//! whole pass is O(n log m) for n nodes and m areas.  With the `parallel`
//! feature the per-node queries run on the Rayon pool.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use ev_catalog::AreaCatalog;
use ev_core::geo::EARTH_RADIUS_KM;
use ev_core::{AreaId, EdgeId, FloodRisk, GeoPoint, NodeId};

use crate::network::RoadNetwork;

// ── R-tree area entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct AreaEntry {
    point: [f64; 2], // [lat, lon]
    pos:   GeoPoint,
    id:    AreaId,
}

impl RTreeObject for AreaEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AreaEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

/// Upper bound, in raw degrees, on how far an area within `radius_km` of
/// `pos` can be.  Longitude degrees shrink with latitude, so the bound uses
/// the cosine at the most poleward latitude the radius can reach.
fn degree_reach(pos: GeoPoint, radius_km: f64) -> f64 {
    let km_per_degree = EARTH_RADIUS_KM.to_radians();
    let lat = (pos.lat.abs() + radius_km / km_per_degree).min(89.0);
    radius_km / (km_per_degree * lat.to_radians().cos())
}

// ── RegionMap ─────────────────────────────────────────────────────────────────

/// Nearest-area tags for the nodes and edges of one [`RoadNetwork`].
#[derive(Debug, Clone)]
pub struct RegionMap {
    node_region: Vec<Option<AreaId>>,
    edge_region: Vec<Option<AreaId>>,
    /// Node ids per area, indexed by `AreaId`.
    area_nodes: Vec<Vec<NodeId>>,
    /// Assigned edge counts per risk class, in `FloodRisk::ALL` order.
    edge_risk_counts: [usize; 5],
    radius_km: Option<f64>,
}

impl RegionMap {
    /// Tag every node of `network` with its nearest area in `catalog`.
    ///
    /// With `radius_km`, a node takes the degree-nearest area within the
    /// radius (haversine) and stays unassigned only if no area is that
    /// close.
    pub fn assign(catalog: &AreaCatalog, network: &RoadNetwork, radius_km: Option<f64>) -> Self {
        let entries: Vec<AreaEntry> = catalog
            .iter()
            .map(|(id, rec)| AreaEntry { point: rec.pos.to_array(), pos: rec.pos, id })
            .collect();
        let tree = RTree::bulk_load(entries);

        let nearest = |pos: &GeoPoint| -> Option<AreaId> {
            let point = pos.to_array();
            match radius_km {
                None => tree.nearest_neighbor(&point).map(|hit| hit.id),
                // The degree-nearest area may lie outside the radius while a
                // slightly farther one (in degrees) lies inside it.
                Some(r) => {
                    let reach = degree_reach(*pos, r);
                    tree.nearest_neighbor_iter(&point)
                        .take_while(|hit| hit.distance_2(&point) <= reach * reach)
                        .find(|hit| hit.pos.distance_km(*pos) <= r)
                        .map(|hit| hit.id)
                }
            }
        };

        #[cfg(not(feature = "parallel"))]
        let node_region: Vec<Option<AreaId>> = network.node_pos.iter().map(nearest).collect();

        #[cfg(feature = "parallel")]
        let node_region: Vec<Option<AreaId>> = {
            use rayon::prelude::*;
            network.node_pos.par_iter().map(nearest).collect()
        };

        let mut area_nodes = vec![Vec::new(); catalog.len()];
        for (i, region) in node_region.iter().enumerate() {
            if let Some(a) = region {
                area_nodes[a.index()].push(NodeId(i as u32));
            }
        }

        let mut edge_risk_counts = [0usize; 5];
        let edge_region: Vec<Option<AreaId>> = (0..network.edge_count())
            .map(|e| {
                let u = node_region[network.edge_from[e].index()];
                let v = node_region[network.edge_to[e].index()];
                let region = riskier(catalog, u, v);
                if let Some(a) = region {
                    edge_risk_counts[catalog[a].flood_risk as usize] += 1;
                }
                region
            })
            .collect();

        let map = Self { node_region, edge_region, area_nodes, edge_risk_counts, radius_km };
        log::info!(
            "Region mapping: {} of {} nodes and {} of {} edges assigned to {} areas",
            map.assigned_node_count(),
            network.node_count(),
            map.assigned_edge_count(),
            network.edge_count(),
            catalog.len()
        );
        map
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn node_region(&self, node: NodeId) -> Option<AreaId> {
        self.node_region.get(node.index()).copied().flatten()
    }

    pub fn edge_region(&self, edge: EdgeId) -> Option<AreaId> {
        self.edge_region.get(edge.index()).copied().flatten()
    }

    /// Nodes assigned to `area`, in ascending id order.
    pub fn nodes_in(&self, area: AreaId) -> &[NodeId] {
        self.area_nodes.get(area.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn radius_km(&self) -> Option<f64> {
        self.radius_km
    }

    // ── Summaries ─────────────────────────────────────────────────────────

    pub fn assigned_node_count(&self) -> usize {
        self.node_region.iter().filter(|r| r.is_some()).count()
    }

    pub fn assigned_edge_count(&self) -> usize {
        self.edge_region.iter().filter(|r| r.is_some()).count()
    }

    /// Assigned edges per risk class, in `FloodRisk::ALL` order.
    pub fn edge_risk_counts(&self) -> [usize; 5] {
        self.edge_risk_counts
    }

    /// Assigned edges whose region has exactly `level`.
    pub fn edges_at_risk(&self, level: FloodRisk) -> usize {
        self.edge_risk_counts[level as usize]
    }
}

/// The endpoint region with the higher flood risk; `u` wins ties.
fn riskier(catalog: &AreaCatalog, u: Option<AreaId>, v: Option<AreaId>) -> Option<AreaId> {
    match (u, v) {
        (Some(a), Some(b)) => {
            if catalog[a].flood_risk >= catalog[b].flood_risk { Some(a) } else { Some(b) }
        }
        (Some(a), None) | (None, Some(a)) => Some(a),
        (None, None) => None,
    }
}
