//! Candidate filtering, scoring, and ranking.

use ev_catalog::AreaCatalog;
use ev_core::{AreaId, AreaRecord, EvacuationMode, EvacuationPriority, FloodRisk, NodeId};
use ev_spatial::{DijkstraRouter, RegionMap, RoadNetwork, Router};

use crate::config::RouteConfig;
use crate::scorer::{capacity_score, safety_improvement};

// ── RouteCandidate ────────────────────────────────────────────────────────────

/// One ranked destination.  Built per query and handed to the caller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteCandidate {
    pub destination:        AreaId,
    /// Title-cased destination name.
    pub name:               String,
    pub ward:               String,
    pub distance_km:        f64,
    pub eta_minutes:        f64,
    pub risk_level:         FloodRisk,
    /// Severity drop from start to destination.
    pub safety_improvement: i8,
    /// Lower is better.
    pub score:              f64,
    pub capacity_score:     f64,
    pub transport:          EvacuationMode,
    /// Shelter at the destination, when the catalog lists one.
    pub shelter_type:       Option<String>,
    pub shelter_capacity:   Option<u32>,
    /// Road nodes from start to destination; `None` for straight-line
    /// ranking.
    pub path:               Option<Vec<NodeId>>,
}

// ── RoadContext ───────────────────────────────────────────────────────────────

/// A routable network with its region tags and the router used on it.
pub struct RoadContext {
    pub network: RoadNetwork,
    pub regions: RegionMap,
    pub router:  Box<dyn Router>,
}

impl RoadContext {
    /// Reduce `network` to its largest strongly connected component, tag it
    /// against `catalog`, and route with Dijkstra.
    pub fn new(catalog: &AreaCatalog, network: RoadNetwork, radius_km: Option<f64>) -> Self {
        let network = network.largest_strongly_connected();
        let regions = RegionMap::assign(catalog, &network, radius_km);
        Self { network, regions, router: Box::new(DijkstraRouter) }
    }

    /// Swap in a different routing engine.
    pub fn with_router(mut self, router: impl Router + 'static) -> Self {
        self.router = Box::new(router);
        self
    }

    /// Shortest road path between the nodes nearest to `from` and `to`.
    ///
    /// A destination sharing the start's node is 0 km away.  `None` when
    /// the destination cannot be snapped or no path exists.
    fn road_distance(&self, from: NodeId, dest: &AreaRecord) -> Option<(f64, Vec<NodeId>)> {
        let to = self.network.nearest_node(dest.pos)?;
        match self.router.route(&self.network, from, to) {
            Ok(path) => Some((path.length_km(), path.nodes)),
            Err(e) => {
                log::debug!("skipping {:?}: {e}", dest.name);
                None
            }
        }
    }
}

impl std::fmt::Debug for RoadContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoadContext")
            .field("network", &self.network)
            .field("assigned_nodes", &self.regions.assigned_node_count())
            .finish_non_exhaustive()
    }
}

// ── Ranking ───────────────────────────────────────────────────────────────────

/// `true` if `rec` may receive evacuees under `config`.
pub fn is_eligible(rec: &AreaRecord, config: &RouteConfig) -> bool {
    rec.flood_risk <= config.safe_ceiling
        && (!config.require_receiving_priority
            || rec.evacuation_priority.is_none_or(EvacuationPriority::accepts_evacuees))
}

/// Rank safe destinations for an evacuation from `start`.
///
/// Distances are haversine unless `road` is given, in which case they are
/// shortest-path lengths and each candidate carries its node path.
/// Destinations the road network cannot reach are dropped.  The result is
/// sorted by ascending score (ties keep catalog order) and holds at most
/// `config.top_k` entries.
pub fn rank_routes(
    start: AreaId,
    catalog: &AreaCatalog,
    road: Option<&RoadContext>,
    config: &RouteConfig,
) -> Vec<RouteCandidate> {
    let Some(origin) = catalog.get(start) else {
        return Vec::new();
    };

    let start_node = match road {
        Some(ctx) => match ctx.network.nearest_node(origin.pos) {
            Some(n) => Some(n),
            None => {
                log::debug!("road network is empty; no routes from {:?}", origin.name);
                return Vec::new();
            }
        },
        None => None,
    };
    let immediate = origin.evacuation_priority == Some(EvacuationPriority::Immediate);

    let mut routes: Vec<RouteCandidate> = catalog
        .iter()
        .filter(|&(id, rec)| id != start && is_eligible(rec, config))
        .filter_map(|(id, dest)| {
            let (distance_km, path) = match (road, start_node) {
                (Some(ctx), Some(from)) => {
                    let (d, nodes) = ctx.road_distance(from, dest)?;
                    (d, Some(nodes))
                }
                _ => (origin.pos.distance_km(dest.pos), None),
            };

            Some(RouteCandidate {
                destination: id,
                name: dest.display_name(),
                ward: dest.ward.clone(),
                distance_km,
                eta_minutes: config.eta.eta_minutes(distance_km),
                risk_level: dest.flood_risk,
                safety_improvement: safety_improvement(origin, dest),
                score: config.weights.score(distance_km, origin, dest),
                capacity_score: capacity_score(dest.population_density),
                transport: EvacuationMode::recommend(distance_km, immediate),
                shelter_type: dest.shelter_type.clone(),
                shelter_capacity: dest.shelter_capacity,
                path,
            })
        })
        .collect();

    // Stable: equal scores keep catalog order.
    routes.sort_by(|a, b| a.score.total_cmp(&b.score));
    routes.truncate(config.top_k);
    routes
}
