//! The per-process query context.
//!
//! An [`EvacuationContext`] is assembled once at startup from a catalog, a
//! config and (optionally) a road network.  It is never mutated afterwards,
//! so it is `Send + Sync` and can be shared behind an `Arc` by any number of
//! concurrent callers.

use std::path::Path;

use ev_catalog::{AreaCatalog, CatalogSource};
use ev_core::AreaId;
use ev_resolve::{PlaceResolver, Resolution};
use ev_spatial::{RoadNetwork, load_graph_csv};

use crate::config::RouteConfig;
use crate::ranker::{RoadContext, RouteCandidate, rank_routes};
use crate::RouteResult;

/// Outcome of one evacuation query.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Recommendation {
    /// No catalog entry reached the match threshold.  Routing was not
    /// attempted.
    Unresolved {
        query:       String,
        /// Best score seen, below the threshold.
        confidence:  u8,
        suggestions: Vec<(String, u8)>,
    },
    /// The start resolved but no destination qualified.
    NoRoute { start: Resolution },
    /// Ranked routes, best first.  Never empty.
    Routes { start: Resolution, routes: Vec<RouteCandidate> },
}

impl Recommendation {
    /// The resolved start, if any.
    pub fn start(&self) -> Option<&Resolution> {
        match self {
            Recommendation::Unresolved { .. } => None,
            Recommendation::NoRoute { start } | Recommendation::Routes { start, .. } => Some(start),
        }
    }

    /// Ranked routes; empty unless this is `Routes`.
    pub fn routes(&self) -> &[RouteCandidate] {
        match self {
            Recommendation::Routes { routes, .. } => routes,
            _ => &[],
        }
    }
}

/// Immutable state shared by every query.
#[derive(Debug)]
pub struct EvacuationContext {
    catalog:  AreaCatalog,
    resolver: PlaceResolver,
    config:   RouteConfig,
    road:     Option<RoadContext>,
}

impl EvacuationContext {
    /// Straight-line context over `catalog`.
    ///
    /// # Errors
    ///
    /// [`RouteError::Config`](crate::RouteError::Config) if `config` fails
    /// validation.
    pub fn new(catalog: AreaCatalog, config: RouteConfig) -> RouteResult<Self> {
        config.validate()?;
        Ok(Self {
            catalog,
            resolver: PlaceResolver::with_threshold(config.match_threshold),
            config,
            road: None,
        })
    }

    /// Load the catalog from `source` and build a straight-line context.
    pub fn load(source: &CatalogSource, config: RouteConfig) -> RouteResult<Self> {
        Self::new(source.load()?, config)
    }

    /// Load a `nodes.csv` / `edges.csv` road graph and route over it.
    pub fn with_graph_csv(self, nodes: &Path, edges: &Path, radius_km: Option<f64>) -> RouteResult<Self> {
        let network = load_graph_csv(nodes, edges)?;
        Ok(self.with_road_network(network, radius_km))
    }

    /// Route over `network` instead of straight lines.  The network is
    /// reduced to its largest strongly connected component and tagged with
    /// regions first.
    pub fn with_road_network(self, network: RoadNetwork, radius_km: Option<f64>) -> Self {
        let road = RoadContext::new(&self.catalog, network, radius_km);
        self.with_road(road)
    }

    /// Route over an already prepared [`RoadContext`].
    pub fn with_road(mut self, road: RoadContext) -> Self {
        self.road = Some(road);
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn catalog(&self) -> &AreaCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    pub fn resolver(&self) -> &PlaceResolver {
        &self.resolver
    }

    pub fn road(&self) -> Option<&RoadContext> {
        self.road.as_ref()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn resolve(&self, query: &str) -> Resolution {
        self.resolver.resolve(query, &self.catalog)
    }

    /// Ranked routes from a known start area.
    pub fn rank(&self, start: AreaId) -> Vec<RouteCandidate> {
        rank_routes(start, &self.catalog, self.road.as_ref(), &self.config)
    }

    /// Resolve `query` and, if it matches, rank routes from it.
    pub fn recommend(&self, query: &str) -> Recommendation {
        let start = self.resolve(query);
        let Some(id) = start.matched else {
            log::info!("no area matches {query:?} (best confidence {})", start.confidence);
            return Recommendation::Unresolved {
                query:       query.to_owned(),
                confidence:  start.confidence,
                suggestions: self.resolver.suggest(query, &self.catalog, self.config.suggestion_limit),
            };
        };

        let routes = self.rank(id);
        log::info!(
            "{query:?} resolved to {:?} ({}%): {} route(s)",
            self.catalog[id].name,
            start.confidence,
            routes.len()
        );
        if routes.is_empty() {
            Recommendation::NoRoute { start }
        } else {
            Recommendation::Routes { start, routes }
        }
    }
}
