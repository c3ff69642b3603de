//! Unit tests for ev-spatial.
//!
//! All tests use hand-crafted networks so they run without any OSM file.

#[cfg(test)]
mod helpers {
    use ev_core::{GeoPoint, NodeId};
    use crate::{RoadNetwork, RoadNetworkBuilder};

    /// Build a small grid network for testing.
    ///
    /// Nodes (lat, lon):
    ///   0:(0,0)  1:(0,1)  2:(0,2)
    ///   3:(1,0)           4:(1,2)
    ///
    /// Undirected edges: 0-1, 1-2, 0-3, 2-4, 3-4
    ///
    /// Shortest path 0→4 by length:
    ///   0→1→2→4 = 300 m  vs  0→3→4 = 600 m
    pub fn grid_network() -> (RoadNetwork, [NodeId; 5]) {
        let mut b = RoadNetworkBuilder::new();

        let n0 = b.add_node(GeoPoint::new(0.0, 0.0), 100);
        let n1 = b.add_node(GeoPoint::new(0.0, 1.0), 101);
        let n2 = b.add_node(GeoPoint::new(0.0, 2.0), 102);
        let n3 = b.add_node(GeoPoint::new(1.0, 0.0), 103);
        let n4 = b.add_node(GeoPoint::new(1.0, 2.0), 104);

        b.add_road(n0, n1, 100.0);
        b.add_road(n1, n2, 100.0);
        b.add_road(n2, n4, 100.0);
        b.add_road(n0, n3, 500.0); // long detour
        b.add_road(n3, n4, 100.0);

        (b.build(), [n0, n1, n2, n3, n4])
    }
}

// ── Builder & network structure ────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use ev_core::GeoPoint;
    use crate::RoadNetworkBuilder;

    #[test]
    fn empty_build() {
        let net = RoadNetworkBuilder::new().build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
    }

    #[test]
    fn single_road() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(18.90, 72.81), 1);
        let c = b.add_node(GeoPoint::new(18.91, 72.81), 2);
        b.add_road(a, c, 1_100.0);
        let net = b.build();
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.edge_count(), 2); // bidirectional
        assert_eq!(net.node_source_id, vec![1, 2]);
    }

    #[test]
    fn csr_out_edges() {
        let (net, [n0, n1, n2, n3, n4]) = super::helpers::grid_network();
        for n in [n0, n1, n2, n3, n4] {
            assert_eq!(net.out_edges(n).count(), 2);
        }
        for e in net.out_edges(n0) {
            assert_eq!(net.edge_from[e.index()], n0);
        }
    }

    #[test]
    fn directed_only_edge() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0), 1);
        let c = b.add_node(GeoPoint::new(0.0, 1.0), 2);
        b.add_directed_edge(a, c, 100.0);
        let net = b.build();
        assert_eq!(net.edge_count(), 1);
        assert_eq!(net.out_edges(a).count(), 1);
        assert_eq!(net.out_edges(c).count(), 0);
    }

    #[test]
    fn derived_length_is_haversine() {
        let mut b = RoadNetworkBuilder::new();
        let colaba = GeoPoint::new(18.9151, 72.8141);
        let churchgate = GeoPoint::new(18.9346, 72.8284);
        let a = b.add_node(colaba, 1);
        let c = b.add_node(churchgate, 2);
        b.add_directed_edge_derived(a, c);
        let net = b.build();
        assert_eq!(net.edge_length_m[0], colaba.distance_m(churchgate));
    }
}

// ── Path length ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod path_length {
    use ev_core::NodeId;

    #[test]
    fn sums_edges() {
        let (net, [n0, n1, n2, _, n4]) = super::helpers::grid_network();
        assert_eq!(net.path_length(&[n0, n1, n2, n4]), Some(300.0));
    }

    #[test]
    fn trivial_paths_are_zero() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        assert_eq!(net.path_length(&[]), Some(0.0));
        assert_eq!(net.path_length(&[n0]), Some(0.0));
    }

    #[test]
    fn missing_edge_is_none() {
        let (net, [n0, _, n2, ..]) = super::helpers::grid_network();
        assert_eq!(net.path_length(&[n0, n2]), None);
        assert_eq!(net.path_length(&[n0, NodeId(99)]), None);
    }

    #[test]
    fn uses_shortest_parallel_edge() {
        use ev_core::GeoPoint;
        use crate::RoadNetworkBuilder;

        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0), 1);
        let c = b.add_node(GeoPoint::new(0.0, 1.0), 2);
        b.add_directed_edge(a, c, 90.0);
        b.add_directed_edge(a, c, 40.0);
        b.add_directed_edge(a, c, 70.0);
        let net = b.build();
        assert_eq!(net.edge_count(), 3);
        assert_eq!(net.path_length(&[a, c]), Some(40.0));
        let e = net.shortest_edge(a, c).unwrap();
        assert_eq!(net.edge_length_m[e.index()], 40.0);
    }
}

// ── Spatial snap ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use ev_core::GeoPoint;
    use crate::RoadNetworkBuilder;

    #[test]
    fn snap_exact_position() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        assert_eq!(net.nearest_node(GeoPoint::new(0.0, 0.0)), Some(n0));
    }

    #[test]
    fn snap_nearest() {
        let (net, [n0, n1, ..]) = super::helpers::grid_network();
        assert_eq!(net.nearest_node(GeoPoint::new(0.0, 0.4)), Some(n0));
        assert_eq!(net.nearest_node(GeoPoint::new(0.0, 0.6)), Some(n1));
    }

    #[test]
    fn empty_network_returns_none() {
        let net = RoadNetworkBuilder::new().build();
        assert!(net.nearest_node(GeoPoint::new(0.0, 0.0)).is_none());
    }
}

// ── Dijkstra routing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use ev_core::{GeoPoint, NodeId};
    use crate::{DijkstraRouter, RoadNetworkBuilder, Router, SpatialError};

    #[test]
    fn trivial_same_node() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let p = DijkstraRouter.route(&net, n0, n0).unwrap();
        assert!(p.is_trivial());
        assert_eq!(p.nodes, vec![n0]);
        assert_eq!(p.length_m, 0.0);
    }

    #[test]
    fn shortest_path_correct() {
        let (net, [n0, n1, n2, _, n4]) = super::helpers::grid_network();
        let p = DijkstraRouter.route(&net, n0, n4).unwrap();

        assert_eq!(p.length_m, 300.0);
        assert_eq!(p.length_km(), 0.3);
        assert_eq!(p.nodes, vec![n0, n1, n2, n4]);
        assert_eq!(p.edges.len(), 3);
        assert_eq!(net.edge_from[p.edges[0].index()], n0);
        assert_eq!(net.edge_to[p.edges[2].index()], n4);
        assert_eq!(net.path_length(&p.nodes), Some(p.length_m));
    }

    #[test]
    fn picks_short_parallel_edge() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0), 1);
        let c = b.add_node(GeoPoint::new(0.0, 1.0), 2);
        b.add_directed_edge(a, c, 500.0);
        b.add_directed_edge(a, c, 120.0);
        let net = b.build();
        let p = DijkstraRouter.route(&net, a, c).unwrap();
        assert_eq!(p.length_m, 120.0);
    }

    #[test]
    fn no_route_disconnected() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0), 1);
        let c = b.add_node(GeoPoint::new(1.0, 0.0), 2);
        let net = b.build();
        let result = DijkstraRouter.route(&net, a, c);
        assert!(matches!(result, Err(SpatialError::NoRoute { from, to }) if from == a && to == c));
    }

    #[test]
    fn directed_one_way_blocks_return() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0), 1);
        let c = b.add_node(GeoPoint::new(0.0, 1.0), 2);
        b.add_directed_edge(a, c, 100.0);
        let net = b.build();

        assert!(DijkstraRouter.route(&net, a, c).is_ok());
        assert!(matches!(DijkstraRouter.route(&net, c, a), Err(SpatialError::NoRoute { .. })));
    }

    #[test]
    fn unknown_node_rejected() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        assert!(matches!(
            DijkstraRouter.route(&net, n0, NodeId(42)),
            Err(SpatialError::NodeNotFound(NodeId(42)))
        ));
    }
}

// ── Strongly connected components ─────────────────────────────────────────────

#[cfg(test)]
mod scc {
    use ev_core::GeoPoint;
    use crate::scc::strongly_connected_components;
    use crate::{DijkstraRouter, RoadNetwork, RoadNetworkBuilder, Router};

    /// 0→1→2→0 cycle, 2→3 dead end, 4↔5 island.
    fn fragmented() -> RoadNetwork {
        let mut b = RoadNetworkBuilder::new();
        let n: Vec<_> = (0..6)
            .map(|i| b.add_node(GeoPoint::new(0.0, i as f64), 10 + i))
            .collect();
        b.add_directed_edge(n[0], n[1], 10.0);
        b.add_directed_edge(n[1], n[2], 10.0);
        b.add_directed_edge(n[2], n[0], 10.0);
        b.add_directed_edge(n[2], n[3], 10.0);
        b.add_road(n[4], n[5], 10.0);
        b.build()
    }

    #[test]
    fn labels_and_sizes() {
        let net = fragmented();
        let (label, sizes) = strongly_connected_components(&net);
        assert_eq!(sizes.len(), 3);
        assert_eq!(label[0], label[1]);
        assert_eq!(label[1], label[2]);
        assert_ne!(label[2], label[3]);
        assert_eq!(label[4], label[5]);
        let mut sorted = sizes.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3]);
    }

    #[test]
    fn largest_component_reindexed() {
        let reduced = fragmented().largest_strongly_connected();
        assert_eq!(reduced.node_count(), 3);
        assert_eq!(reduced.edge_count(), 3);
        assert_eq!(reduced.node_source_id, vec![10, 11, 12]);
        assert_eq!(reduced.node_pos[2], GeoPoint::new(0.0, 2.0));

        // Every pair is mutually reachable after reduction.
        for a in 0..3u32 {
            for b in 0..3u32 {
                let path = DijkstraRouter.route(&reduced, ev_core::NodeId(a), ev_core::NodeId(b));
                assert!(path.is_ok(), "{a} -> {b}");
            }
        }
    }

    #[test]
    fn tie_keeps_lowest_node() {
        let mut b = RoadNetworkBuilder::new();
        let n: Vec<_> = (0..4)
            .map(|i| b.add_node(GeoPoint::new(0.0, i as f64), i))
            .collect();
        b.add_road(n[2], n[3], 5.0);
        b.add_road(n[0], n[1], 5.0);
        let reduced = b.build().largest_strongly_connected();
        assert_eq!(reduced.node_source_id, vec![0, 1]);
    }

    #[test]
    fn empty_stays_empty() {
        assert!(RoadNetwork::empty().largest_strongly_connected().is_empty());
    }

    #[test]
    fn long_chain_does_not_recurse() {
        // A 50k-node two-way chain would overflow a recursive walk.
        let mut b = RoadNetworkBuilder::new();
        let mut prev = b.add_node(GeoPoint::new(0.0, 0.0), 0);
        for i in 1..50_000 {
            let next = b.add_node(GeoPoint::new(0.0, i as f64 * 1e-4), i);
            b.add_road(prev, next, 1.0);
            prev = next;
        }
        let net = b.build();
        let (_, sizes) = strongly_connected_components(&net);
        assert_eq!(sizes, vec![50_000]);
    }
}

// ── Region mapping ────────────────────────────────────────────────────────────

#[cfg(test)]
mod regions {
    use ev_catalog::AreaCatalog;
    use ev_core::{AreaId, AreaRecord, FloodRisk, GeoPoint, NodeId};
    use crate::{RegionMap, RoadNetwork, RoadNetworkBuilder};

    fn areas() -> AreaCatalog {
        AreaCatalog::new(vec![
            AreaRecord::new("alpha", "A", GeoPoint::new(19.00, 72.80), FloodRisk::High),
            AreaRecord::new("beta",  "B", GeoPoint::new(19.00, 72.90), FloodRisk::Low),
            AreaRecord::new("gamma", "C", GeoPoint::new(19.10, 72.90), FloodRisk::Low),
        ])
        .unwrap()
    }

    /// n0 near alpha, n1 near beta, n2 near gamma, n3 far out (nearest gamma).
    fn network() -> (RoadNetwork, [NodeId; 4]) {
        let mut b = RoadNetworkBuilder::new();
        let n0 = b.add_node(GeoPoint::new(19.000, 72.801), 0);
        let n1 = b.add_node(GeoPoint::new(19.000, 72.899), 1);
        let n2 = b.add_node(GeoPoint::new(19.099, 72.900), 2);
        let n3 = b.add_node(GeoPoint::new(19.400, 72.600), 3);
        b.add_road(n0, n1, 10_000.0);
        b.add_road(n1, n2, 11_000.0);
        b.add_road(n2, n3, 45_000.0);
        (b.build(), [n0, n1, n2, n3])
    }

    const ALPHA: AreaId = AreaId(0);
    const BETA:  AreaId = AreaId(1);
    const GAMMA: AreaId = AreaId(2);

    #[test]
    fn nearest_area_per_node() {
        let (net, [n0, n1, n2, n3]) = network();
        let map = RegionMap::assign(&areas(), &net, None);
        assert_eq!(map.node_region(n0), Some(ALPHA));
        assert_eq!(map.node_region(n1), Some(BETA));
        assert_eq!(map.node_region(n2), Some(GAMMA));
        assert_eq!(map.node_region(n3), Some(GAMMA));
        assert_eq!(map.assigned_node_count(), 4);
        assert_eq!(map.nodes_in(GAMMA), &[n2, n3]);
    }

    #[test]
    fn radius_leaves_far_nodes_unassigned() {
        let (net, [_, _, n2, n3]) = network();
        let map = RegionMap::assign(&areas(), &net, Some(2.0));
        assert_eq!(map.node_region(n3), None);
        assert_eq!(map.assigned_node_count(), 3);
        assert_eq!(map.nodes_in(GAMMA), &[n2]);
        assert_eq!(map.radius_km(), Some(2.0));
    }

    #[test]
    fn radius_looks_past_degree_nearest_area() {
        // North is nearer in degrees, but a longitude degree is shorter, so
        // east is nearer on the ground and the only area within the radius.
        let cat = AreaCatalog::new(vec![
            AreaRecord::new("north", "N", GeoPoint::new(19.010, 72.8500), FloodRisk::Low),
            AreaRecord::new("east",  "E", GeoPoint::new(19.000, 72.8602), FloodRisk::Low),
        ])
        .unwrap();
        let mut b = RoadNetworkBuilder::new();
        let n = b.add_node(GeoPoint::new(19.0, 72.85), 0);
        let net = b.build();

        assert_eq!(RegionMap::assign(&cat, &net, None).node_region(n), Some(AreaId(0)));
        assert_eq!(RegionMap::assign(&cat, &net, Some(1.09)).node_region(n), Some(AreaId(1)));
        assert_eq!(RegionMap::assign(&cat, &net, Some(1.0)).node_region(n), None);
    }

    #[test]
    fn edge_takes_riskier_endpoint() {
        let (net, [n0, n1, n2, n3]) = network();
        let map = RegionMap::assign(&areas(), &net, Some(2.0));
        let edge = |a, b| net.shortest_edge(a, b).unwrap();

        // alpha (high) beats beta (low) in both directions.
        assert_eq!(map.edge_region(edge(n0, n1)), Some(ALPHA));
        assert_eq!(map.edge_region(edge(n1, n0)), Some(ALPHA));
        // Equal risk: the source endpoint wins.
        assert_eq!(map.edge_region(edge(n1, n2)), Some(BETA));
        assert_eq!(map.edge_region(edge(n2, n1)), Some(GAMMA));
        // One endpoint unassigned: the assigned one is used.
        assert_eq!(map.edge_region(edge(n2, n3)), Some(GAMMA));
        assert_eq!(map.edge_region(edge(n3, n2)), Some(GAMMA));

        assert_eq!(map.assigned_edge_count(), 6);
        assert_eq!(map.edge_risk_counts(), [4, 0, 2, 0, 0]);
        assert_eq!(map.edges_at_risk(FloodRisk::High), 2);
    }

    #[test]
    fn edges_between_unassigned_nodes_stay_untagged() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(25.0, 75.0), 0);
        let c = b.add_node(GeoPoint::new(25.0, 75.1), 1);
        b.add_road(a, c, 100.0);
        let net = b.build();
        let map = RegionMap::assign(&areas(), &net, Some(2.0));
        assert_eq!(map.assigned_node_count(), 0);
        assert_eq!(map.assigned_edge_count(), 0);
        assert_eq!(map.edge_region(ev_core::EdgeId(0)), None);
    }

    #[test]
    fn out_of_range_ids() {
        let (net, _) = network();
        let map = RegionMap::assign(&areas(), &net, None);
        assert_eq!(map.node_region(NodeId(99)), None);
        assert!(map.nodes_in(AreaId(99)).is_empty());
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Write;

    use ev_core::NodeId;
    use crate::{SpatialError, load_graph_csv, load_graph_readers};

    const NODES: &str = "id,y,x\n1,18.9151,72.8141\n2,18.9346,72.8284\n3.0,18.9200,72.8200\n";

    #[test]
    fn loads_nodes_and_edges() {
        let edges = "u,v,key,length\n1,2,0,2600\n2,1,0,\n2,3,0,150.5\n";
        let net = load_graph_readers(NODES.as_bytes(), edges.as_bytes()).unwrap();
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.edge_count(), 3);
        assert_eq!(net.node_source_id, vec![1, 2, 3]);

        assert_eq!(net.path_length(&[NodeId(0), NodeId(1)]), Some(2600.0));
        assert_eq!(net.path_length(&[NodeId(1), NodeId(2)]), Some(150.5));
        // Empty length cell: derived from coordinates (~2.5 km).
        let derived = net.path_length(&[NodeId(1), NodeId(0)]).unwrap();
        assert!((2_300.0..2_900.0).contains(&derived), "{derived}");
    }

    #[test]
    fn no_length_column() {
        let edges = "source,target\n1,3\n";
        let net = load_graph_readers(NODES.as_bytes(), edges.as_bytes()).unwrap();
        assert_eq!(net.edge_count(), 1);
        assert!(net.edge_length_m[0] > 0.0);
    }

    #[test]
    fn unknown_node_reported() {
        let edges = "u,v\n1,2\n1,9\n";
        assert!(matches!(
            load_graph_readers(NODES.as_bytes(), edges.as_bytes()),
            Err(SpatialError::UnknownNode { row: 2, id: 9 })
        ));
    }

    #[test]
    fn missing_node_columns() {
        match load_graph_readers("id,lat\n1,18.9\n".as_bytes(), "u,v\n".as_bytes()) {
            Err(SpatialError::MissingColumns { file, missing }) => {
                assert_eq!(file, "nodes.csv");
                assert_eq!(missing, vec!["lon"]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn negative_length_rejected() {
        let edges = "u,v,length\n1,2,-5\n";
        assert!(matches!(
            load_graph_readers(NODES.as_bytes(), edges.as_bytes()),
            Err(SpatialError::Row { file: "edges.csv", row: 1, .. })
        ));
    }

    #[test]
    fn duplicate_node_id_rejected() {
        let nodes = "id,lat,lon\n1,18.9,72.8\n1,18.91,72.81\n";
        assert!(matches!(
            load_graph_readers(nodes.as_bytes(), "u,v\n".as_bytes()),
            Err(SpatialError::Row { file: "nodes.csv", row: 2, .. })
        ));
    }

    #[test]
    fn from_files() {
        let mut nodes = tempfile::NamedTempFile::new().unwrap();
        let mut edges = tempfile::NamedTempFile::new().unwrap();
        nodes.write_all(NODES.as_bytes()).unwrap();
        edges.write_all(b"u,v,length\n1,2,10\n2,1,10\n").unwrap();
        let net = load_graph_csv(nodes.path(), edges.path()).unwrap();
        assert_eq!(net.edge_count(), 2);
        assert_eq!(net.largest_strongly_connected().node_count(), 2);
    }
}
