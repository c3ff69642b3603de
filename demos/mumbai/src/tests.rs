#[cfg(test)]
mod demo_network {
    use ev_catalog::AreaCatalog;
    use ev_route::{EvacuationContext, Recommendation, RouteConfig};

    use crate::network::build_network;

    #[test]
    fn every_junction_is_reachable() {
        let catalog = AreaCatalog::mumbai().unwrap();
        let net = build_network(&catalog).unwrap();
        assert_eq!(net.node_count(), 11);
        assert_eq!(net.edge_count(), 26);
        assert_eq!(net.largest_strongly_connected().node_count(), 11);
    }

    #[test]
    fn colaba_routes_follow_roads() {
        let catalog = AreaCatalog::mumbai().unwrap();
        let net = build_network(&catalog).unwrap();
        let ctx = EvacuationContext::new(catalog, RouteConfig::default())
            .unwrap()
            .with_road_network(net, None);

        let Recommendation::Routes { routes, .. } = ctx.recommend("colaba") else {
            panic!("expected routes from Colaba");
        };
        let road = ctx.road().unwrap();
        for r in &routes {
            let path = r.path.as_ref().unwrap();
            let metres = road.network.path_length(path).unwrap();
            assert!((r.distance_km - metres / 1_000.0).abs() < 1e-9);
        }

        // Madame Cama Road beats the Cuffe Parade loop.
        let churchgate = routes.iter().find(|r| r.name == "Churchgate").unwrap();
        assert!((churchgate.distance_km - 3.1).abs() < 1e-9);
        assert_eq!(churchgate.path.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn bundled_config_parses() {
        let text = include_str!("../route.toml");
        let config: RouteConfig = toml::from_str(text).unwrap();
        assert_eq!(config, RouteConfig::default());
    }
}
