use thiserror::Error;

use ev_catalog::CatalogError;
use ev_spatial::SpatialError;

/// Errors raised while building an evacuation context.  Queries themselves
/// never fail; an unmatched place or an empty route list is a
/// [`Recommendation`](crate::Recommendation) variant.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid route configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

pub type RouteResult<T> = Result<T, RouteError>;
