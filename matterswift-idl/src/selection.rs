//! Cluster selection for generation.
//!
//! Generators usually do not want every cluster in an IDL file: server code
//! cares about clusters instantiated on an endpoint, client binding code
//! cares about clusters listed in endpoint bindings. Both selections keep
//! the declaration order of the cluster list.

use std::collections::HashSet;

use crate::types::{Cluster, Idl};

/// Returns the clusters instantiated server-side on any endpoint.
#[must_use]
pub fn server_side_clusters(idl: &Idl) -> Vec<&Cluster> {
    let names: HashSet<&str> = idl
        .endpoints
        .iter()
        .flat_map(|e| e.server_clusters.iter().map(String::as_str))
        .collect();

    idl.clusters
        .iter()
        .filter(|c| names.contains(c.name.as_str()))
        .collect()
}

/// Returns the clusters any endpoint binds to as a client.
#[must_use]
pub fn binding_clusters(idl: &Idl) -> Vec<&Cluster> {
    let names: HashSet<&str> = idl
        .endpoints
        .iter()
        .flat_map(|e| e.client_bindings.iter().map(String::as_str))
        .collect();

    idl.clusters
        .iter()
        .filter(|c| names.contains(c.name.as_str()))
        .collect()
}
