pub mod dijkstra;
pub(crate) mod partial_edges;
pub mod route_length;
pub mod shortest_path_algorithm;
pub mod taxi_route;
