pub mod full_node;
pub mod responses;
