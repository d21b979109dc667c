pub mod analysis;
pub mod posting;
