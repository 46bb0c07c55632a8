mod sort;

pub use sort::*;
