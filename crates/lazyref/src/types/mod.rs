mod float64;

pub use float64::Float64;
