pub mod normalize;

pub use normalize::{Normalized, NormalizeWarning, Normalizer, E164_PATTERN};
