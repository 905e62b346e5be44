mod enumerator;
mod sampler;

pub use enumerator::{Enumeration, enumerate_accepted};
pub use sampler::{DEFAULT_ATTEMPT_LIMIT, Sampler};
