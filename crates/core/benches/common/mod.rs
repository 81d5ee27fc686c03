mod rng;

pub use rng::XorShift64;
