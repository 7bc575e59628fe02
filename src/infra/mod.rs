//! Инфраструктурный слой вокруг покерного движка:
//! RNG-реализации для `engine::RandomSource`.

pub mod rng;

pub use rng::*;
