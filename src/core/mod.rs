// Core utilities with no engine or game dependencies

pub mod math;
