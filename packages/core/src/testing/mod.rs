#![cfg(test)]
#![allow(dead_code)]

mod mock;

pub use mock::*;
