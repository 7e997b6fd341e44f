//! Text serializations of mapping trees.

pub mod jadx;
