//! Kani harnesses for the swap engine
//!
//! Run with: cargo kani -p proofs-kani

#![no_std]

#[cfg(kani)]
mod amm;
