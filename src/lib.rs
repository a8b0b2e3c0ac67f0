//! # simcec: simulation-based combinational equivalence checking
//!
//! **`simcec`** decides whether two combinational logic networks compute the same
//! Boolean function by exhaustive bit-parallel simulation, for networks with up to
//! 40 primary inputs.
//!
//! ## How it works
//!
//! The two networks are joined into a **miter**: shared inputs, one XOR per pair of
//! outputs, all XORs ORed together. The networks are equivalent iff the miter output
//! is constant 0.
//!
//! Simulating the miter for all 2ⁿ assignments at once would need 2ⁿ bits per node.
//! Instead, a memory-driven heuristic picks `split_var ≤ n` inputs that are simulated
//! as truth-table variables, and the remaining `n - split_var` inputs are enumerated
//! over `2^(n - split_var)` **rounds**, each fixing them to a different combination of
//! constants. A round whose output pattern is nonzero is a proof of inequivalence,
//! and the check stops there.
//!
//! ## Basic Usage
//!
//! ```rust
//! use simcec::cec::{simulation_cec, CecOutcome};
//! use simcec::network::Network;
//!
//! // f = x0 XOR x1
//! let (mut a, x) = Network::with_inputs(2);
//! let f = a.xor(x[0], x[1]);
//! a.add_output(f);
//!
//! // g = (x0 OR x1) AND NOT (x0 AND x1)
//! let (mut b, y) = Network::with_inputs(2);
//! let or = b.or(y[0], y[1]);
//! let and = b.and(y[0], y[1]);
//! let g = b.and(or, !and);
//! b.add_output(g);
//!
//! assert_eq!(simulation_cec(&a, &b, None), CecOutcome::Equivalent);
//! ```
//!
//! ## Core Components
//!
//! - **[`cec`]**: The equivalence checker: splitting heuristic, round driver, entry points.
//! - **[`network`]**: The [`LogicNetwork`][crate::network::LogicNetwork] trait and the concrete [`Network`][crate::network::Network].
//! - **[`simulation`]**: Topological simulation over any [`Simulator`][crate::simulation::Simulator].
//! - **[`truth_table`]**: Word-packed truth tables.
//! - **[`miter`]**: Miter construction.
//! - **[`dot`]**: Graphviz export of networks.

pub mod cec;
pub mod dot;
pub mod gate;
pub mod miter;
pub mod network;
pub mod node_map;
pub mod signal;
pub mod simulation;
pub mod truth_table;
