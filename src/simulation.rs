//! Node simulation.
//!
//! A [`Simulator`] decides what values the leaves of a network take (constants
//! and primary inputs); gates are then evaluated in topological order using
//! [`LogicNetwork::compute`].
//!
//! Two simulators are provided:
//! - [`TruthTableSimulator`] assigns every input its projection function, so
//!   each node ends up holding its full truth table over the inputs.
//! - [`BoolSimulator`] evaluates the network for one concrete assignment.

use log::debug;

use crate::gate::Logic;
use crate::network::LogicNetwork;
use crate::node_map::NodeMap;
use crate::signal::{Node, Signal};
use crate::truth_table::TruthTable;

pub trait Simulator {
    type Value: Logic;

    fn compute_constant(&self, value: bool) -> Self::Value;
    fn compute_pi(&self, index: usize) -> Self::Value;
    fn compute_not(&self, value: &Self::Value) -> Self::Value;
}

/// Simulates all assignments of `num_vars` variables at once.
#[derive(Debug, Copy, Clone)]
pub struct TruthTableSimulator {
    num_vars: u32,
}

impl TruthTableSimulator {
    pub fn new(num_vars: u32) -> Self {
        Self { num_vars }
    }

    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }
}

impl Simulator for TruthTableSimulator {
    type Value = TruthTable;

    fn compute_constant(&self, value: bool) -> TruthTable {
        TruthTable::constant(self.num_vars, value)
    }

    fn compute_pi(&self, index: usize) -> TruthTable {
        TruthTable::nth_var(self.num_vars, index as u32)
    }

    fn compute_not(&self, value: &TruthTable) -> TruthTable {
        !value
    }
}

/// Simulates a single input assignment.
#[derive(Debug, Clone)]
pub struct BoolSimulator {
    assignment: Vec<bool>,
}

impl BoolSimulator {
    pub fn new(assignment: Vec<bool>) -> Self {
        Self { assignment }
    }

    /// Assignment where input `k` takes bit `k` of `index`.
    pub fn from_index(num_inputs: usize, index: u64) -> Self {
        Self::new((0..num_inputs).map(|k| (index >> k) & 1 == 1).collect())
    }
}

impl Simulator for BoolSimulator {
    type Value = bool;

    fn compute_constant(&self, value: bool) -> bool {
        value
    }

    fn compute_pi(&self, index: usize) -> bool {
        self.assignment[index]
    }

    fn compute_not(&self, value: &bool) -> bool {
        !value
    }
}

/// Value of `signal` given the value of its node.
fn signal_value<S: Simulator>(simulator: &S, value: &S::Value, signal: Signal) -> S::Value {
    if signal.is_complemented() {
        simulator.compute_not(value)
    } else {
        value.clone()
    }
}

/// Nodes in the transitive fan-in of the primary outputs, as a mask indexed by node.
fn output_cone<N: LogicNetwork>(network: &N) -> Vec<bool> {
    let mut mask = vec![false; network.size()];
    let mut stack = Vec::new();
    network.foreach_po(|s, _| stack.push(network.get_node(s)));
    while let Some(node) = stack.pop() {
        let i = usize::from(node);
        if mask[i] {
            continue;
        }
        mask[i] = true;
        network.foreach_fanin(node, |s| stack.push(network.get_node(s)));
    }
    mask
}

/// Fills `values` for the constant node, every primary input and every gate
/// in the fan-in cone of the primary outputs.
///
/// Entries already present in `values` are kept as they are: pre-seeded
/// inputs override what the simulator would assign.
pub fn simulate_nodes<N, S>(network: &N, values: &mut NodeMap<S::Value>, simulator: &S)
where
    N: LogicNetwork,
    S: Simulator,
{
    let constant = Node::CONSTANT;
    if !values.contains(constant) {
        values.insert(constant, simulator.compute_constant(false));
    }
    network.foreach_pi(|node, k| {
        if !values.contains(node) {
            values.insert(node, simulator.compute_pi(k));
        }
    });

    let cone = output_cone(network);
    let mut computed = 0usize;
    let mut fanin_values = Vec::new();
    network.foreach_gate(|node| {
        if !cone[usize::from(node)] || values.contains(node) {
            return;
        }
        fanin_values.clear();
        network.foreach_fanin(node, |s| {
            let value = &values[network.get_node(s)];
            fanin_values.push(signal_value(simulator, value, s));
        });
        let value = network.compute(node, &fanin_values);
        values.insert(node, value);
        computed += 1;
    });
    debug!("simulate_nodes: computed {} gates", computed);
}

/// Simulates the network and returns the value of every primary output.
pub fn simulate<N, S>(network: &N, simulator: &S) -> Vec<S::Value>
where
    N: LogicNetwork,
    S: Simulator,
{
    let mut values = NodeMap::with_capacity(network.size());
    simulate_nodes(network, &mut values, simulator);
    let mut outputs = Vec::with_capacity(network.num_pos());
    network.foreach_po(|s, _| {
        outputs.push(signal_value(simulator, &values[network.get_node(s)], s));
    });
    outputs
}
