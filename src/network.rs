//! Combinational logic networks.
//!
//! [`LogicNetwork`] is the capability set the simulation engine and the
//! equivalence checker rely on. [`Network`] is the concrete implementation
//! shipped with the crate: a DAG of constant, input and gate nodes with
//! complementable edges.
//!
//! Gates can only reference nodes that already exist, so node index order is
//! a topological order.

use crate::gate::{Gate, Logic};
use crate::signal::{Node, Signal};

/// What the equivalence checker needs from a logic network.
///
/// All `foreach_*` methods iterate in declaration order, and the order is
/// stable across calls.
pub trait LogicNetwork {
    /// Total number of nodes, including the constant node and the inputs.
    fn size(&self) -> usize;
    fn num_pis(&self) -> usize;
    fn num_pos(&self) -> usize;
    fn num_gates(&self) -> usize;

    fn get_node(&self, signal: Signal) -> Node {
        signal.node()
    }
    fn is_complemented(&self, signal: Signal) -> bool {
        signal.is_complemented()
    }

    fn is_constant(&self, node: Node) -> bool;
    fn is_pi(&self, node: Node) -> bool;
    fn is_gate(&self, node: Node) -> bool {
        !self.is_constant(node) && !self.is_pi(node)
    }

    /// Calls `f(node, ordinal)` for every primary input.
    fn foreach_pi(&self, f: impl FnMut(Node, usize));
    /// Calls `f(signal, ordinal)` for every primary output.
    fn foreach_po(&self, f: impl FnMut(Signal, usize));
    /// Calls `f(node)` for every gate, in topological order.
    fn foreach_gate(&self, f: impl FnMut(Node));
    fn foreach_fanin(&self, node: Node, f: impl FnMut(Signal));

    /// Evaluates the gate at `node` given the values of its fanin signals.
    fn compute<V: Logic>(&self, node: Node, fanin_values: &[V]) -> V;
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum NodeKind {
    Constant,
    Input(u32),
    Gate(Gate),
}

#[derive(Debug, Clone)]
pub struct Network {
    nodes: Vec<NodeKind>,
    inputs: Vec<Node>,
    outputs: Vec<Signal>,
    num_gates: usize,
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl Network {
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeKind::Constant],
            inputs: Vec::new(),
            outputs: Vec::new(),
            num_gates: 0,
        }
    }

    /// Creates a network with `num_inputs` fresh inputs and nothing else.
    pub fn with_inputs(num_inputs: usize) -> (Self, Vec<Signal>) {
        let mut network = Self::new();
        let inputs = (0..num_inputs).map(|_| network.add_input()).collect();
        (network, inputs)
    }

    pub fn kind(&self, node: Node) -> &NodeKind {
        &self.nodes[usize::from(node)]
    }

    pub fn gate(&self, node: Node) -> Option<&Gate> {
        match self.kind(node) {
            NodeKind::Gate(gate) => Some(gate),
            _ => None,
        }
    }

    pub fn input(&self, index: usize) -> Signal {
        Signal::from_node(self.inputs[index])
    }

    pub fn inputs(&self) -> &[Node] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Signal] {
        &self.outputs
    }

    pub fn add_input(&mut self) -> Signal {
        let node = self.push(NodeKind::Input(self.inputs.len() as u32));
        self.inputs.push(node);
        Signal::from_node(node)
    }

    pub fn add_output(&mut self, output: Signal) {
        self.check_signal(output);
        self.outputs.push(output);
    }

    pub fn add_gate(&mut self, gate: Gate) -> Signal {
        for &s in gate.inputs() {
            self.check_signal(s);
        }
        self.num_gates += 1;
        Signal::from_node(self.push(NodeKind::Gate(gate)))
    }

    pub fn and(&mut self, a: Signal, b: Signal) -> Signal {
        self.add_gate(Gate::and(a, b))
    }

    pub fn or(&mut self, a: Signal, b: Signal) -> Signal {
        !self.and(!a, !b)
    }

    pub fn xor(&mut self, a: Signal, b: Signal) -> Signal {
        self.add_gate(Gate::xor(a, b))
    }

    pub fn maj(&mut self, a: Signal, b: Signal, c: Signal) -> Signal {
        self.add_gate(Gate::maj(a, b, c))
    }

    pub fn ite(&mut self, cond: Signal, then: Signal, els: Signal) -> Signal {
        self.add_gate(Gate::ite(cond, then, els))
    }

    fn push(&mut self, kind: NodeKind) -> Node {
        let node = Node::new(self.nodes.len() as u32);
        self.nodes.push(kind);
        node
    }

    fn check_signal(&self, signal: Signal) {
        assert!(
            (signal.node().index() as usize) < self.nodes.len(),
            "Signal {} refers to a node that does not exist yet",
            signal
        );
    }
}

impl LogicNetwork for Network {
    fn size(&self) -> usize {
        self.nodes.len()
    }

    fn num_pis(&self) -> usize {
        self.inputs.len()
    }

    fn num_pos(&self) -> usize {
        self.outputs.len()
    }

    fn num_gates(&self) -> usize {
        self.num_gates
    }

    fn is_constant(&self, node: Node) -> bool {
        matches!(self.kind(node), NodeKind::Constant)
    }

    fn is_pi(&self, node: Node) -> bool {
        matches!(self.kind(node), NodeKind::Input(_))
    }

    fn foreach_pi(&self, mut f: impl FnMut(Node, usize)) {
        for (k, &node) in self.inputs.iter().enumerate() {
            f(node, k);
        }
    }

    fn foreach_po(&self, mut f: impl FnMut(Signal, usize)) {
        for (k, &signal) in self.outputs.iter().enumerate() {
            f(signal, k);
        }
    }

    fn foreach_gate(&self, mut f: impl FnMut(Node)) {
        for (i, kind) in self.nodes.iter().enumerate() {
            if let NodeKind::Gate(_) = kind {
                f(Node::new(i as u32));
            }
        }
    }

    fn foreach_fanin(&self, node: Node, mut f: impl FnMut(Signal)) {
        if let Some(gate) = self.gate(node) {
            for &s in gate.inputs() {
                f(s);
            }
        }
    }

    fn compute<V: Logic>(&self, node: Node, fanin_values: &[V]) -> V {
        match self.kind(node) {
            NodeKind::Gate(gate) => gate.evaluate(fanin_values),
            other => panic!("Cannot compute non-gate node {} ({:?})", node, other),
        }
    }
}
