//! Miter construction.
//!
//! The miter of two networks shares their primary inputs, XORs each pair of
//! corresponding outputs and ORs the differences into a single output. That
//! output is constant 0 iff the two networks compute the same function.

use log::debug;
use thiserror::Error;

use crate::gate::Gate;
use crate::network::{LogicNetwork, Network, NodeKind};
use crate::signal::Signal;

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum MiterError {
    #[error("networks have different numbers of inputs: {left} vs {right}")]
    DifferentInputs { left: usize, right: usize },

    #[error("networks have different numbers of outputs: {left} vs {right}")]
    DifferentOutputs { left: usize, right: usize },
}

fn translate(map: &[Signal], s: Signal) -> Signal {
    map[usize::from(s.node())] ^ s.is_complemented()
}

/// Copies the gates of `source` into `target`, with source input `k` mapped to `inputs[k]`.
///
/// Returns the translated outputs of `source`.
fn append_network(target: &mut Network, source: &Network, inputs: &[Signal]) -> Vec<Signal> {
    let mut map = vec![Signal::zero(); source.size()];
    source.foreach_pi(|node, k| map[usize::from(node)] = inputs[k]);

    source.foreach_gate(|node| {
        if let NodeKind::Gate(gate) = source.kind(node) {
            let gate = gate.remap(|s| translate(&map, s));
            map[usize::from(node)] = target.add_gate(gate);
        }
    });

    source.outputs().iter().map(|&s| translate(&map, s)).collect()
}

/// Builds the miter of `a` and `b`.
///
/// Fails when the networks do not have the same number of inputs and outputs.
pub fn miter(a: &Network, b: &Network) -> Result<Network, MiterError> {
    if a.num_pis() != b.num_pis() {
        return Err(MiterError::DifferentInputs {
            left: a.num_pis(),
            right: b.num_pis(),
        });
    }
    if a.num_pos() != b.num_pos() {
        return Err(MiterError::DifferentOutputs {
            left: a.num_pos(),
            right: b.num_pos(),
        });
    }

    let (mut network, inputs) = Network::with_inputs(a.num_pis());
    let outputs_a = append_network(&mut network, a, &inputs);
    let outputs_b = append_network(&mut network, b, &inputs);

    let diffs: Vec<Signal> = outputs_a
        .iter()
        .zip(outputs_b.iter())
        .map(|(&x, &y)| network.xor(x, y))
        .collect();
    let output = if diffs.is_empty() {
        Signal::zero()
    } else {
        network.add_gate(Gate::orn(&diffs))
    };
    network.add_output(output);

    debug!(
        "miter: {} inputs, {} output pairs, {} gates",
        network.num_pis(),
        diffs.len(),
        network.num_gates()
    );
    Ok(network)
}
