//! Network to DOT (Graphviz) conversion.
//!
//! The generated DOT output follows these conventions:
//! - **Constant and input nodes** are boxes on the source rank
//! - **Gates** are circles labelled with their kind
//! - **Outputs** are triangles on the sink rank
//! - **Edges** point from fanin to fanout; complemented edges are dotted
//!
//! # Examples
//!
//! ```
//! use simcec::network::Network;
//!
//! let (mut network, x) = Network::with_inputs(2);
//! let f = network.and(x[0], !x[1]);
//! network.add_output(f);
//!
//! let dot = network.to_dot().unwrap();
//! assert!(dot.starts_with("digraph {"));
//! // Render with: dot -Tpng network.dot -o network.png
//! ```

use crate::network::{LogicNetwork, Network, NodeKind};
use crate::signal::{Node, Signal};

/// Configuration options for DOT output generation.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for gate nodes (default: "circle")
    pub gate_shape: &'static str,
    /// Shape for constant and input nodes (default: "box")
    pub input_shape: &'static str,
    /// Shape for output nodes (default: "invtriangle")
    pub output_shape: &'static str,
    /// Style for regular edges (default: "solid")
    pub edge_style: &'static str,
    /// Style for complemented edges (default: "dotted")
    pub complemented_edge_style: &'static str,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            gate_shape: "circle",
            input_shape: "box",
            output_shape: "invtriangle",
            edge_style: "solid",
            complemented_edge_style: "dotted",
        }
    }
}

impl Network {
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        use std::fmt::Write as _;

        let edge = |dot: &mut String, from: Signal, to: &str| -> std::fmt::Result {
            let style = if from.is_complemented() {
                config.complemented_edge_style
            } else {
                config.edge_style
            };
            writeln!(dot, "{} -> {} [style={}];", from.node().index(), to, style)
        };

        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "node [shape={}];", config.gate_shape)?;

        writeln!(dot, "{{ rank=source")?;
        writeln!(dot, "0 [shape={}, label=\"0\"];", config.input_shape)?;
        for (k, node) in self.inputs().iter().enumerate() {
            writeln!(dot, "{} [shape={}, label=\"x{}\"];", node.index(), config.input_shape, k)?;
        }
        writeln!(dot, "}}")?;

        for i in 0..self.size() {
            let node = Node::new(i as u32);
            if let NodeKind::Gate(gate) = self.kind(node) {
                writeln!(dot, "{} [label=\"{}\"];", i, gate)?;
                for &s in gate.inputs() {
                    edge(&mut dot, s, &i.to_string())?;
                }
            }
        }

        writeln!(dot, "{{ rank=sink")?;
        for k in 0..self.num_pos() {
            writeln!(dot, "o{} [shape={}, label=\"y{}\"];", k, config.output_shape, k)?;
        }
        writeln!(dot, "}}")?;
        for (k, &s) in self.outputs().iter().enumerate() {
            edge(&mut dot, s, &format!("o{}", k))?;
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}
