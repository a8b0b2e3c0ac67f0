use std::fmt::{Display, Formatter};
use std::ops::{BitAnd, BitOr, BitXor, Not};

use crate::signal::Signal;

/// Values a gate can be evaluated over.
///
/// Implemented for `bool` (one input assignment) and for
/// [`TruthTable`][crate::truth_table::TruthTable] (all assignments of the simulated variables).
pub trait Logic:
    Clone + BitAnd<Output = Self> + BitOr<Output = Self> + BitXor<Output = Self> + Not<Output = Self>
{
}

impl<T> Logic for T where
    T: Clone + BitAnd<Output = T> + BitOr<Output = T> + BitXor<Output = T> + Not<Output = T>
{
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BinaryType {
    And,
    Xor,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TernaryType {
    And,
    Xor,
    Maj,
    Ite,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NaryType {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Gate {
    Binary(BinaryType, [Signal; 2]),
    Ternary(TernaryType, [Signal; 3]),
    Nary(NaryType, Box<[Signal]>),
}

// Constructors
impl Gate {
    pub fn and(a: Signal, b: Signal) -> Gate {
        Gate::Binary(BinaryType::And, [a, b])
    }

    pub fn xor(a: Signal, b: Signal) -> Gate {
        Gate::Binary(BinaryType::Xor, [a, b])
    }

    pub fn and3(a: Signal, b: Signal, c: Signal) -> Gate {
        Gate::Ternary(TernaryType::And, [a, b, c])
    }

    pub fn xor3(a: Signal, b: Signal, c: Signal) -> Gate {
        Gate::Ternary(TernaryType::Xor, [a, b, c])
    }

    pub fn maj(a: Signal, b: Signal, c: Signal) -> Gate {
        Gate::Ternary(TernaryType::Maj, [a, b, c])
    }

    /// `if a then b else c`.
    pub fn ite(a: Signal, b: Signal, c: Signal) -> Gate {
        Gate::Ternary(TernaryType::Ite, [a, b, c])
    }

    pub fn nary(kind: NaryType, signals: &[Signal]) -> Gate {
        assert!(!signals.is_empty(), "N-ary gate needs at least one input");
        Gate::Nary(kind, signals.into())
    }

    pub fn andn(signals: &[Signal]) -> Gate {
        Gate::nary(NaryType::And, signals)
    }

    pub fn orn(signals: &[Signal]) -> Gate {
        Gate::nary(NaryType::Or, signals)
    }

    pub fn xorn(signals: &[Signal]) -> Gate {
        Gate::nary(NaryType::Xor, signals)
    }

    pub fn nandn(signals: &[Signal]) -> Gate {
        Gate::nary(NaryType::Nand, signals)
    }

    pub fn norn(signals: &[Signal]) -> Gate {
        Gate::nary(NaryType::Nor, signals)
    }

    pub fn xnorn(signals: &[Signal]) -> Gate {
        Gate::nary(NaryType::Xnor, signals)
    }
}

// Getters
impl Gate {
    pub fn inputs(&self) -> &[Signal] {
        match self {
            Gate::Binary(_, inputs) => inputs,
            Gate::Ternary(_, inputs) => inputs,
            Gate::Nary(_, inputs) => inputs,
        }
    }

    /// Same gate with every input passed through `f`.
    pub fn remap(&self, mut f: impl FnMut(Signal) -> Signal) -> Gate {
        match self {
            Gate::Binary(kind, [a, b]) => Gate::Binary(*kind, [f(*a), f(*b)]),
            Gate::Ternary(kind, [a, b, c]) => Gate::Ternary(*kind, [f(*a), f(*b), f(*c)]),
            Gate::Nary(kind, inputs) => Gate::Nary(*kind, inputs.iter().map(|&s| f(s)).collect()),
        }
    }
}

// Evaluation
impl Gate {
    /// Evaluates the gate given the values of its inputs, in order.
    ///
    /// Input complementation is the caller's business: `values[i]` is already
    /// the value of the (possibly complemented) `i`-th input signal.
    pub fn evaluate<V: Logic>(&self, values: &[V]) -> V {
        assert_eq!(values.len(), self.inputs().len(), "Wrong number of gate input values");
        match self {
            Gate::Binary(kind, _) => {
                let (a, b) = (values[0].clone(), values[1].clone());
                match kind {
                    BinaryType::And => a & b,
                    BinaryType::Xor => a ^ b,
                }
            }
            Gate::Ternary(kind, _) => {
                let (a, b, c) = (values[0].clone(), values[1].clone(), values[2].clone());
                match kind {
                    TernaryType::And => a & b & c,
                    TernaryType::Xor => a ^ b ^ c,
                    TernaryType::Maj => (a.clone() & b.clone()) | (a & c.clone()) | (b & c),
                    TernaryType::Ite => (a.clone() & b) | (!a & c),
                }
            }
            Gate::Nary(kind, _) => {
                let first = values[0].clone();
                let rest = values[1..].iter().cloned();
                match kind {
                    NaryType::And => rest.fold(first, |acc, v| acc & v),
                    NaryType::Or => rest.fold(first, |acc, v| acc | v),
                    NaryType::Xor => rest.fold(first, |acc, v| acc ^ v),
                    NaryType::Nand => !rest.fold(first, |acc, v| acc & v),
                    NaryType::Nor => !rest.fold(first, |acc, v| acc | v),
                    NaryType::Xnor => !rest.fold(first, |acc, v| acc ^ v),
                }
            }
        }
    }
}

impl Display for Gate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Gate::Binary(BinaryType::And, _) => "AND",
            Gate::Binary(BinaryType::Xor, _) => "XOR",
            Gate::Ternary(TernaryType::And, _) => "AND3",
            Gate::Ternary(TernaryType::Xor, _) => "XOR3",
            Gate::Ternary(TernaryType::Maj, _) => "MAJ",
            Gate::Ternary(TernaryType::Ite, _) => "ITE",
            Gate::Nary(NaryType::And, _) => "ANDN",
            Gate::Nary(NaryType::Or, _) => "ORN",
            Gate::Nary(NaryType::Xor, _) => "XORN",
            Gate::Nary(NaryType::Nand, _) => "NANDN",
            Gate::Nary(NaryType::Nor, _) => "NORN",
            Gate::Nary(NaryType::Xnor, _) => "XNORN",
        };
        write!(f, "{}", name)
    }
}
