//! Simulation-based combinational equivalence checking.
//!
//! Two networks are combined into a [miter][crate::miter::miter] whose single
//! output is 0 exactly where they agree. The miter is then simulated
//! exhaustively, but not all at once: only the first `split_var` inputs are
//! simulated as truth-table variables, so every node holds a `2^split_var`-bit
//! pattern. The remaining inputs are fixed to constants, and the check is
//! repeated for each of the `2^(n - split_var)` constant combinations
//! ("rounds"). Round `r` assigns bit `j` of `r` to the `j`-th non-simulated
//! input.
//!
//! Gate patterns are round-local: they are purged before every round except
//! the first, so at most one round's worth of gate patterns is ever alive.
//!
//! # Examples
//!
//! ```
//! use simcec::cec::{simulation_cec, CecOutcome, SimulationCecStats};
//! use simcec::network::Network;
//!
//! let (mut and, x) = Network::with_inputs(2);
//! let f = and.and(x[0], x[1]);
//! and.add_output(f);
//!
//! let (mut or, y) = Network::with_inputs(2);
//! let g = or.or(y[0], y[1]);
//! or.add_output(g);
//!
//! let mut stats = SimulationCecStats::default();
//! assert_eq!(simulation_cec(&and, &and.clone(), None), CecOutcome::Equivalent);
//! assert_eq!(simulation_cec(&and, &or, Some(&mut stats)), CecOutcome::NotEquivalent);
//! assert_eq!(stats.split_var, 2);
//! assert_eq!(stats.rounds, 1);
//! ```

use std::fmt::{Display, Formatter};

use log::{debug, info, warn};

use crate::miter::miter;
use crate::network::{LogicNetwork, Network};
use crate::node_map::NodeMap;
use crate::simulation::{simulate_nodes, TruthTableSimulator};
use crate::truth_table::TruthTable;

/// Pattern of every node over the currently simulated inputs.
pub type PatternStore = NodeMap<TruthTable>;

/// Result of an equivalence check.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CecOutcome {
    Equivalent,
    NotEquivalent,
    /// Too many inputs, too many rounds, or networks that cannot be mitered.
    Unsupported,
}

impl CecOutcome {
    /// `Some(true)` / `Some(false)` for a definitive answer, `None` otherwise.
    pub fn as_option(self) -> Option<bool> {
        match self {
            CecOutcome::Equivalent => Some(true),
            CecOutcome::NotEquivalent => Some(false),
            CecOutcome::Unsupported => None,
        }
    }

    pub fn is_equivalent(self) -> bool {
        self == CecOutcome::Equivalent
    }
}

impl Display for CecOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CecOutcome::Equivalent => write!(f, "equivalent"),
            CecOutcome::NotEquivalent => write!(f, "not equivalent"),
            CecOutcome::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Statistics reported by [`simulation_cec`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SimulationCecStats {
    /// Number of inputs simulated as variables in each round.
    pub split_var: u32,
    /// Number of rounds needed to cover all inputs.
    pub rounds: u64,
    /// Number of rounds actually simulated (fewer than `rounds` on a mismatch).
    pub rounds_simulated: u64,
}

/// Knobs of the equivalence checker.
///
/// The memory heuristic picks `split_var = floor(log2(2^memory_budget_log2 / size - word_overhead)) + margin`
/// for networks with more than six inputs.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CecConfig {
    /// Networks with more inputs are rejected as unsupported (default: 40).
    pub max_pis: usize,
    /// Log2 of the pattern budget, in bits (default: 29).
    pub memory_budget_log2: u32,
    /// Per-node overhead subtracted from the budget share (default: 32).
    pub word_overhead: u64,
    /// Added to the log2 of the budget share (default: 3).
    pub margin: u32,
    /// Use this many simulation variables instead of the heuristic.
    pub split_var: Option<u32>,
    /// Give up as unsupported when more rounds would be needed.
    pub max_rounds: Option<u64>,
}

impl Default for CecConfig {
    fn default() -> Self {
        Self {
            max_pis: 40,
            memory_budget_log2: 29,
            word_overhead: 32,
            margin: 3,
            split_var: None,
            max_rounds: None,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SplitParams {
    pub split_var: u32,
    pub rounds: u64,
}

/// Number of inputs that can be simulated at once for a network of `size` nodes.
pub fn compute_split_var(num_pis: u32, size: usize, config: &CecConfig) -> u32 {
    if num_pis <= 6 {
        return num_pis;
    }
    let share = (1u64 << config.memory_budget_log2) / size.max(1) as u64;
    let z = if share > config.word_overhead {
        (share - config.word_overhead).ilog2() + config.margin
    } else {
        config.margin
    };
    z.clamp(1, num_pis)
}

/// `2^(num_pis - split_var)`, saturating at `u64::MAX`.
pub fn compute_rounds(num_pis: u32, split_var: u32) -> u64 {
    assert!(split_var <= num_pis, "split_var {} exceeds {} inputs", split_var, num_pis);
    1u64.checked_shl(num_pis - split_var).unwrap_or(u64::MAX)
}

pub fn compute_split_params(num_pis: usize, size: usize, config: &CecConfig) -> SplitParams {
    let n = num_pis as u32;
    let split_var = match config.split_var {
        Some(_) if n == 0 => 0,
        Some(s) => s.clamp(1, n),
        None => compute_split_var(n, size, config),
    };
    SplitParams {
        split_var,
        rounds: compute_rounds(n, split_var),
    }
}

/// Seeds the patterns for round 0.
///
/// Input `k < split_var` gets the `k`-th projection; every other input is constant 0.
pub fn init_patterns<N: LogicNetwork>(network: &N, split_var: u32, patterns: &mut PatternStore) {
    network.foreach_pi(|node, k| {
        let tt = if (k as u32) < split_var {
            TruthTable::nth_var(split_var, k as u32)
        } else {
            TruthTable::zero(split_var)
        };
        patterns.insert(node, tt);
    });
    debug_assert!({
        let mut round_zero = true;
        network.foreach_pi(|node, k| {
            if k as u32 >= split_var {
                round_zero &= patterns[node].is_const0();
            }
        });
        round_zero
    });
}

/// Drops the pattern of every gate.
pub fn free_patterns<N: LogicNetwork>(network: &N, patterns: &mut PatternStore) {
    network.foreach_gate(|node| {
        patterns.remove(node);
    });
}

/// Assigns the bits of `round` to the non-simulated inputs, lowest bit first.
pub fn update_patterns<N: LogicNetwork>(network: &N, patterns: &mut PatternStore, split_var: u32, round: u64) {
    let mut counter = round;
    network.foreach_pi(|node, k| {
        if (k as u32) < split_var {
            return;
        }
        let bit = counter % 2 == 1;
        match patterns.get_mut(node) {
            Some(tt) => {
                if bit == tt.is_const0() {
                    tt.complement();
                }
            }
            None => {
                patterns.insert(node, TruthTable::constant(split_var, bit));
            }
        }
        counter /= 2;
    });
}

/// Whether every primary output is constant 0 under the current patterns.
pub fn equivalent<N: LogicNetwork>(network: &N, patterns: &PatternStore) -> bool {
    let mut check = true;
    network.foreach_po(|signal, k| {
        let node = network.get_node(signal);
        let is_zero = match patterns.get(node) {
            Some(tt) if network.is_complemented(signal) => (!tt).is_const0(),
            Some(tt) => tt.is_const0(),
            None => {
                warn!("equivalent: output {} ({}) has no pattern", k, signal);
                false
            }
        };
        check &= is_zero;
    });
    check
}

/// Round-based checker over a miter network.
pub struct SimulationCec<'a, N> {
    network: &'a N,
    params: SplitParams,
    stats: &'a mut SimulationCecStats,
}

impl<'a, N: LogicNetwork> SimulationCec<'a, N> {
    pub fn new(network: &'a N, params: SplitParams, stats: &'a mut SimulationCecStats) -> Self {
        stats.split_var = params.split_var;
        stats.rounds = params.rounds;
        stats.rounds_simulated = 0;
        Self { network, params, stats }
    }

    /// Returns `true` iff every output of the miter is 0 in every round.
    pub fn run(&mut self) -> bool {
        let SplitParams { split_var, rounds } = self.params;
        debug!("run: split_var = {}, rounds = {}", split_var, rounds);

        let simulator = TruthTableSimulator::new(split_var);
        let mut patterns = PatternStore::with_capacity(self.network.size());
        init_patterns(self.network, split_var, &mut patterns);

        for round in 0..rounds {
            if round > 0 {
                free_patterns(self.network, &mut patterns);
                update_patterns(self.network, &mut patterns, split_var, round);
            }
            simulate_nodes(self.network, &mut patterns, &simulator);
            self.stats.rounds_simulated = round + 1;
            if !equivalent(self.network, &patterns) {
                debug!("run: mismatch in round {}", round);
                return false;
            }
        }
        true
    }
}

/// Checks `a` and `b` for equivalence with the default configuration.
///
/// Returns [`CecOutcome::Unsupported`] for networks with more than 40 inputs
/// or networks that cannot be mitered.
pub fn simulation_cec(a: &Network, b: &Network, stats: Option<&mut SimulationCecStats>) -> CecOutcome {
    simulation_cec_with_config(a, b, &CecConfig::default(), stats)
}

pub fn simulation_cec_with_config(
    a: &Network,
    b: &Network,
    config: &CecConfig,
    stats: Option<&mut SimulationCecStats>,
) -> CecOutcome {
    let mut st = SimulationCecStats::default();
    let outcome = check(a, b, config, &mut st);
    info!(
        "simulation_cec: {} (split_var = {}, rounds = {}/{})",
        outcome, st.split_var, st.rounds_simulated, st.rounds
    );
    if let Some(pst) = stats {
        *pst = st;
    }
    outcome
}

fn check(a: &Network, b: &Network, config: &CecConfig, stats: &mut SimulationCecStats) -> CecOutcome {
    if a.num_pis() > config.max_pis || b.num_pis() > config.max_pis {
        warn!(
            "simulation_cec: {}/{} inputs exceed the limit of {}",
            a.num_pis(),
            b.num_pis(),
            config.max_pis
        );
        return CecOutcome::Unsupported;
    }

    let network = match miter(a, b) {
        Ok(network) => network,
        Err(e) => {
            warn!("simulation_cec: cannot build miter: {}", e);
            return CecOutcome::Unsupported;
        }
    };

    let params = compute_split_params(network.num_pis(), network.size(), config);
    if let Some(max_rounds) = config.max_rounds {
        if params.rounds > max_rounds {
            warn!(
                "simulation_cec: {} rounds needed, limit is {}",
                params.rounds, max_rounds
            );
            stats.split_var = params.split_var;
            stats.rounds = params.rounds;
            return CecOutcome::Unsupported;
        }
    }

    if SimulationCec::new(&network, params, stats).run() {
        CecOutcome::Equivalent
    } else {
        CecOutcome::NotEquivalent
    }
}
