//! End-to-end tests for the simulation-based equivalence checker.
//!
//! Tests cover agreement with brute force, round coverage, early termination,
//! the input limit, and the memory discipline of the pattern store.

use simcec::cec::{
    compute_split_params, equivalent, free_patterns, init_patterns, simulation_cec, simulation_cec_with_config,
    update_patterns, CecConfig, CecOutcome, PatternStore, SimulationCecStats,
};
use simcec::gate::Gate;
use simcec::miter::miter;
use simcec::network::{LogicNetwork, Network};
use simcec::signal::Signal;
use simcec::simulation::{simulate, simulate_nodes, BoolSimulator, TruthTableSimulator};

use test_log::test;

// ─── Network builders ──────────────────────────────────────────────────────────

/// Ripple-carry adder built from XOR3 and MAJ gates. Inputs: a[0..w], b[0..w].
fn adder_maj(width: usize) -> Network {
    let (mut network, x) = Network::with_inputs(2 * width);
    let (a, b) = x.split_at(width);
    let mut carry = Signal::zero();
    for i in 0..width {
        let sum = network.add_gate(Gate::xor3(a[i], b[i], carry));
        carry = network.maj(a[i], b[i], carry);
        network.add_output(sum);
    }
    network.add_output(carry);
    network
}

/// Ripple-carry adder built from two-input AND/OR/XOR only.
fn adder_aig(width: usize) -> Network {
    let (mut network, x) = Network::with_inputs(2 * width);
    let (a, b) = x.split_at(width);
    let mut carry = Signal::zero();
    for i in 0..width {
        let half = network.xor(a[i], b[i]);
        let sum = network.xor(half, carry);
        let generate = network.and(a[i], b[i]);
        let propagate = network.and(half, carry);
        carry = network.or(generate, propagate);
        network.add_output(sum);
    }
    network.add_output(carry);
    network
}

/// Like `adder_aig`, but the carry out of bit `faulty` ignores the propagate term.
fn adder_buggy(width: usize, faulty: usize) -> Network {
    let (mut network, x) = Network::with_inputs(2 * width);
    let (a, b) = x.split_at(width);
    let mut carry = Signal::zero();
    for i in 0..width {
        let half = network.xor(a[i], b[i]);
        let sum = network.xor(half, carry);
        let generate = network.and(a[i], b[i]);
        carry = if i == faulty {
            generate
        } else {
            let propagate = network.and(half, carry);
            network.or(generate, propagate)
        };
        network.add_output(sum);
    }
    network.add_output(carry);
    network
}

fn parity_chain(n: usize) -> Network {
    let (mut network, x) = Network::with_inputs(n);
    let mut acc = x[0];
    for &xi in &x[1..] {
        acc = network.xor(acc, xi);
    }
    network.add_output(acc);
    network
}

fn parity_tree(n: usize) -> Network {
    let (mut network, x) = Network::with_inputs(n);
    let mut layer = x;
    while layer.len() > 1 {
        let mut next = Vec::new();
        for pair in layer.chunks(2) {
            match pair {
                [l, r] => next.push(network.xor(*l, *r)),
                [single] => next.push(*single),
                _ => unreachable!(),
            }
        }
        layer = next;
    }
    network.add_output(layer[0]);
    network
}

/// Single output that is 1 exactly on assignment `index`.
fn minterm(n: usize, index: u64) -> Network {
    let (mut network, x) = Network::with_inputs(n);
    let literals: Vec<Signal> = (0..n).map(|k| x[k] ^ ((index >> k) & 1 == 0)).collect();
    let f = network.add_gate(Gate::andn(&literals));
    network.add_output(f);
    network
}

fn constant_zero(n: usize) -> Network {
    let (mut network, _) = Network::with_inputs(n);
    network.add_output(Signal::zero());
    network
}

fn and2() -> Network {
    let (mut network, x) = Network::with_inputs(2);
    let f = network.and(x[0], x[1]);
    network.add_output(f);
    network
}

fn or2() -> Network {
    let (mut network, x) = Network::with_inputs(2);
    let f = network.or(x[0], x[1]);
    network.add_output(f);
    network
}

fn brute_force_equivalent(a: &Network, b: &Network) -> bool {
    let n = a.num_pis();
    (0..(1u64 << n)).all(|i| {
        let sim = BoolSimulator::from_index(n, i);
        simulate(a, &sim) == simulate(b, &sim)
    })
}

fn with_split(split_var: u32) -> CecConfig {
    CecConfig {
        split_var: Some(split_var),
        ..CecConfig::default()
    }
}

// ─── Verdicts ──────────────────────────────────────────────────────────────────

#[test]
fn and_vs_or_is_not_equivalent() {
    let mut stats = SimulationCecStats::default();
    let outcome = simulation_cec(&and2(), &or2(), Some(&mut stats));
    assert_eq!(outcome, CecOutcome::NotEquivalent);
    assert_eq!(outcome.as_option(), Some(false));
    assert_eq!(stats.split_var, 2);
    assert_eq!(stats.rounds, 1);
}

#[test]
fn small_networks_agree_with_brute_force() {
    let pairs = [
        (adder_maj(3), adder_aig(3)),
        (adder_aig(3), adder_buggy(3, 1)),
        (adder_maj(2), adder_buggy(2, 0)),
        (parity_chain(6), parity_tree(6)),
        (parity_chain(5), minterm(5, 7)),
        (and2(), or2()),
        (and2(), and2()),
    ];
    for (a, b) in pairs.iter() {
        assert!(a.num_pis() <= 6);
        let expected = brute_force_equivalent(a, b);
        let mut stats = SimulationCecStats::default();
        let outcome = simulation_cec(a, b, Some(&mut stats));
        assert_eq!(outcome.as_option(), Some(expected));
        assert_eq!(stats.split_var as usize, a.num_pis());
        assert_eq!(stats.rounds, 1);
    }
}

#[test]
fn self_equivalence() {
    for network in [adder_aig(8), adder_maj(5), parity_tree(13), minterm(9, 300)] {
        let copy = network.clone();
        assert_eq!(simulation_cec(&network, &copy, None), CecOutcome::Equivalent);
        assert_eq!(
            simulation_cec_with_config(&network, &copy, &with_split(3), None),
            CecOutcome::Equivalent
        );
    }
}

#[test]
fn equivalent_adders_with_many_rounds() {
    let a = adder_maj(6);
    let b = adder_aig(6);
    for split_var in [1, 4, 7, 12] {
        let mut stats = SimulationCecStats::default();
        let outcome = simulation_cec_with_config(&a, &b, &with_split(split_var), Some(&mut stats));
        assert_eq!(outcome, CecOutcome::Equivalent, "split_var = {}", split_var);
        assert_eq!(stats.rounds, 1 << (12 - split_var));
        assert_eq!(stats.rounds_simulated, stats.rounds);
    }
}

#[test]
fn buggy_adder_is_caught_for_every_split() {
    let good = adder_aig(5);
    // The carry into bit 0 is constant 0, so a fault there is harmless.
    for faulty in 1..5 {
        let bad = adder_buggy(5, faulty);
        for split_var in 1..=10 {
            let outcome = simulation_cec_with_config(&good, &bad, &with_split(split_var), None);
            assert_eq!(
                outcome,
                CecOutcome::NotEquivalent,
                "faulty = {}, split_var = {}",
                faulty,
                split_var
            );
        }
    }
}

#[test]
fn heuristic_split_on_mid_size_network() {
    let mut stats = SimulationCecStats::default();
    let outcome = simulation_cec(&parity_chain(12), &parity_tree(12), Some(&mut stats));
    assert_eq!(outcome, CecOutcome::Equivalent);
    // Small miter: the memory budget allows simulating all inputs at once.
    assert_eq!(stats.split_var, 12);
    assert_eq!(stats.rounds, 1);
}

// ─── Round coverage ────────────────────────────────────────────────────────────

#[test]
fn every_single_assignment_is_covered() {
    let n = 5;
    let zero = constant_zero(n);
    for index in 0..(1u64 << n) {
        let f = minterm(n, index);
        for split_var in 1..=n as u32 {
            let outcome = simulation_cec_with_config(&f, &zero, &with_split(split_var), None);
            assert_eq!(
                outcome,
                CecOutcome::NotEquivalent,
                "minterm {:05b} missed with split_var = {}",
                index,
                split_var
            );
        }
    }
}

#[test]
fn mismatch_is_found_in_the_round_that_covers_it() {
    let n = 6;
    let split_var = 2;
    let zero = constant_zero(n);
    for index in 0..(1u64 << n) {
        let mut stats = SimulationCecStats::default();
        let outcome = simulation_cec_with_config(&minterm(n, index), &zero, &with_split(split_var), Some(&mut stats));
        assert_eq!(outcome, CecOutcome::NotEquivalent);
        // Round r fixes inputs split_var.. to the bits of r.
        assert_eq!(stats.rounds_simulated, (index >> split_var) + 1);
    }
}

// ─── Early termination ─────────────────────────────────────────────────────────

#[test]
fn stops_at_first_failing_round() {
    // b differs from a exactly when x3 = 1.
    let (mut a, x) = Network::with_inputs(4);
    a.add_output(x[0]);
    let (mut b, y) = Network::with_inputs(4);
    let f = b.ite(y[3], !y[0], y[0]);
    b.add_output(f);

    let mut stats = SimulationCecStats::default();
    let outcome = simulation_cec_with_config(&a, &b, &with_split(1), Some(&mut stats));
    assert_eq!(outcome, CecOutcome::NotEquivalent);
    assert_eq!(stats.rounds, 8);
    // x3 is the third non-simulated input: first set in round 4.
    assert_eq!(stats.rounds_simulated, 5);
}

#[test]
fn stops_before_last_round() {
    let mut stats = SimulationCecStats::default();
    let outcome = simulation_cec_with_config(&adder_aig(4), &adder_buggy(4, 1), &with_split(2), Some(&mut stats));
    assert_eq!(outcome, CecOutcome::NotEquivalent);
    assert_eq!(stats.rounds, 64);
    // Needs a0 = b0 = 1 with a1 != b1; b0 is the third non-simulated input.
    assert_eq!(stats.rounds_simulated, 5);
}

// ─── Unsupported inputs ────────────────────────────────────────────────────────

#[test]
fn more_than_forty_inputs_is_unsupported() {
    let big = parity_chain(41);
    let mut stats = SimulationCecStats::default();
    let outcome = simulation_cec(&big, &big.clone(), Some(&mut stats));
    assert_eq!(outcome, CecOutcome::Unsupported);
    assert_eq!(outcome.as_option(), None);
    assert_eq!(stats, SimulationCecStats::default());

    assert_eq!(simulation_cec(&constant_zero(40), &big, None), CecOutcome::Unsupported);
}

#[test]
fn input_limit_is_configurable() {
    let config = CecConfig {
        max_pis: 4,
        ..CecConfig::default()
    };
    assert_eq!(
        simulation_cec_with_config(&parity_chain(5), &parity_tree(5), &config, None),
        CecOutcome::Unsupported
    );
    assert_eq!(
        simulation_cec_with_config(&parity_chain(4), &parity_tree(4), &config, None),
        CecOutcome::Equivalent
    );
}

#[test]
fn incompatible_networks_are_unsupported() {
    assert_eq!(simulation_cec(&and2(), &parity_chain(3), None), CecOutcome::Unsupported);
    assert_eq!(simulation_cec(&adder_aig(1), &and2(), None), CecOutcome::Unsupported);
}

// ─── Memory discipline ─────────────────────────────────────────────────────────

#[test]
fn gate_patterns_never_accumulate() {
    let network = miter(&adder_maj(3), &adder_aig(3)).unwrap();
    let config = with_split(2);
    let params = compute_split_params(network.num_pis(), network.size(), &config);
    assert_eq!(params.rounds, 16);

    let count_gates = |patterns: &PatternStore| {
        let mut count = 0;
        network.foreach_gate(|g| {
            if patterns.contains(g) {
                count += 1;
            }
        });
        count
    };

    let simulator = TruthTableSimulator::new(params.split_var);
    let mut patterns = PatternStore::new();
    init_patterns(&network, params.split_var, &mut patterns);
    assert_eq!(count_gates(&patterns), 0);

    for round in 0..params.rounds {
        if round > 0 {
            free_patterns(&network, &mut patterns);
            assert_eq!(count_gates(&patterns), 0);
            update_patterns(&network, &mut patterns, params.split_var, round);
        }
        simulate_nodes(&network, &mut patterns, &simulator);
        let live = count_gates(&patterns);
        assert!(live > 0 && live <= network.num_gates());
        assert_eq!(patterns.len(), 1 + network.num_pis() + live);
        assert!(equivalent(&network, &patterns));
    }
}
