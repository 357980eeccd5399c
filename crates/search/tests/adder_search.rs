//! End-to-end searches over the ripple-carry adder.

use gatetime_netlist::ripple_carry_adder;
use gatetime_search::{Direction, TransitionSearch};

#[test]
fn test_serial_and_parallel_reports_are_identical() {
    // Width 2 keeps the pair count small (5 inputs, 992 pairs).
    let adder = ripple_carry_adder(2, 1).unwrap();
    let monitored = [adder.last_sum(), adder.carry_out];
    let search = TransitionSearch::new(&adder.netlist, &adder.inputs, &monitored);

    let serial = search.run().unwrap();
    let parallel = search.run_parallel().unwrap();
    assert_eq!(serial.events_processed, parallel.events_processed);
    assert_eq!(serial, parallel);
}

#[test]
fn test_search_is_deterministic_across_runs() {
    let adder = ripple_carry_adder(2, 1).unwrap();
    let monitored = [adder.last_sum(), adder.carry_out];
    let search = TransitionSearch::new(&adder.netlist, &adder.inputs, &monitored);

    assert_eq!(search.run().unwrap(), search.run().unwrap());
}

#[test]
fn test_width_four_worst_case_delays() {
    let adder = ripple_carry_adder(4, 1).unwrap();
    let monitored = [adder.last_sum(), adder.carry_out];
    let search = TransitionSearch::new(&adder.netlist, &adder.inputs, &monitored);

    let report = search.run_parallel().unwrap();
    assert_eq!(report.pairs_evaluated, 512 * 511);

    for (out, &signal) in report.outputs.iter().zip(&monitored) {
        let chain = adder.netlist.longest_arrival(signal).unwrap();
        for extreme in [&out.rise, &out.fall] {
            let witness = extreme
                .witness
                .as_ref()
                .unwrap_or_else(|| panic!("no {} witness found", out.name));
            assert_eq!(witness.old.width(), 9);
            assert!(extreme.delay >= 1);
            assert!(
                extreme.delay <= chain,
                "{} delay {} exceeds structural bound {}",
                out.name,
                extreme.delay,
                chain
            );
        }
        // Some ordered pair must exercise the full carry ripple, so the
        // worse of the two extremes reaches the longest-chain arrival.
        assert!(
            out.rise.delay.max(out.fall.delay) >= chain,
            "{} worst case {} below longest chain {}",
            out.name,
            out.rise.delay.max(out.fall.delay),
            chain
        );
    }
}

#[test]
fn test_witness_pairs_replay_to_their_recorded_delay() {
    let adder = ripple_carry_adder(3, 1).unwrap();
    let monitored = [adder.last_sum(), adder.carry_out];
    let search = TransitionSearch::new(&adder.netlist, &adder.inputs, &monitored);

    let report = search.run().unwrap();
    for (i, out) in report.outputs.iter().enumerate() {
        for (extreme, direction) in [(&out.rise, Direction::Rise), (&out.fall, Direction::Fall)] {
            let witness = extreme.witness.as_ref().unwrap();
            let mut state = search.primed_state().unwrap();
            let outcome = search
                .measure_pair(&mut state, witness.old.bits(), witness.new.bits())
                .unwrap();
            let transition = outcome.transitions[i].expect("witness pair must transition");
            assert_eq!(transition.delay, extreme.delay);
            assert_eq!(transition.direction, direction);
        }
    }
}

#[test]
fn test_reversed_rise_witness_never_rises_again() {
    // Replaying a rise witness in reverse must fall or not change; the
    // output cannot rise to a value it already holds.
    let adder = ripple_carry_adder(3, 1).unwrap();
    let monitored = [adder.last_sum(), adder.carry_out];
    let search = TransitionSearch::new(&adder.netlist, &adder.inputs, &monitored);

    let report = search.run().unwrap();
    for (i, out) in report.outputs.iter().enumerate() {
        let witness = out.rise.witness.as_ref().unwrap();
        let mut state = search.primed_state().unwrap();
        let outcome = search
            .measure_pair(&mut state, witness.new.bits(), witness.old.bits())
            .unwrap();
        if let Some(transition) = outcome.transitions[i] {
            assert_eq!(transition.direction, Direction::Fall);
        }
    }
}
