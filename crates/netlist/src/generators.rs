//! Circuit generators.
//!
//! The core is agnostic to topology; these generators are one set of
//! collaborators producing NAND-only arithmetic circuits for delay
//! characterization.

use crate::identifiers::{SignalId, Tick};
use crate::netlist::{Netlist, NetlistBuilder, NetlistError};

/// A ripple-carry adder built from NAND-only full adders.
#[derive(Debug)]
pub struct RippleCarryAdder {
    /// The circuit.
    pub netlist: Netlist,
    /// Primary inputs in driver order: `A0..A{w-1}, B0..B{w-1}, CIN`.
    pub inputs: Vec<SignalId>,
    /// Sum outputs `S0..S{w-1}`.
    pub sums: Vec<SignalId>,
    /// Final carry out.
    pub carry_out: SignalId,
}

impl RippleCarryAdder {
    /// Adder width in bits.
    pub fn width(&self) -> usize {
        self.sums.len()
    }

    /// The most significant sum bit, the slowest sum output.
    pub fn last_sum(&self) -> SignalId {
        self.sums[self.sums.len() - 1]
    }
}

/// Build a `width`-bit ripple-carry adder with uniform gate `delay`.
///
/// Each stage is a ten-NAND full adder: an XOR half (propagate), a second
/// XOR half for the sum, and a carry gate fed by a dedicated `NAND(p, cin)`
/// wire. The duplicated `NAND(p, cin)` matches the measured topology, where
/// the carry path does not share the sum path's gate.
///
/// # Panics
///
/// Panics if `width` is 0.
pub fn ripple_carry_adder(width: usize, delay: Tick) -> Result<RippleCarryAdder, NetlistError> {
    assert!(width >= 1, "adder width must be at least 1");
    let mut b = NetlistBuilder::new();

    let a: Vec<SignalId> = (0..width).map(|i| b.signal(format!("A{i}"))).collect();
    let bs: Vec<SignalId> = (0..width).map(|i| b.signal(format!("B{i}"))).collect();
    let cin = b.signal("CIN");
    let sums: Vec<SignalId> = (0..width).map(|i| b.signal(format!("S{i}"))).collect();
    let carry_out = b.signal("COUT");

    let mut carry = cin;
    for i in 0..width {
        let cout = if i + 1 == width {
            carry_out
        } else {
            b.signal(format!("C{}", i + 1))
        };
        full_adder(&mut b, i, a[i], bs[i], carry, sums[i], cout, delay)?;
        carry = cout;
    }

    let mut inputs = a;
    inputs.extend(bs);
    inputs.push(cin);

    Ok(RippleCarryAdder {
        netlist: b.finish(),
        inputs,
        sums,
        carry_out,
    })
}

/// Wire one ten-NAND full adder into `b`.
///
/// `stage` only names the internal wires for diagnostics.
#[allow(clippy::too_many_arguments)]
fn full_adder(
    b: &mut NetlistBuilder,
    stage: usize,
    a: SignalId,
    x: SignalId,
    cin: SignalId,
    sum: SignalId,
    cout: SignalId,
    delay: Tick,
) -> Result<(), NetlistError> {
    let t1 = b.signal(format!("fa{stage}.t1"));
    let t2 = b.signal(format!("fa{stage}.t2"));
    let t3 = b.signal(format!("fa{stage}.t3"));
    let p = b.signal(format!("fa{stage}.p"));
    let t4 = b.signal(format!("fa{stage}.t4"));
    let t5 = b.signal(format!("fa{stage}.t5"));
    let t6 = b.signal(format!("fa{stage}.t6"));
    let t10 = b.signal(format!("fa{stage}.t10"));

    // p = a XOR x
    b.nand(a, x, t1, delay)?;
    b.nand(a, t1, t2, delay)?;
    b.nand(x, t1, t3, delay)?;
    b.nand(t2, t3, p, delay)?;
    // sum = p XOR cin
    b.nand(p, cin, t4, delay)?;
    b.nand(p, t4, t5, delay)?;
    b.nand(cin, t4, t6, delay)?;
    b.nand(t5, t6, sum, delay)?;
    // cout = NAND(t1, NAND(p, cin)) over a dedicated carry wire
    b.nand(p, cin, t10, delay)?;
    b.nand(t1, t10, cout, delay)?;

    Ok(())
}
