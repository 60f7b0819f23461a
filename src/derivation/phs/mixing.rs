//! Mixing phase.
//!
//! The mixing engine walks every lane `t_cost` times. Each step depends on
//! the running state left by the previous step, so a lane cannot be
//! computed out of order:
//!
//! ```text
//! prev  = (i - 1) mod L
//! j     = reference index (see `reference`)
//! t     = G(state ⊕ B[prev], B[j])
//! B[i] ^= t
//! state = t
//! ```
//!
//! Every block of every lane is written exactly once per pass. Lanes only
//! access their own region; between passes (the only synchronization
//! point) each lane state absorbs the XOR of the other lanes' states.

use log::trace;

use super::block::Block;
use super::error::PhsError;
use super::params::{AddressingPolicy, check_time};
use super::reference::{Addressing, addressing, reference_index};
use super::table::Table;

/// One mixing step, as reported to an [`AccessObserver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub lane: usize,
    pub pass: u32,
    /// Lane-local index of the block written.
    pub index: usize,
    /// Lane-local index of the reference block read.
    pub reference: usize,
    pub data_dependent: bool,
}

/// Receives every step of the mixing phase.
///
/// Production code uses [`NoopObserver`]; tests record steps to check the
/// coverage and addressing invariants.
pub trait AccessObserver {
    fn on_step(&mut self, step: Step);

    fn on_pass_end(&mut self, _pass: u32) {}
}

/// Observer that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl AccessObserver for NoopObserver {
    #[inline(always)]
    fn on_step(&mut self, _step: Step) {}
}

/// Running state of every lane before the first pass.
fn initial_states(table: &Table) -> Vec<Block> {
    (0..table.lanes())
        .map(|k| {
            let lane = table.lane(k);
            Block::compress(&lane[0], &lane[lane.len() - 1])
        })
        .collect()
}

/// Feeds each lane state with the XOR of all other lane states.
fn exchange(states: &mut [Block]) {
    if states.len() < 2 {
        return;
    }

    let mut all = Block::ZERO;
    states.iter().for_each(|s| all.in_place_xor(s));

    for state in states.iter_mut() {
        let others = all.xor(state);
        let next = Block::compress(state, &others);
        *state = next;
    }
}

/// Runs one pass over one lane.
fn mix_lane_pass<O: AccessObserver + ?Sized>(
    lane_id: usize,
    lane: &mut [Block],
    state: &mut Block,
    pass: u32,
    policy: AddressingPolicy,
    observer: &mut O,
) {
    let lane_len = lane.len();
    let mask = lane_len - 1;

    for i in 0..lane_len {
        let prev = i.wrapping_sub(1) & mask;
        let mode = addressing(policy, pass, i, lane_len);
        let j = reference_index(mode, pass, i, state, lane_len);

        let t = Block::compress(&state.xor(&lane[prev]), &lane[j]);
        lane[i].in_place_xor(&t);
        *state = t;

        observer.on_step(Step {
            lane: lane_id,
            pass,
            index: i,
            reference: j,
            data_dependent: mode == Addressing::Dependent,
        });
    }
}

/// Mixes `table` in place for `t_cost` passes and returns the running
/// state of every lane.
///
/// With the `parallel` feature, lanes run concurrently within a pass and
/// are joined before the next one.
///
/// # Errors
///
/// Returns [`PhsError::InvalidParameter`] if `t_cost` is outside
/// `MIN_TIME..=MAX_TIME`. The table is left untouched in that case.
pub fn mix(
    table: &mut Table,
    t_cost: u32,
    policy: AddressingPolicy,
) -> Result<Vec<Block>, PhsError> {
    check_time(t_cost)?;
    let mut states = initial_states(table);

    for pass in 0..t_cost {
        table.for_each_lane(&mut states, |k, lane, state| {
            mix_lane_pass(k, lane, state, pass, policy, &mut NoopObserver)
        });
        exchange(&mut states);
        trace!("mixing pass {}/{} complete", pass + 1, t_cost);
    }

    Ok(states)
}

/// Same as [`mix`], reporting every step to `observer`.
///
/// Lanes are processed one after the other; the result is identical to
/// [`mix`].
pub fn mix_observed<O: AccessObserver>(
    table: &mut Table,
    t_cost: u32,
    policy: AddressingPolicy,
    observer: &mut O,
) -> Result<Vec<Block>, PhsError> {
    check_time(t_cost)?;
    let mut states = initial_states(table);

    for pass in 0..t_cost {
        for (k, (lane, state)) in table.lanes_mut().zip(states.iter_mut()).enumerate() {
            mix_lane_pass(k, lane, state, pass, policy, observer);
        }
        exchange(&mut states);
        observer.on_pass_end(pass);
    }

    Ok(states)
}
