//! Minibatches of stacked states.
use super::ReplayMemory;
use crate::error::Result;
use log::trace;
use ndarray::{s, Array4};
use rand::Rng;

/// A minibatch sampled from [`ReplayMemory`].
///
/// `states` and `next_states` have shape
/// `(batch_size, height, width, history_length)`, the layout consumed by a
/// convolutional Q-network. All other fields have length `batch_size` and
/// follow the sample order.
#[derive(Clone, Debug, PartialEq)]
pub struct Minibatch {
    /// Stacked states ending one step before the sampled indices.
    pub states: Array4<u8>,

    /// Actions at the sampled indices.
    pub actions: Vec<i32>,

    /// Rewards at the sampled indices.
    pub rewards: Vec<f32>,

    /// Stacked states ending at the sampled indices.
    pub next_states: Array4<u8>,

    /// Terminal flags at the sampled indices.
    pub terminals: Vec<bool>,

    /// Sampled indices.
    pub indices: Vec<usize>,
}

impl Minibatch {
    /// Creates a minibatch buffer that can be refilled by
    /// [`ReplayMemory::minibatch_into`] without reallocation.
    pub fn with_capacity(
        batch_size: usize,
        history_length: usize,
        frame_height: usize,
        frame_width: usize,
    ) -> Self {
        let shape = (batch_size, frame_height, frame_width, history_length);
        Self {
            states: Array4::zeros(shape),
            actions: Vec::with_capacity(batch_size),
            rewards: Vec::with_capacity(batch_size),
            next_states: Array4::zeros(shape),
            terminals: Vec::with_capacity(batch_size),
            indices: Vec::with_capacity(batch_size),
        }
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the minibatch holds no sample.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl ReplayMemory {
    /// Returns a minibatch of `batch_size` transitions.
    ///
    /// For each sampled index `ix`, the state is `state_at(ix - 1)` and the
    /// next state is `state_at(ix)`, both transposed so that the history axis
    /// comes last.
    pub fn get_minibatch<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Minibatch> {
        let config = &self.config;
        let mut batch = Minibatch::with_capacity(
            config.batch_size,
            config.history_length,
            config.frame_height,
            config.frame_width,
        );
        self.minibatch_into(rng, &mut batch)?;
        Ok(batch)
    }

    /// Fills `batch` with a newly sampled minibatch.
    ///
    /// `batch` is reshaped if it was not created with the parameters of this
    /// memory; otherwise its storage is reused. On error, `batch` is left
    /// untouched.
    pub fn minibatch_into<R: Rng + ?Sized>(&self, rng: &mut R, batch: &mut Minibatch) -> Result<()> {
        let indices = self.sample_indices(rng)?;
        trace!("ReplayMemory::minibatch_into(), indices = {:?}", indices);

        let config = &self.config;
        let shape = [
            config.batch_size,
            config.frame_height,
            config.frame_width,
            config.history_length,
        ];
        if batch.states.shape() != &shape[..] {
            batch.states = Array4::zeros(shape);
        }
        if batch.next_states.shape() != &shape[..] {
            batch.next_states = Array4::zeros(shape);
        }

        for (i, &ix) in indices.iter().enumerate() {
            let state = self.state_at(ix - 1)?.permuted_axes([1, 2, 0]);
            let next_state = self.state_at(ix)?.permuted_axes([1, 2, 0]);
            batch.states.slice_mut(s![i, .., .., ..]).assign(&state);
            batch.next_states.slice_mut(s![i, .., .., ..]).assign(&next_state);
        }

        batch.actions.clear();
        batch.rewards.clear();
        batch.terminals.clear();
        batch.actions.extend(indices.iter().map(|&ix| self.actions[ix]));
        batch.rewards.extend(indices.iter().map(|&ix| self.rewards[ix]));
        batch.terminals.extend(indices.iter().map(|&ix| self.terminals[ix]));
        batch.indices = indices;

        Ok(())
    }
}
