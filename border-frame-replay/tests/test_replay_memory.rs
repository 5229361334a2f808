use anyhow::Result;
use border_frame_replay::{
    ExperienceBufferBase, ReplayBufferBase, ReplayMemory, ReplayMemoryConfig, ReplayMemoryError,
    Transition,
};
use ndarray::Array3;
use rand::{rngs::StdRng, SeedableRng};
use test_log::test;

const FRAME_HEIGHT: usize = 84;
const FRAME_WIDTH: usize = 84;
const HISTORY_LENGTH: usize = 4;
const BATCH_SIZE: usize = 32;
const CAPACITY: usize = 1_000;
const SEED: u64 = 42;

fn config() -> ReplayMemoryConfig {
    ReplayMemoryConfig::default()
        .capacity(CAPACITY)
        .frame_height(FRAME_HEIGHT)
        .frame_width(FRAME_WIDTH)
        .history_length(HISTORY_LENGTH)
        .batch_size(BATCH_SIZE)
}

fn ones() -> Array3<u8> {
    Array3::ones((FRAME_HEIGHT, FRAME_WIDTH, 1))
}

/// Appends `n` non-terminal transitions followed by a terminal one.
fn append_episode(memory: &mut ReplayMemory, n: usize) -> Result<()> {
    for _ in 0..n {
        memory.append(0, ones().view(), 0.0, false)?;
    }
    memory.append(0, ones().view(), 0.0, true)?;
    Ok(())
}

#[test]
fn test_random_episode_return_size() -> Result<()> {
    let mut memory = ReplayMemory::new(&config())?;
    append_episode(&mut memory, 10)?;
    append_episode(&mut memory, 10)?;
    let mut rng = StdRng::seed_from_u64(SEED);

    for _ in 0..10 {
        let ep = memory.random_episode(&mut rng)?;
        assert_eq!(ep.states.shape(), ep.next_states.shape());
        assert_eq!(ep.next_states.shape()[0], ep.states.shape()[0]);
        assert_eq!(ep.next_states.shape()[0], 10);
        assert_eq!(ep.terminals.last(), Some(&false));
    }
    Ok(())
}

#[test]
fn test_random_episode_matches_info() -> Result<()> {
    let mut memory = ReplayMemory::new(&config())?;
    append_episode(&mut memory, 10)?;
    let mut rng = StdRng::seed_from_u64(SEED);

    let ep = memory.random_episode(&mut rng)?;
    let n = ep.states.shape()[0];
    assert_eq!(ep.next_states.shape()[0], n);
    assert_eq!(ep.actions.len(), n);
    assert_eq!(ep.terminals.len(), n);
    assert_eq!(ep.rewards.len(), n);
    assert_eq!(ep.terminals.last(), Some(&false));
    Ok(())
}

#[test]
fn test_fresh_memory_has_insufficient_data() -> Result<()> {
    let mut memory = ReplayMemory::new(&config())?;
    let mut rng = StdRng::seed_from_u64(SEED);

    assert_eq!(
        memory.get_minibatch(&mut rng),
        Err(ReplayMemoryError::InsufficientData {
            count: 0,
            history_length: HISTORY_LENGTH
        })
    );
    assert_eq!(
        memory.random_episode(&mut rng),
        Err(ReplayMemoryError::EmptyBuffer)
    );
    assert!(memory.batch(&mut rng).is_err());
    Ok(())
}

#[test]
fn test_minibatch_shapes() -> Result<()> {
    let mut memory = ReplayMemory::new(&config())?;
    let mut rng = StdRng::seed_from_u64(SEED);
    for n in [30, 5, 60, 12] {
        append_episode(&mut memory, n)?;
    }

    let batch = memory.batch(&mut rng)?;
    assert_eq!(batch.actions.len(), BATCH_SIZE);
    assert_eq!(batch.rewards.len(), BATCH_SIZE);
    assert_eq!(batch.terminals.len(), BATCH_SIZE);
    assert_eq!(
        batch.states.shape(),
        &[BATCH_SIZE, FRAME_HEIGHT, FRAME_WIDTH, HISTORY_LENGTH]
    );
    assert_eq!(batch.states.shape(), batch.next_states.shape());
    Ok(())
}

#[test]
fn test_capacity_wraparound() -> Result<()> {
    let config = config().capacity(50).batch_size(256);
    let mut memory = ReplayMemory::new(&config)?;
    let mut rng = StdRng::seed_from_u64(SEED);

    // Action of transition `t` is `t`.
    for t in 0..57 {
        let frame = Array3::from_elem((FRAME_HEIGHT, FRAME_WIDTH, 1), t as u8);
        memory.push(Transition::new(t, frame, 1.0, t % 20 == 19))?;
    }
    assert_eq!(memory.len(), 50);
    assert_eq!(memory.write_cursor(), 7);
    assert_eq!(memory.action(7), Some(7));
    assert_eq!(memory.action(6), Some(56));

    for _ in 0..5 {
        let batch = memory.get_minibatch(&mut rng)?;
        for (i, &ix) in batch.indices.iter().enumerate() {
            // Windows never mix frames written on both sides of the cursor.
            assert!(!(ix >= 7 && ix - HISTORY_LENGTH <= 7));
            for k in 0..HISTORY_LENGTH {
                assert_eq!(
                    batch.next_states[[i, 0, 0, k]] as usize,
                    batch.states[[i, 0, 0, k]] as usize + 1
                );
            }
            let window = (ix - HISTORY_LENGTH..ix)
                .map(|j| memory.is_terminal(j).unwrap_or(true))
                .collect::<Vec<_>>();
            assert!(window.iter().all(|&t| !t), "ix = {}", ix);
        }
    }
    Ok(())
}

#[test]
fn test_shape_rejection_keeps_state() -> Result<()> {
    let mut memory = ReplayMemory::new(&config())?;
    append_episode(&mut memory, 3)?;
    let (count, cursor) = (memory.len(), memory.write_cursor());

    for shape in [
        (FRAME_HEIGHT, FRAME_WIDTH, 3),
        (FRAME_WIDTH + 1, FRAME_HEIGHT, 1),
        (1, 1, 1),
    ] {
        let frame = Array3::<u8>::zeros(shape);
        let err = memory.append(1, frame.view(), 1.0, false).unwrap_err();
        assert!(matches!(err, ReplayMemoryError::Shape { .. }));
    }
    assert_eq!((memory.len(), memory.write_cursor()), (count, cursor));
    Ok(())
}

#[test]
fn test_snapshot_load_is_idempotent() -> Result<()> {
    let mut memory = ReplayMemory::new(&config())?;
    for n in [20, 40, 7] {
        append_episode(&mut memory, n)?;
    }
    let snapshot = memory.snapshot();

    let mut memory1 = ReplayMemory::new(&config())?;
    memory1.load(&snapshot)?;
    let batch1 = memory1.get_minibatch(&mut StdRng::seed_from_u64(SEED))?;

    memory1.load(&snapshot)?;
    assert_eq!(memory1.len(), snapshot.len());
    assert_eq!(memory1.write_cursor(), snapshot.len() - 1);
    let batch2 = memory1.get_minibatch(&mut StdRng::seed_from_u64(SEED))?;
    assert_eq!(batch1, batch2);
    Ok(())
}
