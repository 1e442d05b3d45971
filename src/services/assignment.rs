use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{AppError, AppResult};

/// Assigns one hobby to each free-time slot.
///
/// The hobby list is shuffled once with the caller's RNG, then cycled
/// round-robin across the slots in their stored order. With at least as
/// many slots as hobbies, every hobby appears at least once; slot i and
/// slot i + hobby_count always share a hobby.
pub fn assign_hobbies(
    hobbies: &[String],
    slot_count: usize,
    rng: &mut impl Rng,
) -> AppResult<Vec<String>> {
    if hobbies.is_empty() {
        return Err(AppError::NoHobbiesSelected);
    }

    let mut rotation: Vec<String> = hobbies.to_vec();
    rotation.shuffle(rng);

    Ok((0..slot_count)
        .map(|slot| rotation[slot % rotation.len()].clone())
        .collect())
}
