//! Probability and reachability of a knockout over several hits.
//!
//! All HP arithmetic is signed: hazards and residual damage may push the
//! remaining HP below zero before a hit lands.

/// Toxic damage on the turn a counter of `counter` applies.
pub fn toxic_damage(counter: i64, max_hp: i64) -> i64 {
    (counter * max_hp).div_euclid(16)
}

/// Probability that `hits` hits drawn from `damage` knock out a target at `hp`.
///
/// `damage` must be sorted ascending. `eot` is the net HP change applied
/// after every hit but the last (positive heals). A nonzero
/// `toxic_counter` adds growing toxic damage each turn.
pub fn compute_ko_chance(
    damage: &[u32],
    hp: i64,
    eot: i64,
    hits: u32,
    times_used: u32,
    max_hp: i64,
    toxic_counter: i64,
) -> f64 {
    let n = damage.len();
    if n == 0 || hits == 0 {
        return 0.0;
    }

    let mut toxic = 0;
    let mut next_counter = toxic_counter;
    if toxic_counter > 0 {
        toxic = toxic_damage(toxic_counter, max_hp);
        next_counter += 1;
    }

    if hits == 1 {
        let (mut eot, mut toxic) = (eot, toxic);
        // Healing resolves before toxic, and nothing heals after fainting
        if eot - toxic > 0 {
            eot = 0;
            toxic = 0;
        }
        let lethal = |d: u32| d as i64 - eot + toxic >= hp;
        if !lethal(damage[n - 1]) {
            return 0.0;
        }
        let first = damage.iter().position(|&d| lethal(d)).unwrap_or(n - 1);
        return (n - first) as f64 / n as f64;
    }

    let mut sum = 0.0;
    let mut last = 0.0;
    for (i, &d) in damage.iter().enumerate() {
        let chance = if i == 0 || d != damage[i - 1] {
            compute_ko_chance(damage, hp - d as i64 + eot - toxic, eot, hits - 1, times_used, max_hp, next_counter)
        } else {
            last
        };
        if chance == 1.0 {
            sum += (n - i) as f64;
            break;
        }
        sum += chance;
        last = chance;
    }
    sum / n as f64
}

/// Total damage dealt over `hits` hits (or `times_used` uses) of `damage`.
///
/// The final turn's residual only counts when it is net damage, since a
/// fainted target cannot heal.
pub fn predict_total(damage: i64, eot: i64, hits: u32, times_used: u32, toxic_counter: i64, max_hp: i64) -> i64 {
    let hits = hits as i64;
    let mut toxic = 0;
    let mut last_turn_eot = eot;
    if toxic_counter > 0 {
        toxic = (0..hits - 1).map(|i| toxic_damage(toxic_counter + i, max_hp)).sum();
        last_turn_eot -= toxic_damage(toxic_counter + hits - 1, max_hp);
    }

    let mut total = if hits > 1 && times_used == 1 {
        damage * hits - eot * (hits - 1) + toxic
    } else {
        damage - eot * (hits - 1) + toxic
    };
    if last_turn_eot < 0 {
        total -= last_turn_eot;
    }
    total
}
