use crate::{
    config::EngineConfig,
    model::structures::{map_record::MapRecord, player_state::PlayerState}
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub fn generate_map_record(name: &str, mapper: &str, difficulty: f64) -> MapRecord {
    MapRecord {
        name: name.to_string(),
        mapper: mapper.to_string(),
        variant_name: "Insane".to_string(),
        difficulty,
        url: format!("https://osu.ppy.sh/beatmapsets/{}", name.len()),
        image: None
    }
}

/// A pool with one map per difficulty, named `Map 0`, `Map 1`, ... in order
pub fn generate_pool(difficulties: &[f64]) -> Vec<MapRecord> {
    difficulties
        .iter()
        .enumerate()
        .map(|(i, d)| generate_map_record(&format!("Map {}", i), "Mapper", *d))
        .collect()
}

/// Evenly spaced pool covering `[lo, hi]`
pub fn generate_spread_pool(lo: f64, hi: f64, step: f64) -> Vec<MapRecord> {
    let n = ((hi - lo) / step).round() as usize;
    let difficulties: Vec<f64> = (0..=n).map(|i| lo + step * i as f64).collect();

    generate_pool(&difficulties)
}

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub fn rated_player(rating: f64) -> PlayerState {
    PlayerState {
        has_rating: true,
        rating: Some(rating),
        skip_cooldown_counter: EngineConfig::default().skip_cooldown
    }
}
