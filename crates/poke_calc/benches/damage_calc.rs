//! Benchmarks for the damage pipeline and KO estimation.
//!
//! Run with:
//!   cargo bench --package poke_calc --bench damage_calc

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use poke_calc::moves::MoveFlagSet;
use poke_calc::{
    calculate, get_ko_chance, ChromaticField, Field, Generation, Move, MoveCategory, MoveSet, Pokemon, PokemonSet,
    StatsTable, Type, Weather,
};

fn pokemon(name: &str, types: &[Type], base: StatsTable<u32>, ability: &str, item: &str) -> Pokemon {
    Pokemon::from_set(PokemonSet {
        name: name.into(),
        types: types.to_vec(),
        base_stats: base,
        ability: Some(ability.into()),
        item: Some(item.into()),
        level: 50,
        ..Default::default()
    })
    .expect("valid set")
}

/// Garchomp Earthquake into Tyranitar, a typical singles exchange
fn setup_singles() -> (Pokemon, Pokemon, Move) {
    let mut garchomp = PokemonSet {
        name: "Garchomp".into(),
        types: vec![Type::Dragon, Type::Ground],
        base_stats: StatsTable { hp: 108, atk: 130, def: 95, spa: 80, spd: 85, spe: 102 },
        ability: Some("Rough Skin".into()),
        item: Some("Life Orb".into()),
        nature: Some("Jolly".into()),
        level: 50,
        ..Default::default()
    };
    garchomp.evs.atk = Some(252);
    garchomp.evs.spe = Some(252);
    let attacker = Pokemon::from_set(garchomp).expect("valid set");

    let defender = pokemon(
        "Tyranitar",
        &[Type::Rock, Type::Dark],
        StatsTable { hp: 100, atk: 134, def: 110, spa: 95, spd: 100, spe: 61 },
        "Sand Stream",
        "Leftovers",
    );

    let earthquake = Move::from_set(MoveSet {
        name: "Earthquake".into(),
        bp: 100,
        move_type: Type::Ground,
        category: MoveCategory::Physical,
        ..Default::default()
    })
    .expect("valid move");

    (attacker, defender, earthquake)
}

fn bench_calculate(c: &mut Criterion) {
    let (attacker, defender, earthquake) = setup_singles();
    let gen = Generation::default();

    let mut group = c.benchmark_group("calculate");
    group.throughput(Throughput::Elements(1));

    let fields = [
        ("plain", Field::default()),
        ("sand", Field { weather: Some(Weather::Sand), ..Default::default() }),
        ("desert", Field { chromatic_field: Some(ChromaticField::Desert), ..Default::default() }),
    ];
    for (name, field) in &fields {
        group.bench_with_input(BenchmarkId::new("earthquake", name), field, |b, field| {
            b.iter(|| calculate(gen, black_box(&attacker), black_box(&defender), black_box(&earthquake), field))
        });
    }
    group.finish();
}

fn bench_multi_hit(c: &mut Criterion) {
    let gen = Generation::default();
    let attacker = pokemon(
        "Cinccino",
        &[Type::Normal],
        StatsTable { hp: 75, atk: 95, def: 60, spa: 65, spd: 60, spe: 115 },
        "Skill Link",
        "King's Rock",
    );
    let defender = pokemon(
        "Corviknight",
        &[Type::Flying, Type::Steel],
        StatsTable { hp: 98, atk: 87, def: 105, spa: 53, spd: 85, spe: 67 },
        "Pressure",
        "Leftovers",
    );
    let tail_slap = Move::from_set(MoveSet {
        name: "Tail Slap".into(),
        bp: 25,
        move_type: Type::Normal,
        category: MoveCategory::Physical,
        flags: MoveFlagSet { contact: true, ..Default::default() },
        hits: Some(5),
        ..Default::default()
    })
    .expect("valid move");

    c.bench_function("tail_slap_5_hits", |b| {
        b.iter(|| calculate(gen, black_box(&attacker), black_box(&defender), black_box(&tail_slap), &Field::default()))
    });
}

fn bench_ko_chance(c: &mut Criterion) {
    let (attacker, defender, earthquake) = setup_singles();
    let gen = Generation::default();
    let result = calculate(gen, &attacker, &defender, &earthquake, &Field::default());

    c.bench_function("ko_chance", |b| {
        b.iter(|| {
            get_ko_chance(
                gen,
                &result.attacker,
                &result.defender,
                &result.mv,
                &result.field,
                black_box(&result.damage),
                false,
            )
        })
    });
}

criterion_group!(benches, bench_calculate, bench_multi_hit, bench_ko_chance);
criterion_main!(benches);
