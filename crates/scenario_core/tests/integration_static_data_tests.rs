use scenario_core::modes::{ModeParams, ShareMode, TransportMode};
use scenario_core::scenario::{ScenarioComputer, ScenarioSource};
use scenario_core::static_data::{StaticCityDataset, StaticDataLoader};
use scenario_core::test_helpers::{
    active_share_sums, sample_static_dataset, write_sample_static_dataset, FixedZoneProvider,
    sample_zones,
};

#[test]
fn dataset_survives_save_and_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("paris_75056_static.bin");
    let dataset = sample_static_dataset("fr-75056", 3);
    dataset.save_to_file(&path).expect("save");
    let loaded = StaticCityDataset::from_file(&path).expect("load");
    assert_eq!(loaded, dataset);
}

#[test]
fn loader_keeps_one_resident_copy_per_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_sample_static_dataset(dir.path(), "paris_75056_static.bin", "fr-75056", 4);
    let loader = StaticDataLoader::new(dir.path());

    let all = loader
        .load("fr-75056", 15.0, &ModeParams::default())
        .expect("static data for paris");
    let car = loader
        .load("fr-75056", 15.0, &ModeParams::only(&[TransportMode::Car]))
        .expect("static data for paris");

    assert_eq!(loader.resident_count(), 1);
    assert_eq!(all.source, ScenarioSource::Static);
    assert_eq!(all.zones.len(), 4);
    assert!(car.zones.iter().all(|zone| (zone.shares.car - 1.0).abs() < 1e-12));
    assert!(car.zones.iter().all(|zone| zone.shares.walk == 0.0));
    // Re-derivation, not reuse: the all-modes result still has every column.
    assert!(all.zones.iter().all(|zone| zone.shares.walk > 0.0));
}

#[test]
fn corrupt_dataset_is_treated_as_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("lyon_69123_static.bin"), b"not bincode").expect("write");
    let loader = StaticDataLoader::new(dir.path());
    assert!(loader.load("fr-69123", 10.0, &ModeParams::default()).is_none());
    assert_eq!(loader.resident_count(), 0);
}

#[test]
fn computer_prefers_static_data_and_normalizes_shares() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_sample_static_dataset(dir.path(), "paris_75056_static.bin", "fr-75056", 3);
    let computer = ScenarioComputer::new(Box::new(FixedZoneProvider::new(sample_zones(2))))
        .with_static_data(StaticDataLoader::new(dir.path()));

    let mut params = ModeParams::default();
    params.public_transport.car_pt = false;
    let result = computer.compute(" 75056 ", 15.0, Some(&params));

    assert_eq!(result.source, ScenarioSource::Static);
    assert_eq!(result.zones.len(), 3);
    for sum in active_share_sums(&result, &params) {
        assert!((sum - 1.0).abs() < 1e-6);
    }
    for zone in &result.zones {
        assert_eq!(zone.shares.get(ShareMode::PtCar), 0.0);
        assert!(
            (zone.shares.public_transport - zone.shares.pt_walk - zone.shares.pt_bicycle).abs()
                < 1e-12
        );
    }
}

#[test]
fn city_without_dataset_uses_the_zone_model() {
    let dir = tempfile::tempdir().expect("tempdir");
    let computer = ScenarioComputer::new(Box::new(FixedZoneProvider::new(sample_zones(5))))
        .with_static_data(StaticDataLoader::new(dir.path()));
    let result = computer.compute("13055", 15.0, None);
    assert_eq!(result.source, ScenarioSource::Model);
    assert_eq!(result.zones.len(), 5);
}

#[test]
fn all_inactive_returns_fallback_even_with_static_data() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_sample_static_dataset(dir.path(), "paris_75056_static.bin", "fr-75056", 3);
    let computer = ScenarioComputer::new(Box::new(FixedZoneProvider::new(sample_zones(2))))
        .with_static_data(StaticDataLoader::new(dir.path()));
    let result = computer.compute("75056", 15.0, Some(&ModeParams::none_active()));
    assert!(result.is_fallback());
    assert_eq!(computer.static_data().map(|l| l.resident_count()), Some(0));
}
