use yake_core::coverage::{active_profiles, remove_active_profiles, ProfileSink};

// One test only: the registry is process-wide and tests in a binary run in parallel.
#[test]
fn sinks_are_registered_until_dropped_and_can_be_purged() {
    let dropped = ProfileSink::create().expect("create sink");
    let dropped_path = dropped.path().to_path_buf();
    assert!(dropped_path.exists());
    assert!(active_profiles().contains(&dropped_path));
    let name = dropped_path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("yake-coverage-") && name.ends_with(".out"), "unexpected name {name}");

    drop(dropped);
    assert!(!dropped_path.exists());
    assert!(!active_profiles().contains(&dropped_path));

    // An interrupted run never reaches the destructor; purging must clean up anyway.
    let leaked = ProfileSink::create().expect("create sink");
    let leaked_path = leaked.path().to_path_buf();
    std::mem::forget(leaked);
    assert!(leaked_path.exists());

    assert_eq!(remove_active_profiles(), 1);
    assert!(!leaked_path.exists());
    assert!(active_profiles().is_empty());
}
