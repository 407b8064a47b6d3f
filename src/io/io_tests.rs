use crate::drivers::contribution_generation::{
    ContributionGenerationParams, LookupStrategy, UnsupportedCategoryPolicy,
};
use crate::integrals::EriIndex;
use crate::io::{from_idci_yaml_str, read_idci_yaml, write_idci_yaml};

const ROOT: &str = env!("CARGO_MANIFEST_DIR");

#[test]
fn test_io_read_contribution_generation_params_yaml() {
    let path = format!("{ROOT}/tests/config/contribution_generation.yml");
    let params: ContributionGenerationParams = read_idci_yaml(&path).unwrap();
    assert_eq!(params.lookup, LookupStrategy::Linear);
    assert_eq!(params.unsupported, UnsupportedCategoryPolicy::Report);
    assert!(!params.parallel);

    // Absent keys fall back to the builder defaults.
    assert!(params.canonicalise);
    assert!(!params.write_contributions);
}

#[test]
fn test_io_from_yaml_str() {
    let params: ContributionGenerationParams = from_idci_yaml_str("{}").unwrap();
    assert_eq!(params, ContributionGenerationParams::default());

    let params: ContributionGenerationParams =
        from_idci_yaml_str("canonicalise: false\nwrite_contributions: true\n").unwrap();
    assert!(!params.canonicalise);
    assert!(params.write_contributions);
    assert_eq!(params.lookup, LookupStrategy::Hashed);

    let integrals: Vec<EriIndex> =
        from_idci_yaml_str("- {i: 0, j: 1, k: 0, l: 2}\n- {i: 3, j: 3, k: 3, l: 3}\n").unwrap();
    assert_eq!(integrals, vec![EriIndex::new(0, 1, 0, 2), EriIndex::new(3, 3, 3, 3)]);

    assert!(from_idci_yaml_str::<ContributionGenerationParams>("lookup: Binary\n").is_err());
    assert!(read_idci_yaml::<ContributionGenerationParams, _>(format!(
        "{ROOT}/tests/config/nonexistent.yml"
    ))
    .is_err());
}

#[test]
fn test_io_write_yaml() {
    let params = ContributionGenerationParams::builder()
        .lookup(LookupStrategy::Linear)
        .parallel(false)
        .build()
        .unwrap();
    let name = std::env::temp_dir().join("idci_io_test_write_yaml");
    write_idci_yaml(&name, &params).unwrap();
    let read: ContributionGenerationParams = read_idci_yaml(name.with_extension("yml")).unwrap();
    assert_eq!(read, params);
}
