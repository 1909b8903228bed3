use cocina::ids::FixedSuffix;
use cocina::IdGenerator;

#[test]
fn test_generated_file_set_id_uses_suffix() {
    let mut ids = IdGenerator::with_source(FixedSuffix("123-234-975".to_string()));
    assert_eq!(
        ids.file_set_id("druid:bc123kj8759", None),
        "https://cocina.sul.stanford.edu/fileSet/bc123kj8759-123-234-975"
    );
}

#[test]
fn test_existing_resource_id_is_kept() {
    let mut ids = IdGenerator::with_source(FixedSuffix("123-234-975".to_string()));
    assert_eq!(
        ids.file_set_id(
            "druid:bc123kj8759",
            Some("https://cocina.sul.stanford.edu/fileSet/bc123kj8759/resource123")
        ),
        "https://cocina.sul.stanford.edu/fileSet/bc123kj8759-resource123"
    );
}

#[test]
fn test_generation_is_deterministic_for_a_fixed_source() {
    let mut first = IdGenerator::with_source(FixedSuffix("abc".to_string()));
    let mut second = IdGenerator::with_source(FixedSuffix("abc".to_string()));
    assert_eq!(
        first.file_set_id("druid:bc123kj8759", None),
        second.file_set_id("druid:bc123kj8759", None)
    );
}
