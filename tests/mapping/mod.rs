pub mod tests_ids;
pub mod tests_objects;
pub mod tests_roundtrip;
