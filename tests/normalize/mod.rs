pub mod tests_normalize;
