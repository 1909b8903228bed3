pub mod tests_projection;
