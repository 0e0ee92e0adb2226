pub mod process_identity;

#[cfg(test)]
pub mod fixed_identity;
