pub mod dependencies;
#[cfg(test)]
pub mod test_helpers;
pub mod usecase;
