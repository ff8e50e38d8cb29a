pub mod fake;
mod macros;
#[cfg(test)]
pub(crate) mod test_harness;
