/// Rust's `!` is unstable. This empty enum is a locally-defined equivalent
/// which is stable, used as the success type of loops that never return.
#[derive(Debug)]
pub enum Never {}
