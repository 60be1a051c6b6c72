use super::Dialect;

/// Plain SQL with no engine-specific behaviour.
#[derive(Debug, Default, Clone, Copy)]
pub struct Generic;

impl Dialect for Generic {
    fn name(&self) -> &'static str {
        "generic"
    }
}
