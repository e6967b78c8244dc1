#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineConfig {
    /// How deeply user-defined words may call into each other; `None` means
    /// unbounded. Calls are replayed on the heap, so only memory caps nesting.
    pub max_call_depth: Option<usize>,
    /// Most values the stack may hold; `None` means unbounded.
    pub max_stack_size: Option<usize>,
}

impl MachineConfig {
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    pub fn with_max_stack_size(mut self, size: usize) -> Self {
        self.max_stack_size = Some(size);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_unbounded() {
        let config = MachineConfig::default();
        assert_eq!(config.max_call_depth, None);
        assert_eq!(config.max_stack_size, None);

        let config = config.with_max_call_depth(8).with_max_stack_size(16);
        assert_eq!(config.max_call_depth, Some(8));
        assert_eq!(config.max_stack_size, Some(16));
    }
}
