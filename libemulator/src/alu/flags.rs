use libisa::condition::Condition;

/// Comparison results, set by `cmp`/`icmp` and consumed by `jmp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags {
    pub equal: bool,
    pub less: bool,
}

impl Flags {
    pub fn holds(&self, condition: Condition) -> bool {
        condition.holds(self.equal, self.less)
    }
}
