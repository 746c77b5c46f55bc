//! How to register a playout policy
//!
//! 1) Implement `PlayoutPolicy` for your type in its module.
//! 2) Add a new `PolicyFactory` entry to the static list with stable `name` and `version`.
//! 3) Keep ordering stable; avoid side effects in constructors.
//! 4) Policies draw randomness only from the RNG passed to `choose`.

use crate::ai::{HeuristicPolicy, PlayoutPolicy, RandomPolicy};

/// Factory definition for constructing playout policies.
pub struct PolicyFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn() -> Box<dyn PlayoutPolicy>,
}

static POLICY_FACTORIES: &[PolicyFactory] = &[
    PolicyFactory {
        name: RandomPolicy::NAME,
        version: RandomPolicy::VERSION,
        make: make_random,
    },
    PolicyFactory {
        name: HeuristicPolicy::NAME,
        version: HeuristicPolicy::VERSION,
        make: make_heuristic,
    },
];

/// Returns the statically registered policy factories.
pub fn registered_policies() -> &'static [PolicyFactory] {
    POLICY_FACTORIES
}

/// Finds a registered policy factory by its name.
pub fn by_name(name: &str) -> Option<&'static PolicyFactory> {
    registered_policies().iter().find(|factory| factory.name == name)
}

/// Construct the policy registered under `name`.
pub fn create_policy(name: &str) -> Option<Box<dyn PlayoutPolicy>> {
    by_name(name).map(|factory| (factory.make)())
}

fn make_random() -> Box<dyn PlayoutPolicy> {
    Box::new(RandomPolicy::new())
}

fn make_heuristic() -> Box<dyn PlayoutPolicy> {
    Box::new(HeuristicPolicy::new())
}
