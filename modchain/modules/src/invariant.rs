use core::fmt::{Debug, Formatter};

use tracing::{debug, error};

use crate::context::Context;
use crate::error::Error;

/// A check over module state that must hold after every block.
pub type Invariant = Box<dyn Fn(&Context) -> Result<(), Error> + Send + Sync>;

/// Collects the invariants registered by modules.
pub trait InvariantRegistry {
    fn register_route(&mut self, module_name: &str, route: &str, invariant: Invariant);
}

pub struct InvariantRoute {
    pub module_name: String,
    pub route: String,
    pub invariant: Invariant,
}

impl InvariantRoute {
    /// Fully qualified route, `<module>/<route>`.
    pub fn full_route(&self) -> String {
        format!("{}/{}", self.module_name, self.route)
    }
}

impl Debug for InvariantRoute {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InvariantRoute")
            .field("module_name", &self.module_name)
            .field("route", &self.route)
            .finish()
    }
}

/// Invariants in registration order.
#[derive(Debug, Default)]
pub struct Invariants {
    routes: Vec<InvariantRoute>,
}

impl Invariants {
    pub fn routes(&self) -> &[InvariantRoute] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Runs every invariant in registration order and stops at the first broken one.
    pub fn assert_invariants(&self, ctx: &Context) -> Result<(), Error> {
        for route in &self.routes {
            let full_route = route.full_route();
            debug!("Checking invariant {}", full_route);
            (route.invariant)(ctx).map_err(|e| {
                error!("Invariant {} broken: {}", full_route, e);
                Error::InvariantBroken {
                    route: full_route.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
        Ok(())
    }
}

impl InvariantRegistry for Invariants {
    fn register_route(&mut self, module_name: &str, route: &str, invariant: Invariant) {
        self.routes.push(InvariantRoute {
            module_name: module_name.to_owned(),
            route: route.to_owned(),
            invariant,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::new_header;

    #[test]
    fn first_broken_invariant_is_reported() {
        let mut invariants = Invariants::default();
        invariants.register_route("bank", "supply", Box::new(|_: &Context| Ok(())));
        invariants.register_route(
            "staking",
            "power",
            Box::new(|_: &Context| {
                Err(Error::Custom {
                    reason: "negative power".to_owned(),
                })
            }),
        );
        invariants.register_route(
            "gov",
            "tally",
            Box::new(|_: &Context| {
                Err(Error::Custom {
                    reason: "unreachable".to_owned(),
                })
            }),
        );

        let ctx = Context::new(new_header("modchain-test", 1).unwrap());
        assert_eq!(invariants.len(), 3);
        assert_eq!(
            invariants.assert_invariants(&ctx),
            Err(Error::InvariantBroken {
                route: "staking/power".to_owned(),
                reason: "custom error: `negative power`".to_owned(),
            })
        );
    }
}
