//! A module that records every call the manager makes on it.

use std::sync::{Arc, Mutex};

use clap::Command;
use prost_types::Any;
use serde_json::{json, Value};
use tendermint::abci::{Event, EventAttributeIndexExt};

use crate::codec::TypeRegistry;
use crate::context::{AppModule, AppModuleBasic, AppModuleGenesis, Context};
use crate::error::Error;
use crate::invariant::InvariantRegistry;
use crate::router::{Handler, Querier};
use crate::types::{RequestBeginBlock, RequestEndBlock, ValidatorUpdate};

/// Calls shared by a set of mock modules, as `<module>:<hook>`.
#[derive(Clone, Debug, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn record(&self, module: &str, hook: &str) {
        self.0.lock().unwrap().push(format!("{module}:{hook}"));
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// Calls to `hook`, as module names.
    pub fn calls_to(&self, hook: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| {
                call.split_once(':')
                    .filter(|(_, h)| *h == hook)
                    .map(|(m, _)| m.to_owned())
            })
            .collect()
    }
}

pub struct MockModule {
    name: String,
    log: CallLog,
    genesis: Value,
    invalid_genesis: Option<String>,
    failing_hook: Option<&'static str>,
    updates: Vec<ValidatorUpdate>,
    route: Option<String>,
    commands: bool,
}

impl MockModule {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_owned(),
            log: log.clone(),
            genesis: json!({ "module": name }),
            invalid_genesis: None,
            failing_hook: None,
            updates: vec![],
            route: None,
            commands: false,
        }
    }

    /// Makes `validate_genesis` fail with `reason`.
    pub fn with_invalid_genesis(mut self, reason: &str) -> Self {
        self.invalid_genesis = Some(reason.to_owned());
        self
    }

    /// Makes the hook called `hook` fail.
    pub fn failing(mut self, hook: &'static str) -> Self {
        self.failing_hook = Some(hook);
        self
    }

    /// Validator updates returned by `init_genesis` and `end_block`.
    pub fn with_updates(mut self, updates: Vec<ValidatorUpdate>) -> Self {
        self.updates = updates;
        self
    }

    /// Registers a handler, a querier and a message type under `route`.
    pub fn with_route(mut self, route: &str) -> Self {
        self.route = Some(route.to_owned());
        self
    }

    pub fn with_commands(mut self) -> Self {
        self.commands = true;
        self
    }

    fn call(&self, hook: &str) -> Result<(), Error> {
        self.log.record(&self.name, hook);
        if self.failing_hook == Some(hook) {
            return Err(Error::Custom {
                reason: format!("{hook} failed"),
            });
        }
        Ok(())
    }
}

pub fn update(pub_key: &str, power: u64) -> ValidatorUpdate {
    ValidatorUpdate {
        pub_key: pub_key.to_owned(),
        power,
    }
}

impl AppModuleBasic for MockModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn register_types(&self, registry: &mut TypeRegistry) -> Result<(), Error> {
        self.call("register_types")?;
        if let Some(route) = &self.route {
            registry.register(format!("/mock.{route}.Msg"), route.as_str())?;
        }
        Ok(())
    }

    fn default_genesis(&self) -> Value {
        self.log.record(&self.name, "default_genesis");
        self.genesis.clone()
    }

    fn validate_genesis(&self, _genesis: &Value) -> Result<(), Error> {
        self.call("validate_genesis")?;
        match &self.invalid_genesis {
            Some(reason) => Err(Error::Custom {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn tx_command(&self) -> Option<Command> {
        self.log.record(&self.name, "tx_command");
        self.commands.then(|| Command::new(self.name.clone()))
    }

    fn query_command(&self) -> Option<Command> {
        self.log.record(&self.name, "query_command");
        self.commands.then(|| Command::new(self.name.clone()))
    }
}

impl AppModuleGenesis for MockModule {
    fn init_genesis(
        &mut self,
        _ctx: &Context,
        genesis: &Value,
    ) -> Result<Vec<ValidatorUpdate>, Error> {
        self.call("init_genesis")?;
        self.genesis = genesis.clone();
        Ok(self.updates.clone())
    }

    fn export_genesis(&self, _ctx: &Context) -> Result<Value, Error> {
        self.call("export_genesis")?;
        Ok(self.genesis.clone())
    }
}

impl AppModule for MockModule {
    fn register_invariants(&self, registry: &mut dyn InvariantRegistry) {
        self.log.record(&self.name, "register_invariants");
        registry.register_route(&self.name, "always", Box::new(|_: &Context| Ok(())));
    }

    fn route(&self) -> Option<&str> {
        self.log.record(&self.name, "route");
        self.route.as_deref()
    }

    fn new_handler(&self) -> Option<Handler> {
        let name = self.name.clone();
        self.route.as_ref().map(|_| -> Handler {
            Arc::new(move |_ctx: &Context, msg: &Any| {
                Ok(vec![Event::new(
                    "message",
                    [
                        ("module", name.clone()).index(),
                        ("type_url", msg.type_url.clone()).index(),
                    ],
                )])
            })
        })
    }

    fn querier_route(&self) -> Option<&str> {
        self.log.record(&self.name, "querier_route");
        self.route.as_deref()
    }

    fn new_querier_handler(&self) -> Option<Querier> {
        let name = self.name.clone();
        self.route.as_ref().map(|_| -> Querier {
            Arc::new(move |path: &[String], _data: &[u8]| {
                Ok(format!("{name}:{}", path.join("/")).into_bytes())
            })
        })
    }

    fn begin_block(
        &mut self,
        _ctx: &Context,
        _request: &RequestBeginBlock,
    ) -> Result<Vec<Event>, Error> {
        self.call("begin_block")?;
        Ok(vec![Event::new(
            "begin_block",
            [("module", self.name.clone()).index()],
        )])
    }

    fn end_block(
        &mut self,
        _ctx: &Context,
        _request: &RequestEndBlock,
    ) -> Result<Vec<ValidatorUpdate>, Error> {
        self.call("end_block")?;
        Ok(self.updates.clone())
    }
}
