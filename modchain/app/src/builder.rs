use std::fmt::Debug;
use std::sync::{Arc, RwLock};

use clap::Command;
use modchain_modules::codec::TypeRegistry;
use modchain_modules::context::{AppModule, Context};
use modchain_modules::error::Error;
use modchain_modules::invariant::Invariants;
use modchain_modules::manager::{Manager, ManagerBuilder, Phase};
use modchain_modules::router::{QueryRouter, Router};
use modchain_store::context::{ProvableStore, Store};
use modchain_store::impls::{RevertibleStore, SharedStore};
use modchain_store::types::{Identifier, MainStore};
use modchain_store::utils::{SharedRw, SharedRwExt};
use modchain_store::Error as StoreError;
use prost_types::Any;
use tendermint::abci::Event;
use tendermint::block::Header;
use tracing::{debug, error};

/// The store every module keeps its state in, one per module prefix.
pub type ModuleStore<S> = RevertibleStore<S>;

pub struct Builder<S> {
    store: MainStore<S>,
    module_stores: Vec<(Identifier, SharedStore<ModuleStore<S>>)>,
    manager: ManagerBuilder,
}

impl<S: Default + ProvableStore + 'static> Builder<S> {
    /// Constructor.
    pub fn new(store: S) -> Self {
        Self {
            store: SharedStore::new(RevertibleStore::new(store)),
            module_stores: vec![],
            manager: ManagerBuilder::default(),
        }
    }

    /// Returns a share of the module store under `prefix`, creating the store on first use.
    pub fn module_store(&mut self, prefix: &Identifier) -> SharedStore<ModuleStore<S>> {
        if let Some((_, store)) = self.module_stores.iter().find(|(id, _)| id == prefix) {
            return store.share();
        }
        let store = SharedStore::new(ModuleStore::new(S::default()));
        self.module_stores.push((prefix.clone(), store.share()));
        store
    }

    /// Adds a new module. Fails if its name is empty or already taken.
    pub fn add_module(mut self, module: impl AppModule + 'static) -> Result<Self, Error> {
        self.manager = self.manager.add_module(Box::new(module))?;
        Ok(self)
    }

    pub fn set_order(&mut self, phase: Phase, names: Vec<String>) -> Result<(), Error> {
        self.manager.set_order(phase, names)?;
        Ok(())
    }

    /// Freezes the module orders and wires up message types, routes and invariants.
    pub fn build(self) -> Result<App<S>, Error> {
        let manager = self.manager.build();

        let mut types = TypeRegistry::default();
        manager.register_types(&mut types)?;

        let mut router = Router::default();
        let mut query_router = QueryRouter::default();
        manager.register_routes(&mut router, &mut query_router)?;

        let mut invariants = Invariants::default();
        manager.register_invariants(&mut invariants);

        debug!(
            "Built app with modules {:?}, {} message types and {} invariants",
            manager.modules(),
            types.len(),
            invariants.len()
        );

        Ok(App {
            store: self.store,
            module_stores: Arc::new(self.module_stores),
            manager: Arc::new(RwLock::new(manager)),
            routes: Arc::new(Routes {
                types,
                router,
                query_router,
            }),
            invariants: Arc::new(invariants),
            header: Arc::new(RwLock::new(None)),
        })
    }
}

pub(crate) struct Routes {
    pub(crate) types: TypeRegistry,
    pub(crate) router: Router,
    pub(crate) query_router: QueryRouter,
}

/// The modchain application.
///
/// Can be safely cloned and sent across threads, but not shared.
#[derive(Clone)]
pub struct App<S> {
    pub store: MainStore<S>,
    pub(crate) module_stores: Arc<Vec<(Identifier, SharedStore<ModuleStore<S>>)>>,
    pub(crate) manager: SharedRw<Manager>,
    pub(crate) routes: Arc<Routes>,
    pub(crate) invariants: Arc<Invariants>,
    /// header of the block being executed, or of the last one
    pub(crate) header: SharedRw<Option<Header>>,
}

pub(crate) fn backend_error(e: impl Debug) -> Error {
    StoreError::Backend {
        reason: format!("{e:?}"),
    }
    .into()
}

impl<S: Default + ProvableStore + 'static> App<S> {
    /// Module names in registration order.
    pub fn modules(&self) -> Vec<String> {
        self.manager.read_access().modules().to_vec()
    }

    pub fn order(&self, phase: Phase) -> Vec<String> {
        self.manager.read_access().order(phase).to_vec()
    }

    pub fn add_tx_commands(&self, root: Command) -> Command {
        self.manager.read_access().add_tx_commands(root)
    }

    pub fn add_query_commands(&self, root: Command) -> Command {
        self.manager.read_access().add_query_commands(root)
    }

    /// Context of the current block.
    pub(crate) fn context(&self) -> Result<Context, Error> {
        self.header
            .read_access()
            .clone()
            .map(Context::new)
            .ok_or_else(|| Error::Custom {
                reason: "chain is not initialized".to_owned(),
            })
    }

    /// Keeps the module store writes made so far, so that a later failed step cannot roll them
    /// back.
    fn apply_module_stores(&self) -> Result<(), Error> {
        for (_, store) in self.module_stores.iter() {
            store.write_access().apply().map_err(backend_error)?;
        }
        Ok(())
    }

    /// Rolls back the module store writes made since they were last applied.
    fn reset_module_stores(&self) {
        for (_, store) in self.module_stores.iter() {
            store.write_access().reset();
        }
    }

    /// Applies the module store writes of a step that succeeded. The writes of a failed step are
    /// rolled back, so none of them reach the next commit.
    pub(crate) fn settle<T>(&self, step: &str, result: Result<T, Error>) -> Result<T, Error> {
        match result {
            Ok(value) => {
                self.apply_module_stores()?;
                Ok(value)
            }
            Err(e) => {
                error!("{} failed with error: {:?}", step, e);
                self.reset_module_stores();
                Err(e)
            }
        }
    }

    /// Routes the message to the handler registered for its type. Module store writes made by a
    /// failed handler are rolled back.
    pub fn deliver_msg(&self, message: Any) -> Result<Vec<Event>, Error> {
        let ctx = self.context()?;
        let handler = self
            .routes
            .types
            .route_of(&message.type_url)
            .and_then(|route| self.routes.router.route(route))
            .ok_or(Error::NotHandled)?;

        let result = handler(&ctx, &message);
        self.settle(&format!("deliver message {}", message.type_url), result)
    }
}
