use modchain_modules::context::Context;
use modchain_modules::error::Error;
use modchain_modules::types::{GenesisState, RequestBeginBlock, RequestEndBlock, ValidatorUpdate};
use modchain_store::context::{ProvableStore, Store};
use modchain_store::utils::SharedRwExt;
use serde_derive::Serialize;
use tendermint::abci::Event;
use tendermint::block::Header;
use tracing::{debug, info};

use crate::builder::{backend_error, App};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InitChainResponse {
    pub validators: Vec<ValidatorUpdate>,
    pub app_hash: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AppInfo {
    pub last_block_height: u64,
    pub last_block_app_hash: Vec<u8>,
}

impl<S: Default + ProvableStore + 'static> App<S> {
    pub fn info(&self) -> AppInfo {
        let state = self.store.read_access();
        AppInfo {
            last_block_height: state.current_height(),
            last_block_app_hash: state.root_hash(),
        }
    }

    /// Validates and imports the genesis state. `header` is the context the modules are
    /// initialized in.
    pub fn init_chain(&self, header: Header, app_state: &[u8]) -> Result<InitChainResponse, Error> {
        debug!("Got init chain request for chain {}", header.chain_id);
        let genesis: GenesisState =
            serde_json::from_slice(app_state).map_err(|e| Error::Custom {
                reason: format!("genesis state isn't valid JSON: {e}"),
            })?;

        let ctx = Context::new(header.clone());
        let result = {
            let mut manager = self.manager.write_access();
            manager
                .validate_genesis(&genesis)
                .and_then(|()| manager.init_genesis(&ctx, &genesis))
        };
        let validators = self.settle("init chain", result)?;
        *self.header.write_access() = Some(header);

        info!("App initialized");

        Ok(InitChainResponse {
            validators,
            app_hash: self.store.read_access().root_hash(),
        })
    }

    pub fn begin_block(&self, header: Header) -> Result<Vec<Event>, Error> {
        debug!("Got begin block request at height {}", header.height);
        *self.header.write_access() = Some(header.clone());
        let ctx = self.context()?;
        let result = self
            .manager
            .write_access()
            .begin_block(&ctx, &RequestBeginBlock { header });
        self.settle("begin block", result)
    }

    pub fn end_block(&self) -> Result<Vec<ValidatorUpdate>, Error> {
        let ctx = self.context()?;
        debug!("Got end block request at height {}", ctx.block_height());
        let result = self.manager.write_access().end_block(
            &ctx,
            &RequestEndBlock {
                height: ctx.block_height(),
            },
        );
        self.settle("end block", result)
    }

    /// Commits every module store, records their root hashes in the main store and commits
    /// it. Returns the app hash.
    pub fn commit(&self) -> Result<Vec<u8>, Error> {
        let mut state = self.store.write_access();

        for (id, store) in self.module_stores.iter() {
            let mut store = store.write_access();
            store.commit().map_err(backend_error)?;
            state
                .set(id.clone().into(), store.root_hash())
                .map_err(backend_error)?;
        }

        let data = state.commit().map_err(backend_error)?;

        info!(
            "Committed height {} with hash({})",
            state.current_height(),
            hex::encode_upper(&data)
        );
        Ok(data)
    }

    /// Exports the state of every module as of the current block.
    pub fn export_genesis(&self) -> Result<GenesisState, Error> {
        let ctx = self.context()?;
        self.manager.read_access().export_genesis(&ctx)
    }

    pub fn query(&self, path: &str, data: &[u8]) -> Result<Vec<u8>, Error> {
        debug!("Got query request for path {}", path);
        self.routes.query_router.query(path, data)
    }

    pub fn assert_invariants(&self) -> Result<(), Error> {
        let ctx = self.context()?;
        self.invariants.assert_invariants(&ctx)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use modchain_modules::codec::TypeRegistry;
    use modchain_modules::context::{
        prefix, AppModule, AppModuleBasic, AppModuleGenesis, Identifiable,
    };
    use modchain_modules::helper::new_header;
    use modchain_modules::router::Handler;
    use modchain_modules::staking::Staking;
    use modchain_store::impls::{InMemoryStore, SharedStore};
    use modchain_store::types::{Height, Path};
    use prost_types::Any;
    use serde_json::json;

    use super::*;
    use crate::builder::{Builder, ModuleStore};

    const COUNTER_MSG: &str = "/modchain.counter.MsgSet";

    /// Stores the payload of every message under `count`, and rejects the payload `fail` after
    /// writing it.
    struct Counter {
        store: SharedStore<ModuleStore<InMemoryStore>>,
    }

    impl AppModuleBasic for Counter {
        fn name(&self) -> &str {
            "counter"
        }

        fn register_types(&self, registry: &mut TypeRegistry) -> Result<(), Error> {
            registry.register(COUNTER_MSG, "counter")?;
            Ok(())
        }
    }

    impl AppModuleGenesis for Counter {}

    impl AppModule for Counter {
        fn route(&self) -> Option<&str> {
            Some("counter")
        }

        fn new_handler(&self) -> Option<Handler> {
            let store = self.store.share();
            Some(Arc::new(move |_ctx: &Context, msg: &Any| {
                let mut store = store.share();
                store
                    .set(Path::from("count"), msg.value.clone())
                    .map_err(|e| Error::Custom {
                        reason: format!("{e:?}"),
                    })?;
                if msg.value == b"fail" {
                    return Err(Error::Custom {
                        reason: "rejected".to_owned(),
                    });
                }
                Ok(vec![])
            }))
        }
    }

    fn app() -> (App<InMemoryStore>, SharedStore<ModuleStore<InMemoryStore>>) {
        let mut builder = Builder::new(InMemoryStore::default());
        let staking = Staking::new(builder.module_store(&prefix::Staking.identifier()));
        let counter_store = builder.module_store(&"counter".into());
        let app = builder
            .add_module(staking)
            .unwrap()
            .add_module(Counter {
                store: counter_store.share(),
            })
            .unwrap()
            .build()
            .unwrap();
        (app, counter_store)
    }

    fn genesis(entries: u32, power: u64) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "staking": {
                "params": { "historical_entries": entries, "max_validators": 10 },
                "validators": [
                    { "operator_address": "val-a", "consensus_pubkey": "0a0a", "power": power }
                ]
            }
        }))
        .unwrap()
    }

    fn message(value: &[u8]) -> Any {
        Any {
            type_url: COUNTER_MSG.to_owned(),
            value: value.to_vec(),
        }
    }

    fn run_block(app: &App<InMemoryStore>, height: u64) -> Vec<u8> {
        app.begin_block(new_header("modchain-test", height).unwrap())
            .unwrap();
        app.end_block().unwrap();
        app.commit().unwrap()
    }

    #[test]
    fn blocks_track_historical_info() {
        let (app, _) = app();
        let response = app
            .init_chain(new_header("modchain-test", 1).unwrap(), &genesis(2, 10))
            .unwrap();
        assert_eq!(
            response.validators,
            vec![ValidatorUpdate {
                pub_key: "0a0a".to_owned(),
                power: 10
            }]
        );

        let mut hashes = vec![];
        for height in 1..=4 {
            hashes.push(run_block(&app, height));
            app.assert_invariants().unwrap();
        }

        assert_eq!(app.info().last_block_height, 4);
        assert_eq!(app.info().last_block_app_hash, hashes[3]);
        assert!(app.query("staking/historical-info/4", &[]).is_ok());
        assert!(app.query("staking/historical-info/2", &[]).is_ok());
        assert!(app.query("staking/historical-info/1", &[]).is_err());
        assert_eq!(app.query("bank/balances", &[]), Err(Error::NotHandled));

        let exported = app.export_genesis().unwrap();
        assert_eq!(
            exported.get("staking").map(|g| g["params"]["historical_entries"].clone()),
            Some(json!(2))
        );
        assert_eq!(exported.get("counter"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn failed_messages_are_rolled_back() {
        let (app, counter_store) = app();
        app.init_chain(new_header("modchain-test", 1).unwrap(), &genesis(2, 10))
            .unwrap();
        app.begin_block(new_header("modchain-test", 1).unwrap())
            .unwrap();

        let count = || counter_store.get(Height::Pending, &Path::from("count"));
        assert!(app.deliver_msg(message(b"fail")).is_err());
        assert_eq!(count(), None);
        assert!(app.query("staking/historical-info/1", &[]).is_ok());

        app.deliver_msg(message(b"5")).unwrap();
        assert_eq!(count(), Some(b"5".to_vec()));

        assert!(app.deliver_msg(message(b"fail")).is_err());
        assert_eq!(count(), Some(b"5".to_vec()));

        let unknown = Any {
            type_url: "/modchain.bank.MsgSend".to_owned(),
            value: vec![],
        };
        assert_eq!(app.deliver_msg(unknown), Err(Error::NotHandled));
    }

    #[test]
    fn invalid_genesis_is_rejected() {
        let (app, _) = app();
        let err = app
            .init_chain(new_header("modchain-test", 1).unwrap(), &genesis(2, 0))
            .unwrap_err();
        assert!(matches!(err, Error::Module { ref module, .. } if module == "staking"));

        assert!(app
            .init_chain(new_header("modchain-test", 1).unwrap(), b"not json")
            .is_err());
    }

    #[test]
    fn blocks_require_an_initialized_chain() {
        let (app, _) = app();
        assert!(app.deliver_msg(message(b"1")).is_err());
        assert!(app.end_block().is_err());
        assert_eq!(app.modules(), vec!["staking", "counter"]);
    }

    /// Writes a marker for every hook it runs, then fails in the hook named `fails_in`.
    struct Faulty {
        store: SharedStore<ModuleStore<InMemoryStore>>,
        fails_in: &'static str,
    }

    impl Faulty {
        fn run(&mut self, hook: &str) -> Result<(), Error> {
            self.store
                .set(Path::from(hook), vec![1])
                .map_err(|e| Error::Custom {
                    reason: format!("{e:?}"),
                })?;
            if hook == self.fails_in {
                return Err(Error::Custom {
                    reason: format!("{hook} rejected"),
                });
            }
            Ok(())
        }
    }

    impl AppModuleBasic for Faulty {
        fn name(&self) -> &str {
            "faulty"
        }
    }

    impl AppModuleGenesis for Faulty {
        fn init_genesis(
            &mut self,
            _ctx: &Context,
            _genesis: &serde_json::Value,
        ) -> Result<Vec<ValidatorUpdate>, Error> {
            self.run("init_genesis")?;
            Ok(vec![])
        }
    }

    impl AppModule for Faulty {
        fn begin_block(
            &mut self,
            _ctx: &Context,
            _request: &RequestBeginBlock,
        ) -> Result<Vec<Event>, Error> {
            self.run("begin_block")?;
            Ok(vec![])
        }

        fn end_block(
            &mut self,
            _ctx: &Context,
            _request: &RequestEndBlock,
        ) -> Result<Vec<ValidatorUpdate>, Error> {
            self.run("end_block")?;
            Ok(vec![])
        }
    }

    /// Staking runs before `faulty` in every phase.
    fn faulty_app(
        fails_in: &'static str,
    ) -> (
        App<InMemoryStore>,
        Staking<ModuleStore<InMemoryStore>>,
        SharedStore<ModuleStore<InMemoryStore>>,
    ) {
        let mut builder = Builder::new(InMemoryStore::default());
        let staking = Staking::new(builder.module_store(&prefix::Staking.identifier()));
        let faulty_store = builder.module_store(&"faulty".into());
        let app = builder
            .add_module(staking.clone())
            .unwrap()
            .add_module(Faulty {
                store: faulty_store.share(),
                fails_in,
            })
            .unwrap()
            .build()
            .unwrap();
        (app, staking, faulty_store)
    }

    fn faulty_genesis() -> Vec<u8> {
        serde_json::to_vec(&json!({
            "staking": {
                "params": { "historical_entries": 2, "max_validators": 10 },
                "validators": []
            },
            "faulty": {}
        }))
        .unwrap()
    }

    fn marker(store: &SharedStore<ModuleStore<InMemoryStore>>, hook: &str) -> Option<Vec<u8>> {
        store.get(Height::Pending, &Path::from(hook))
    }

    #[test]
    fn failed_begin_block_is_rolled_back() {
        let (app, staking, faulty_store) = faulty_app("begin_block");
        app.init_chain(new_header("modchain-test", 1).unwrap(), &faulty_genesis())
            .unwrap();

        let err = app
            .begin_block(new_header("modchain-test", 1).unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::Module { ref module, .. } if module == "faulty"));
        assert_eq!(staking.keeper().get_historical_info(1).unwrap(), None);
        assert_eq!(marker(&faulty_store, "begin_block"), None);
        assert_eq!(marker(&faulty_store, "init_genesis"), Some(vec![1]));

        app.commit().unwrap();
        assert!(staking.keeper().historical_heights().is_empty());
        assert!(staking.keeper().params().is_ok());
    }

    #[test]
    fn failed_end_block_keeps_only_earlier_steps() {
        let (app, staking, faulty_store) = faulty_app("end_block");
        app.init_chain(new_header("modchain-test", 1).unwrap(), &faulty_genesis())
            .unwrap();
        app.begin_block(new_header("modchain-test", 1).unwrap())
            .unwrap();

        assert!(app.end_block().is_err());
        assert_eq!(marker(&faulty_store, "end_block"), None);
        assert_eq!(marker(&faulty_store, "begin_block"), Some(vec![1]));
        assert_eq!(staking.keeper().historical_heights(), vec![1]);
    }

    #[test]
    fn failed_init_chain_is_rolled_back() {
        let (app, staking, faulty_store) = faulty_app("init_genesis");
        let err = app
            .init_chain(new_header("modchain-test", 1).unwrap(), &faulty_genesis())
            .unwrap_err();
        assert!(matches!(err, Error::Module { ref module, .. } if module == "faulty"));

        assert_eq!(marker(&faulty_store, "init_genesis"), None);
        assert!(staking.keeper().params().is_err());
        assert!(app.end_block().is_err());
    }
}
