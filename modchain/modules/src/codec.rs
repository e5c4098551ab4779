use std::collections::BTreeMap;

use crate::manager::Error as ManagerError;

/// Message types known to the application, mapped to the route of the module that handles them.
///
/// Modules fill the registry from [`AppModuleBasic::register_types`](crate::context::AppModuleBasic::register_types),
/// the application then uses it to find the handler of an incoming message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeRegistry {
    types: BTreeMap<String, String>,
}

impl TypeRegistry {
    /// Registers `type_url` as handled by `route`. A type URL can only be registered once.
    pub fn register(
        &mut self,
        type_url: impl Into<String>,
        route: impl Into<String>,
    ) -> Result<(), ManagerError> {
        let type_url = type_url.into();
        if let Some(existing) = self.types.get(&type_url) {
            return Err(ManagerError::DuplicateType {
                type_url,
                route: existing.clone(),
            });
        }
        self.types.insert(type_url, route.into());
        Ok(())
    }

    pub fn route_of(&self, type_url: &str) -> Option<&str> {
        self.types.get(type_url).map(String::as_str)
    }

    pub fn type_urls(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
