use std::collections::BTreeSet;

use derive_more::Display;

use super::error::Error;

/// A lifecycle phase whose module order can be configured.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    #[display(fmt = "init genesis")]
    InitGenesis,
    #[display(fmt = "export genesis")]
    ExportGenesis,
    #[display(fmt = "begin block")]
    BeginBlock,
    #[display(fmt = "end block")]
    EndBlock,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::InitGenesis,
        Phase::ExportGenesis,
        Phase::BeginBlock,
        Phase::EndBlock,
    ];
}

/// The order modules run in, per phase. Every list is a permutation of the registered names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleOrders {
    init_genesis: Vec<String>,
    export_genesis: Vec<String>,
    begin_blockers: Vec<String>,
    end_blockers: Vec<String>,
}

impl ModuleOrders {
    /// Every phase runs modules in the order of `names`.
    pub fn uniform(names: &[String]) -> Self {
        Self {
            init_genesis: names.to_vec(),
            export_genesis: names.to_vec(),
            begin_blockers: names.to_vec(),
            end_blockers: names.to_vec(),
        }
    }

    pub fn get(&self, phase: Phase) -> &[String] {
        match phase {
            Phase::InitGenesis => &self.init_genesis,
            Phase::ExportGenesis => &self.export_genesis,
            Phase::BeginBlock => &self.begin_blockers,
            Phase::EndBlock => &self.end_blockers,
        }
    }

    fn get_mut(&mut self, phase: Phase) -> &mut Vec<String> {
        match phase {
            Phase::InitGenesis => &mut self.init_genesis,
            Phase::ExportGenesis => &mut self.export_genesis,
            Phase::BeginBlock => &mut self.begin_blockers,
            Phase::EndBlock => &mut self.end_blockers,
        }
    }

    /// Replaces the order of `phase`. The caller checks `names` with [`check_permutation`].
    pub(crate) fn set(&mut self, phase: Phase, names: Vec<String>) {
        *self.get_mut(phase) = names;
    }

    /// Appends a newly registered module to the end of every phase.
    pub(crate) fn push(&mut self, name: &str) {
        for phase in Phase::ALL {
            self.get_mut(phase).push(name.to_owned());
        }
    }
}

/// Checks that `names` is exactly a permutation of `registered`.
pub(crate) fn check_permutation(
    phase: Phase,
    registered: &[String],
    names: &[String],
) -> Result<(), Error> {
    let known: BTreeSet<&str> = registered.iter().map(String::as_str).collect();
    let mut seen = BTreeSet::new();

    for name in names {
        if !known.contains(name.as_str()) {
            return Err(Error::UnknownModule {
                phase,
                name: name.clone(),
            });
        }
        if !seen.insert(name.as_str()) {
            return Err(Error::DuplicateInOrder {
                phase,
                name: name.clone(),
            });
        }
    }

    match registered.iter().find(|name| !seen.contains(name.as_str())) {
        Some(missing) => Err(Error::MissingFromOrder {
            phase,
            name: missing.clone(),
        }),
        None => Ok(()),
    }
}
