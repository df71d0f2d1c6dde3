//! Groups and subgroups: ordered containers shaping help output and lookup.

use crate::element::{AtomId, ElementNames, GroupId, SubGroupId, Visibility};
use crate::handler::Handler;

/// Post-parse check of a group's option values, run on help-free runs only.
pub type ConsistencyCheck = fn(&Handler) -> std::result::Result<(), String>;

#[derive(Debug, Clone)]
pub struct SubGroup {
    pub names: ElementNames,
    pub header: String,
    pub visibility: Visibility,
    pub group: GroupId,
    /// Insertion order is help order.
    pub atoms: Vec<AtomId>,
    pub chosen_atoms: usize,
}

#[derive(Debug, Clone)]
pub struct Group {
    pub names: ElementNames,
    pub header: String,
    pub visibility: Visibility,
    pub subgroups: Vec<SubGroupId>,
    pub chosen_atoms: usize,
    pub consistency_check: Option<ConsistencyCheck>,
}

/// Definition of a group or subgroup before it is added to a handler.
#[derive(Debug, Clone)]
pub struct ContainerDef {
    pub names: ElementNames,
    pub header: String,
    pub visibility: Visibility,
    pub consistency_check: Option<ConsistencyCheck>,
}

impl ContainerDef {
    pub fn new(header: &str, short: &str, long: &str, description: &str) -> Self {
        Self {
            names: ElementNames::new(short, long, description),
            header: header.to_string(),
            visibility: Visibility::Whole,
            consistency_check: None,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Only meaningful for groups.
    pub fn with_consistency_check(mut self, check: ConsistencyCheck) -> Self {
        self.consistency_check = Some(check);
        self
    }
}

impl Group {
    pub(crate) fn from_def(def: ContainerDef) -> Self {
        Self {
            names: def.names,
            header: def.header,
            visibility: def.visibility,
            subgroups: Vec::new(),
            chosen_atoms: 0,
            consistency_check: def.consistency_check,
        }
    }
}

impl SubGroup {
    pub(crate) fn from_def(def: ContainerDef, group: GroupId) -> Self {
        Self {
            names: def.names,
            header: def.header,
            visibility: def.visibility,
            group,
            atoms: Vec::new(),
            chosen_atoms: 0,
        }
    }
}
