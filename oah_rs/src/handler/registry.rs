//! Registration pass: one depth-first walk building the lookup tables.

use std::collections::{BTreeSet, HashMap};

use crate::element::{AtomId, ElementNames, ElementRef, GroupId};
use crate::error::{OahError, Result};

use super::Handler;

/// Running maxima used to align help columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Widths {
    pub short_name: usize,
    pub long_name: usize,
    pub subgroup_header: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    elements: HashMap<String, ElementRef>,
    single_character_names: BTreeSet<char>,
    widths: Widths,
}

impl Registry {
    pub(crate) fn build(handler: &Handler) -> Result<Self> {
        let mut registry = Registry::default();

        if handler.info.names.names().next().is_some() {
            registry.insert(handler, &handler.info.names, ElementRef::Handler)?;
        }

        for (group_index, group) in handler.groups.iter().enumerate() {
            registry.insert(handler, &group.names, ElementRef::Group(GroupId(group_index)))?;

            for subgroup_id in &group.subgroups {
                let subgroup = &handler.subgroups[subgroup_id.0];
                registry.insert(handler, &subgroup.names, ElementRef::SubGroup(*subgroup_id))?;
                registry.widths.subgroup_header = registry
                    .widths
                    .subgroup_header
                    .max(subgroup.header.chars().count());

                for atom_id in &subgroup.atoms {
                    registry.insert_atom(handler, *atom_id)?;
                }
            }
        }

        Ok(registry)
    }

    fn insert_atom(&mut self, handler: &Handler, id: AtomId) -> Result<()> {
        let names = &handler.atoms[id.0].names;
        self.insert(handler, names, ElementRef::Atom(id))?;

        let mut chars = names.short.chars();
        if let (Some(single), None) = (chars.next(), chars.next()) {
            self.single_character_names.insert(single);
        }

        self.widths.short_name = self.widths.short_name.max(names.short.chars().count());
        self.widths.long_name = self.widths.long_name.max(names.long.chars().count());
        Ok(())
    }

    fn insert(&mut self, handler: &Handler, names: &ElementNames, element: ElementRef) -> Result<()> {
        names.validate()?;
        for name in names.names() {
            if let Some(existing) = self.elements.get(name) {
                return Err(OahError::DuplicateName {
                    name: name.to_string(),
                    existing: handler.describe_element(*existing),
                });
            }
            self.elements.insert(name.to_string(), element);
        }
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<ElementRef> {
        self.elements.get(name).copied()
    }

    /// Every character of `name`, if each one is a registered
    /// single-character short name.
    pub fn cluster(&self, name: &str) -> Option<Vec<char>> {
        let chars: Vec<char> = name.chars().collect();
        let matched = chars
            .iter()
            .filter(|c| self.single_character_names.contains(*c))
            .count();
        (chars.len() > 1 && matched == chars.len()).then_some(chars)
    }

    pub fn single_character_names(&self) -> &BTreeSet<char> {
        &self.single_character_names
    }

    pub fn widths(&self) -> Widths {
        self.widths
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.elements.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::AtomDef;
    use crate::group::ContainerDef;
    use crate::handler::HandlerInfo;

    fn handler_with(atoms: &[(&str, &str)]) -> Handler {
        let mut handler = Handler::new(HandlerInfo::new("prog", "test"));
        let group = handler
            .add_group(ContainerDef::new("G", "g", "group", ""))
            .unwrap();
        let sub = handler
            .add_subgroup(group, ContainerDef::new("Sub header", "sg", "subgroup", ""))
            .unwrap();
        for (short, long) in atoms {
            handler
                .add_atom(sub, AtomDef::boolean(short, long, ""))
                .unwrap();
        }
        handler
    }

    #[test]
    fn every_name_is_indexed() {
        let handler = handler_with(&[("v", "verbose"), ("", "quiet")]);
        let registry = Registry::build(&handler).unwrap();
        assert_eq!(registry.lookup("prog"), Some(ElementRef::Handler));
        assert_eq!(registry.lookup("g"), Some(ElementRef::Group(GroupId(0))));
        assert!(matches!(registry.lookup("subgroup"), Some(ElementRef::SubGroup(_))));
        assert!(matches!(registry.lookup("v"), Some(ElementRef::Atom(_))));
        assert_eq!(registry.lookup("v"), registry.lookup("verbose"));
        assert!(registry.lookup("nope").is_none());
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn duplicate_names_are_fatal() {
        let handler = handler_with(&[("v", "verbose"), ("x", "v")]);
        match Registry::build(&handler) {
            Err(OahError::DuplicateName { name, existing }) => {
                assert_eq!(name, "v");
                assert!(existing.contains("-v, -verbose"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn element_names_clash_across_kinds() {
        let handler = handler_with(&[("g", "global")]);
        assert!(matches!(
            Registry::build(&handler),
            Err(OahError::DuplicateName { .. })
        ));
    }

    #[test]
    fn single_characters_and_clusters() {
        let handler = handler_with(&[("v", "verbose"), ("a", "all"), ("c", "count"), ("dd", "")]);
        let registry = Registry::build(&handler).unwrap();
        assert_eq!(
            registry.single_character_names().iter().collect::<String>(),
            "acv"
        );
        assert_eq!(registry.cluster("vac"), Some(vec!['v', 'a', 'c']));
        assert_eq!(registry.cluster("vad"), None);
        assert_eq!(registry.cluster("v"), None);
    }

    #[test]
    fn widths_track_maxima() {
        let handler = handler_with(&[("v", "verbose"), ("abc", "al")]);
        let widths = Registry::build(&handler).unwrap().widths();
        assert_eq!(widths.short_name, 3);
        assert_eq!(widths.long_name, 7);
        assert_eq!(widths.subgroup_header, "Sub header".len());
    }
}
