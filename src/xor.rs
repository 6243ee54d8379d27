//! Bookkeeping for mutually exclusive argument groups.

use std::slice;

use crate::ArgId;

/// Arguments of which at most one may be given in a single parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorGroup {
    members: Vec<ArgId>,
    matched: Option<ArgId>,
}

impl XorGroup {
    pub fn members(&self) -> &[ArgId] {
        &self.members
    }

    pub fn contains(&self, id: ArgId) -> bool {
        self.members.contains(&id)
    }

    /// The member that matched during the current (or last) parse.
    pub fn matched(&self) -> Option<ArgId> {
        self.matched
    }
}

#[derive(Debug, Default, Clone)]
pub struct XorHandler {
    groups: Vec<XorGroup>,
}

impl XorHandler {
    pub fn new() -> XorHandler {
        XorHandler::default()
    }

    /// Groups `ids` together and returns the group index.
    ///
    /// If some of the ids already share a group, that group is extended with
    /// the rest. If they are spread over two groups, the first id found in a
    /// second group is returned as the error and nothing changes.
    pub fn add_xor(&mut self, ids: &[ArgId]) -> Result<usize, ArgId> {
        let mut target = None;
        for &id in ids {
            if let Some(group) = self.contains(id) {
                match target {
                    Some(it) if it != group => return Err(id),
                    _ => target = Some(group),
                }
            }
        }

        let group = match target {
            Some(it) => it,
            None => {
                self.groups.push(XorGroup { members: Vec::new(), matched: None });
                self.groups.len() - 1
            }
        };
        let members = &mut self.groups[group].members;
        for &id in ids {
            if !members.contains(&id) {
                members.push(id);
            }
        }
        Ok(group)
    }

    /// Index of the group `id` belongs to.
    pub fn contains(&self, id: ArgId) -> Option<usize> {
        self.groups.iter().position(|it| it.contains(id))
    }

    /// Records that `id` matched. Fails with the other member if its group
    /// already had a different member matched in this parse.
    pub fn check(&mut self, id: ArgId) -> Result<(), ArgId> {
        let group = match self.groups.iter_mut().find(|it| it.contains(id)) {
            Some(it) => it,
            None => return Ok(()),
        };
        match group.matched {
            Some(other) if other != id => Err(other),
            _ => {
                group.matched = Some(id);
                Ok(())
            }
        }
    }

    /// Forgets matches from a previous parse.
    pub fn reset(&mut self) {
        for group in &mut self.groups {
            group.matched = None;
        }
    }

    pub fn groups(&self) -> slice::Iter<'_, XorGroup> {
        self.groups.iter()
    }

    pub fn get(&self, group: usize) -> Option<&XorGroup> {
        self.groups.get(group)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
