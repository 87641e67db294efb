//! Connected players: at most one member of a group is audible at a time.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

pub type MemberId = usize;

/// A player that can be asked to stop by its group.
pub trait GroupMember {
    fn is_playing(&self) -> bool;
    fn yield_playback(&self);
}

/// Registry shared by every connected player on a page.
#[derive(Default)]
pub struct ConnectedGroup {
    next_id: Cell<MemberId>,
    members: RefCell<Vec<(MemberId, Weak<dyn GroupMember>)>>,
}

impl ConnectedGroup {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn join(&self, member: Weak<dyn GroupMember>) -> MemberId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.members.borrow_mut().push((id, member));
        id
    }

    pub fn leave(&self, id: MemberId) {
        self.members.borrow_mut().retain(|(member, _)| *member != id);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.members
            .borrow()
            .iter()
            .filter(|(_, member)| member.strong_count() > 0)
            .count()
    }

    /// Announce that `claimant` is about to play. Every other playing member
    /// is paused. Returns how many were paused.
    pub fn claim(&self, claimant: MemberId) -> usize {
        let others: Vec<(MemberId, Rc<dyn GroupMember>)> = {
            let mut members = self.members.borrow_mut();
            members.retain(|(_, member)| member.strong_count() > 0);
            members
                .iter()
                .filter(|(id, _)| *id != claimant)
                .filter_map(|(id, member)| member.upgrade().map(|m| (*id, m)))
                .collect()
        };

        let mut paused = 0;
        for (id, member) in others {
            if member.is_playing() {
                tracing::debug!(member = id, claimant, "pausing connected player");
                member.yield_playback();
                paused += 1;
            }
        }
        paused
    }
}

/// A controller's membership in a group. Dropping it leaves the group.
pub struct GroupLink {
    pub group: Rc<ConnectedGroup>,
    pub id: MemberId,
}

impl GroupLink {
    pub fn claim(&self) -> usize {
        self.group.claim(self.id)
    }
}

impl Drop for GroupLink {
    fn drop(&mut self) {
        self.group.leave(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stub {
        playing: Cell<bool>,
        yielded: Cell<usize>,
    }

    impl Stub {
        fn new(playing: bool) -> Rc<Self> {
            Rc::new(Self {
                playing: Cell::new(playing),
                yielded: Cell::new(0),
            })
        }
    }

    impl GroupMember for Stub {
        fn is_playing(&self) -> bool {
            self.playing.get()
        }

        fn yield_playback(&self) {
            self.playing.set(false);
            self.yielded.set(self.yielded.get() + 1);
        }
    }

    fn join(group: &ConnectedGroup, stub: &Rc<Stub>) -> MemberId {
        let weak: Weak<dyn GroupMember> = Rc::downgrade(stub) as Weak<dyn GroupMember>;
        group.join(weak)
    }

    #[test]
    fn claim_pauses_only_other_playing_members() {
        let group = ConnectedGroup::new();
        let a = Stub::new(true);
        let b = Stub::new(true);
        let c = Stub::new(false);
        let a_id = join(&group, &a);
        join(&group, &b);
        join(&group, &c);

        assert_eq!(group.claim(a_id), 1);
        assert!(a.is_playing());
        assert!(!b.is_playing());
        assert_eq!(c.yielded.get(), 0);
    }

    #[test]
    fn dropped_members_are_pruned() {
        let group = ConnectedGroup::new();
        let a = Stub::new(false);
        let a_id = join(&group, &a);
        {
            let b = Stub::new(true);
            join(&group, &b);
            assert_eq!(group.len(), 2);
        }
        assert_eq!(group.claim(a_id), 0);
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn leave_removes_member() {
        let group = ConnectedGroup::new();
        let a = Stub::new(true);
        let id = join(&group, &a);
        group.leave(id);
        assert_eq!(group.claim(usize::MAX), 0);
        assert!(a.is_playing());
    }

    #[test]
    fn dropping_a_link_leaves_the_group() {
        let group = ConnectedGroup::new();
        let a = Stub::new(true);
        let link = GroupLink {
            group: group.clone(),
            id: join(&group, &a),
        };
        assert_eq!(group.len(), 1);
        drop(link);
        assert_eq!(group.len(), 0);
        assert_eq!(group.claim(usize::MAX), 0);
        assert!(a.is_playing());
    }
}
