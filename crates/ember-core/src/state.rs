//! The instance state machine and parent-binding vocabulary.

use std::fmt;

/// Lifecycle state of a live instance.
///
/// States only ever advance, in declaration order:
/// `Active → Removing → Removed → Disposing`. No transition skips or
/// reverses a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InstanceState {
    /// Alive and visible. Ages normally and may emit child generations.
    Active,
    /// Fading out. Still visible and animated, but emits nothing new.
    Removing,
    /// No longer rendered. The instance keeps its storage slot for exactly
    /// one more update pass so bound children can observe the transition.
    Removed,
    /// Terminal. Storage is returned to the pool in the pass that reaches
    /// this state.
    Disposing,
}

impl InstanceState {
    /// Whether this state produces a render record.
    pub fn may_render(self) -> bool {
        matches!(self, Self::Active | Self::Removing)
    }

    /// Whether an instance in this state may originate new children.
    ///
    /// A dying instance cannot spawn: only `Active` emits.
    pub fn may_emit(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Whether this is the terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Disposing)
    }
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Removing => "removing",
            Self::Removed => "removed",
            Self::Disposing => "disposing",
        };
        write!(f, "{s}")
    }
}

/// How a child instance's transform follows the parent that spawned it.
///
/// The variant decides, at spawn time, what basis the child's local
/// transform is composed onto, and whether the parent's death propagates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BindType {
    /// Position is taken from the parent at spawn, orientation from the
    /// world axes. Fully independent afterwards; parent death has no
    /// effect on the child.
    #[default]
    NotBind,
    /// The parent's full transform is copied exactly once at spawn, then
    /// the child evolves independently. Parent death has no effect.
    WhenCreating,
    /// The child's world transform is recomputed from the parent's current
    /// transform every update. When the parent reaches `Removed`, bound
    /// children transition to `Removing` — they no longer have a valid
    /// transform source.
    Always,
    /// Like `NotBind`, but orientation is taken from the playback root
    /// transform rather than the world axes.
    NotBindRoot,
}

impl BindType {
    /// Whether a live reference to the parent is held after spawn.
    ///
    /// Only `Always` keeps following the parent; every other bind copies
    /// what it needs at spawn time.
    pub fn tracks_parent(self) -> bool {
        matches!(self, Self::Always)
    }
}

impl fmt::Display for BindType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotBind => "not-bind",
            Self::WhenCreating => "when-creating",
            Self::Always => "always",
            Self::NotBindRoot => "not-bind-root",
        };
        write!(f, "{s}")
    }
}
