//! Identity types for teams, memberships and projects.
//!
//! Every identifier is assigned by the remote service. They are plain
//! integers on the wire and are kept as distinct newtypes here so a member
//! id can never be passed where a team id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! remote_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw identifier.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Get the raw identifier.
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

remote_id!(
    /// Identifier of a team.
    TeamId
);

remote_id!(
    /// Identifier of an accepted team member.
    ///
    /// The same person has a different `MemberId` in every team they belong to.
    MemberId
);

remote_id!(
    /// Identifier of a pending team invitation.
    InvitationId
);

remote_id!(
    /// Identifier of a project.
    ProjectId
);
