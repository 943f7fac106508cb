//! Consultation group domain - group/member entities and summary aggregation

pub mod entities;
pub mod summary;

pub use entities::{
    ConsultationGroup, GroupId, GroupMember, GroupStatus, MemberId, NewGroup, NewMember,
};
pub use summary::{GroupSummary, MemberDetail, summarize};
