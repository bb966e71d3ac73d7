//! Public types for the Althing API.

mod debate;
mod party;
mod position;
mod topic;

pub use debate::{DebateEvent, DebateMessage, MAX_TRANSCRIPT_LEN, Side};
pub use party::{Confidence, Party, PartyPosition};
pub use position::SliderPosition;
pub use topic::PolicyTopic;
