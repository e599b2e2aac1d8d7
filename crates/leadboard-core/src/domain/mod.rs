pub mod account;
pub mod badges;
pub mod column;
pub mod dynamic;
pub mod email;
pub mod ids;
pub mod interaction;
pub mod lead;
pub mod status;

pub use account::{Credentials, RegisteredUser};
pub use badges::{format_badges, parse_badges};
pub use column::ColumnKey;
pub use dynamic::{is_image_value, DynamicRecord, FieldValue};
pub use email::{is_valid_email, normalize_email};
pub use ids::{InteractionId, LeadId};
pub use interaction::{Interaction, InteractionDraft};
pub use lead::{parse_lead_score, ContactInfo, Lead, LeadDraft, LeadPatch, PROFILE_PLACEHOLDER};
pub use status::LeadStatus;
