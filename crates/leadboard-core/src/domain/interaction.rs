use crate::domain::ids::InteractionId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub interaction_id: InteractionId,
    #[serde(default)]
    pub date: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub sales_rep: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionDraft {
    pub interaction_id: Option<InteractionId>,
    pub date: String,
    pub kind: String,
    pub notes: String,
    pub sales_rep: String,
}

impl InteractionDraft {
    pub fn is_blank(&self) -> bool {
        self.date.trim().is_empty()
            && self.kind.trim().is_empty()
            && self.notes.trim().is_empty()
            && self.sales_rep.trim().is_empty()
    }

    pub fn into_interaction(self, interaction_id: InteractionId) -> Interaction {
        Interaction {
            interaction_id,
            date: self.date.trim().to_string(),
            kind: self.kind.trim().to_string(),
            notes: self.notes.trim().to_string(),
            sales_rep: self.sales_rep.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Interaction, InteractionDraft};
    use crate::domain::InteractionId;

    #[test]
    fn interaction_uses_source_field_names() {
        let raw = r#"{"interactionId":7,"date":"2024-01-02","type":"Call","notes":"Intro","salesRep":"Sam"}"#;
        let parsed: Interaction = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.interaction_id, InteractionId(7));
        assert_eq!(parsed.kind, "Call");
        assert_eq!(parsed.sales_rep, "Sam");

        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["type"], "Call");
        assert_eq!(json["salesRep"], "Sam");
    }

    #[test]
    fn blank_draft_detection() {
        assert!(InteractionDraft::default().is_blank());
        let draft = InteractionDraft {
            notes: "follow up".to_string(),
            ..Default::default()
        };
        assert!(!draft.is_blank());
    }
}
