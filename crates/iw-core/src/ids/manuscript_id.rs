use serde::{Deserialize, Serialize};

/// Identifier of one uploaded manuscript record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManuscriptId(String);

crate::ids::id_macro::impl_id!(ManuscriptId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manuscript_id_from_str() {
        let id: ManuscriptId = "ms-1".into();
        assert_eq!(id.as_str(), "ms-1");
    }

    #[test]
    fn test_manuscript_id_new_is_unique() {
        assert_ne!(ManuscriptId::new(), ManuscriptId::new());
    }
}
