//! Catalog validation and level hierarchy rules.

use std::collections::HashSet;

use finoffice_shared::types::ObjectCodeLevelId;

use super::error::CatalogError;
use super::types::{LevelInput, ObjectCodeInput, ObjectCodeLevel};

/// Maximum length of an object code.
pub const MAX_CODE_LEN: usize = 20;
/// Maximum length of a head of account.
pub const MAX_HEAD_LEN: usize = 255;
/// Maximum length of a level name.
pub const MAX_LEVEL_NAME_LEN: usize = 100;

/// Catalog business rules.
pub struct CatalogService;

impl CatalogService {
    /// Validates a code token: non-empty, bounded, no whitespace.
    ///
    /// # Errors
    ///
    /// Returns `Validation` describing the first problem found.
    pub fn validate_code(code: &str) -> Result<String, CatalogError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(CatalogError::Validation("code is required".into()));
        }
        if code.chars().count() > MAX_CODE_LEN {
            return Err(CatalogError::Validation(format!(
                "code exceeds {MAX_CODE_LEN} characters"
            )));
        }
        if code.chars().any(char::is_whitespace) {
            return Err(CatalogError::Validation(
                "code must not contain whitespace".into(),
            ));
        }
        Ok(code.to_string())
    }

    /// Validates and trims an object code payload.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a bad code or head of account.
    pub fn validate_object_code(input: ObjectCodeInput) -> Result<ObjectCodeInput, CatalogError> {
        let code = Self::validate_code(&input.code)?;
        let head = required_text(&input.head_of_account, "head of account", MAX_HEAD_LEN)?;
        Ok(ObjectCodeInput {
            code,
            head_of_account: head,
            level_id: input.level_id,
        })
    }

    /// Validates and trims a level payload.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a bad code or name.
    pub fn validate_level(input: LevelInput) -> Result<LevelInput, CatalogError> {
        let code = Self::validate_code(&input.code)?;
        let name = required_text(&input.name, "level name", MAX_LEVEL_NAME_LEN)?;
        Ok(LevelInput {
            code,
            name,
            parent_id: input.parent_id,
        })
    }

    /// Checks a level's parent: it must exist, be active, and not be the
    /// level itself or one of its descendants.
    ///
    /// `level_id` is `None` when creating.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReference` when the parent is unusable.
    pub fn check_parent(
        level_id: Option<ObjectCodeLevelId>,
        parent_id: ObjectCodeLevelId,
        levels: &[ObjectCodeLevel],
    ) -> Result<(), CatalogError> {
        let parent = levels
            .iter()
            .find(|l| l.id == parent_id)
            .ok_or_else(|| CatalogError::InvalidReference(format!("parent level {parent_id}")))?;

        if !parent.is_active {
            return Err(CatalogError::InvalidReference(format!(
                "parent level {parent_id} is inactive"
            )));
        }

        let Some(level_id) = level_id else {
            return Ok(());
        };

        // walk up from the parent; meeting the level itself means a cycle
        let mut seen = HashSet::new();
        let mut cursor = Some(parent_id);
        while let Some(id) = cursor {
            if id == level_id {
                return Err(CatalogError::InvalidReference(
                    "a level cannot be its own ancestor".into(),
                ));
            }
            if !seen.insert(id) {
                break;
            }
            cursor = levels.iter().find(|l| l.id == id).and_then(|l| l.parent_id);
        }

        Ok(())
    }

    /// Checks that a level can be deactivated.
    ///
    /// # Errors
    ///
    /// Returns `LevelInUse` when active children or active object codes
    /// still reference it.
    pub fn ensure_level_deletable(active_children: u64, active_codes: u64) -> Result<(), CatalogError> {
        if active_children > 0 || active_codes > 0 {
            return Err(CatalogError::LevelInUse {
                active_children,
                active_codes,
            });
        }
        Ok(())
    }
}

fn required_text(value: &str, field: &str, max: usize) -> Result<String, CatalogError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CatalogError::Validation(format!("{field} is required")));
    }
    if value.chars().count() > max {
        return Err(CatalogError::Validation(format!(
            "{field} exceeds {max} characters"
        )));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn level(code: &str, parent_id: Option<ObjectCodeLevelId>) -> ObjectCodeLevel {
        ObjectCodeLevel {
            id: ObjectCodeLevelId::new(),
            code: code.to_string(),
            name: format!("Level {code}"),
            parent_id,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    #[case("A01101", true)]
    #[case("  A03970 ", true)]
    #[case("", false)]
    #[case("A01 101", false)]
    #[case("A0110100000000000000X", false)]
    fn test_validate_code(#[case] code: &str, #[case] ok: bool) {
        assert_eq!(CatalogService::validate_code(code).is_ok(), ok);
    }

    #[test]
    fn test_validate_object_code_head_required() {
        let input = ObjectCodeInput {
            code: "A01101".into(),
            head_of_account: "   ".into(),
            level_id: None,
        };
        assert!(matches!(
            CatalogService::validate_object_code(input),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn test_level_in_use() {
        assert!(CatalogService::ensure_level_deletable(0, 0).is_ok());
        assert!(matches!(
            CatalogService::ensure_level_deletable(1, 0),
            Err(CatalogError::LevelInUse { .. })
        ));
        assert!(matches!(
            CatalogService::ensure_level_deletable(0, 3),
            Err(CatalogError::LevelInUse { active_codes: 3, .. })
        ));
    }

    #[test]
    fn test_check_parent_rejects_cycle() {
        let root = level("ROOT", None);
        let child = level("CHILD", Some(root.id));
        let grandchild = level("GRAND", Some(child.id));
        let levels = vec![root.clone(), child.clone(), grandchild.clone()];

        assert!(CatalogService::check_parent(None, child.id, &levels).is_ok());
        assert!(CatalogService::check_parent(Some(grandchild.id), root.id, &levels).is_ok());
        assert!(CatalogService::check_parent(Some(root.id), grandchild.id, &levels).is_err());
        assert!(CatalogService::check_parent(Some(root.id), root.id, &levels).is_err());
    }

    #[test]
    fn test_check_parent_inactive_or_missing() {
        let mut parent = level("P", None);
        parent.is_active = false;
        let levels = vec![parent.clone()];

        assert!(matches!(
            CatalogService::check_parent(None, parent.id, &levels),
            Err(CatalogError::InvalidReference(_))
        ));
        assert!(matches!(
            CatalogService::check_parent(None, ObjectCodeLevelId::new(), &levels),
            Err(CatalogError::InvalidReference(_))
        ));
    }
}
