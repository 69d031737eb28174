//! Typed IDs for type-safe entity references.
//!
//! Budget entries reference object codes and fiscal years by id; typed wrappers
//! keep a `FiscalYearId` from being passed where an `ObjectCodeId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for a user.");
typed_id!(ObjectCodeLevelId, "Unique identifier for an object-code level.");
typed_id!(ObjectCodeId, "Unique identifier for an object code.");
typed_id!(FiscalYearId, "Unique identifier for a fiscal year.");
typed_id!(BudgetEntryId, "Unique identifier for a budget entry.");
typed_id!(ExpenseHistoryId, "Unique identifier for an expense history record.");
typed_id!(ContingentBillId, "Unique identifier for a contingent bill.");
typed_id!(
    ScheduleOfPaymentId,
    "Unique identifier for a schedule-of-payment line."
);
typed_id!(AsaanChequeId, "Unique identifier for an Asaan cheque.");
