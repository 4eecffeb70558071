//! Stage-status derivation.
//!
//! An [`ExecutionRecord`] does not report a status per stage; the console
//! derives one for each of the five fixed stages. The mapping is pure and
//! recomputed on every render — stage views are never stored.

use crate::client::ExecutionRecord;
use crate::status::StatusKind;

/// The fixed pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Checkout,
    Build,
    Test,
    Package,
    Deploy,
}

impl Stage {
    /// All stages in pipeline order. [`derive_stages`] yields exactly this
    /// sequence regardless of which record fields are present.
    pub const ALL: [Stage; 5] = [
        Stage::Checkout,
        Stage::Build,
        Stage::Test,
        Stage::Package,
        Stage::Deploy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Checkout => "Checkout",
            Self::Build => "Build",
            Self::Test => "Test",
            Self::Package => "Package",
            Self::Deploy => "Deploy",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Checkout => "📥",
            Self::Build => "🔨",
            Self::Test => "✅",
            Self::Package => "📦",
            Self::Deploy => "🚀",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Derived display state of one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageView {
    pub stage: Stage,
    pub status: StatusKind,
    /// Text shown on the badge: the backend's own spelling when the stage
    /// has a reported field, otherwise the derived status.
    pub label: String,
}

/// Derived or field-reported raw status for one stage.
enum Derived<'a> {
    /// No backend field for this stage; status inferred from `currentStage`.
    Inferred(StatusKind),
    /// Backend-reported field, possibly absent.
    Field(Option<&'a str>),
}

fn in_stage(record: &ExecutionRecord, name: &str) -> bool {
    record
        .current_stage
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case(name))
}

/// Map a record to the five stage views, in fixed order.
///
/// Checkout and Package are inferred from `currentStage`: checkout counts
/// as complete once the pipeline has progressed past it, and Package
/// mirrors `buildStatus` while not itself running. The backend does not
/// report explicit statuses for these two stages, so the inference is the
/// best signal available.
///
/// A stage field the backend has not set yet reads as PENDING; a field set
/// to something outside the status vocabulary keeps its own spelling and
/// the unknown bucket.
pub fn derive_stages(record: &ExecutionRecord) -> Vec<StageView> {
    Stage::ALL
        .iter()
        .map(|&stage| {
            let derived = match stage {
                Stage::Checkout => {
                    if in_stage(record, "CHECKOUT") {
                        Derived::Inferred(StatusKind::Running)
                    } else {
                        Derived::Inferred(StatusKind::Success)
                    }
                }
                Stage::Build => Derived::Field(record.build_status.as_deref()),
                Stage::Test => Derived::Field(record.test_status.as_deref()),
                Stage::Package => {
                    if in_stage(record, "PACKAGE") {
                        Derived::Inferred(StatusKind::Running)
                    } else {
                        Derived::Field(record.build_status.as_deref())
                    }
                }
                Stage::Deploy => Derived::Field(record.deployment_status.as_deref()),
            };
            let (status, label) = match derived {
                Derived::Inferred(status) => (status, status.to_string()),
                Derived::Field(Some(raw)) => {
                    (StatusKind::parse(Some(raw)), raw.to_ascii_uppercase())
                }
                Derived::Field(None) => (StatusKind::Pending, StatusKind::Pending.to_string()),
            };
            StageView { stage, status, label }
        })
        .collect()
}
