use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(TriageLevel {
    High => "high",
    Moderate => "moderate",
    Low => "low",
});

str_enum!(ConfidenceLevel {
    High => "high",
    Moderate => "moderate",
    Low => "low",
});

str_enum!(SubmissionStatus {
    Waiting => "waiting",
    InTreatment => "in_treatment",
});

str_enum!(NurseDecision {
    Accept => "accept",
    Override => "override",
});

impl TriageLevel {
    /// Coarse priority rank used to seed the queue for submissions that
    /// have never been manually ordered. Lower sorts first.
    pub fn rank(level: Option<TriageLevel>) -> u8 {
        match level {
            Some(TriageLevel::High) => 0,
            Some(TriageLevel::Moderate) => 1,
            Some(TriageLevel::Low) => 2,
            None => 3,
        }
    }
}
