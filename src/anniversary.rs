// 🕯️ Anniversaries - Named events recurring on a lunar (month, day)
//
// Matching ignores the year on purpose ("birthday" semantics). That rule has
// its own name so nobody confuses it with LunarDate's full equality.

use serde::Serialize;
use std::collections::HashMap;

use crate::lunar_date::LunarDate;

// ============================================================================
// ANNIVERSARY
// ============================================================================

/// Anniversary - One row of the input table
///
/// `date.year()` is provenance only. `uid` is stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anniversary {
    pub name: String,
    pub date: LunarDate,
    pub uid: String,
}

impl Anniversary {
    pub fn new(name: impl Into<String>, date: LunarDate, uid: impl Into<String>) -> Self {
        Anniversary {
            name: name.into(),
            date,
            uid: uid.into(),
        }
    }

    /// Does this anniversary fall on `date`, whatever the year?
    pub fn falls_on(&self, date: &LunarDate) -> bool {
        is_same_anniversary(&self.date, date)
    }
}

/// Same (month, day), year ignored
pub fn is_same_anniversary(a: &LunarDate, b: &LunarDate) -> bool {
    a.month_day() == b.month_day()
}

/// All anniversaries falling on `date`, in table order
///
/// Linear scan. [`AnniversaryIndex`] returns the same sequence without the scan.
pub fn find_by_date<'a>(anniversaries: &'a [Anniversary], date: &LunarDate) -> Vec<&'a Anniversary> {
    anniversaries.iter().filter(|a| a.falls_on(date)).collect()
}

// ============================================================================
// ANNIVERSARY INDEX
// ============================================================================

/// AnniversaryIndex - (month, day) → anniversaries, table order preserved
///
/// Built once per run; the projector asks it once per walked day.
#[derive(Debug)]
pub struct AnniversaryIndex<'a> {
    anniversaries: &'a [Anniversary],
    by_month_day: HashMap<(u8, u8), Vec<usize>>,
}

impl<'a> AnniversaryIndex<'a> {
    pub fn new(anniversaries: &'a [Anniversary]) -> Self {
        let mut by_month_day: HashMap<(u8, u8), Vec<usize>> = HashMap::new();

        for (position, anniversary) in anniversaries.iter().enumerate() {
            by_month_day
                .entry(anniversary.date.month_day())
                .or_default()
                .push(position);
        }

        AnniversaryIndex {
            anniversaries,
            by_month_day,
        }
    }

    /// All anniversaries matching `date` by (month, day), in table order
    pub fn matching(&self, date: &LunarDate) -> Vec<&'a Anniversary> {
        let anniversaries = self.anniversaries;
        self.by_month_day
            .get(&date.month_day())
            .map(|positions| positions.iter().map(|&i| &anniversaries[i]).collect())
            .unwrap_or_default()
    }

    /// Number of distinct (month, day) keys
    pub fn distinct_days(&self) -> usize {
        self.by_month_day.len()
    }

    pub fn len(&self) -> usize {
        self.anniversaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anniversaries.is_empty()
    }
}
