use crate::period::Period;
use serde::{Deserialize, Serialize};

/// How a reference period stands relative to a target period.
///
/// `target.relation_to(&reference)` yields exactly one variant for any pair of
/// periods. Variant docs read "the reference ...".
///
/// ```text
///  target:            |--------|
///  After:                         |---|
///  StartTouching:              |----|
///  StartInside:            |-------|
///  Enclosing:      |----------------|
///  Inside:              |---|
///  EndInside:    |-------|
///  EndTouching: |-----|
///  Before:  |---|
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Relation {
    /// Starts after the target ends.
    After,
    /// Starts exactly where the target ends.
    StartTouching,
    /// Starts inside the target and ends after it.
    StartInside,
    /// Lies inside the target, sharing its start.
    InsideStartTouching,
    /// Encloses the target, sharing its start.
    EnclosingStartTouching,
    /// Strictly encloses the target.
    Enclosing,
    /// Encloses the target, sharing its end.
    EnclosingEndTouching,
    /// Same start and end.
    ExactMatch,
    /// Lies strictly inside the target.
    Inside,
    /// Lies inside the target, sharing its end.
    InsideEndTouching,
    /// Starts before the target and ends inside it.
    EndInside,
    /// Ends exactly where the target starts.
    EndTouching,
    /// Ends before the target starts.
    Before,
}

impl Relation {
    pub const ALL: [Relation; 13] = [
        Relation::After,
        Relation::StartTouching,
        Relation::StartInside,
        Relation::InsideStartTouching,
        Relation::EnclosingStartTouching,
        Relation::Enclosing,
        Relation::EnclosingEndTouching,
        Relation::ExactMatch,
        Relation::Inside,
        Relation::InsideEndTouching,
        Relation::EndInside,
        Relation::EndTouching,
        Relation::Before,
    ];

    /// Classifies `reference` against `target`.
    ///
    /// Boundary equality is checked before containment, so a shared boundary
    /// always selects a touching variant (or `ExactMatch`) over the strict
    /// `Inside` / `Enclosing` ones. A moment against a longer period it touches
    /// or lies in is always `StartTouching` when the target is the moment and
    /// `EndTouching` when the reference is, whichever boundary it sits on.
    pub fn classify<T, R>(target: &T, reference: &R) -> Relation
    where
        T: Period + ?Sized,
        R: Period + ?Sized,
    {
        let (t_start, t_end) = (target.start(), target.end());
        let (r_start, r_end) = (reference.start(), reference.end());

        if t_end < r_start {
            return Relation::After;
        }
        if t_start > r_end {
            return Relation::Before;
        }
        if t_start == r_start && t_end == r_end {
            return Relation::ExactMatch;
        }

        // A moment touching or inside a longer period.
        if target.is_moment() {
            return Relation::StartTouching;
        }
        if reference.is_moment() {
            return Relation::EndTouching;
        }

        if t_end == r_start {
            return Relation::StartTouching;
        }
        if t_start == r_end {
            return Relation::EndTouching;
        }

        if reference.has_inside_period(target) {
            if t_start == r_start {
                return Relation::EnclosingStartTouching;
            }
            return if t_end == r_end {
                Relation::EnclosingEndTouching
            } else {
                Relation::Enclosing
            };
        }

        let contains_reference_start = target.has_inside(r_start);
        let contains_reference_end = target.has_inside(r_end);

        if contains_reference_start && contains_reference_end {
            if t_start == r_start {
                return Relation::InsideStartTouching;
            }
            return if t_end == r_end {
                Relation::InsideEndTouching
            } else {
                Relation::Inside
            };
        }

        if contains_reference_start {
            Relation::StartInside
        } else {
            Relation::EndInside
        }
    }

    /// The relation obtained when target and reference swap roles.
    pub fn inverse(self) -> Relation {
        match self {
            Relation::After => Relation::Before,
            Relation::StartTouching => Relation::EndTouching,
            Relation::StartInside => Relation::EndInside,
            Relation::InsideStartTouching => Relation::EnclosingStartTouching,
            Relation::EnclosingStartTouching => Relation::InsideStartTouching,
            Relation::Enclosing => Relation::Inside,
            Relation::EnclosingEndTouching => Relation::InsideEndTouching,
            Relation::ExactMatch => Relation::ExactMatch,
            Relation::Inside => Relation::Enclosing,
            Relation::InsideEndTouching => Relation::EnclosingEndTouching,
            Relation::EndInside => Relation::StartInside,
            Relation::EndTouching => Relation::StartTouching,
            Relation::Before => Relation::After,
        }
    }

    /// True for the variants where the periods share more than a boundary.
    pub fn is_overlapping(self) -> bool {
        !matches!(
            self,
            Relation::After | Relation::StartTouching | Relation::EndTouching | Relation::Before
        )
    }
}
